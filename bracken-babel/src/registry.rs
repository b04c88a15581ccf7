//! Renderer registry for format discovery and selection.
//!
//! Formats are registered under their id and looked up by name, so the CLI
//! and embedding applications never name concrete renderer types. Renderers
//! are reusable across conversions: the engine calls `init` before every
//! conversion, which resets whatever state the previous one left behind.

use std::collections::HashMap;

use crate::engine;
use crate::error::RenderError;
use crate::formats::{Html, Markdown, PlainText, Rtf, Tex, Wiki};
use crate::renderer::Renderer;

/// Registry of output formats.
pub struct RendererRegistry {
    renderers: HashMap<String, Box<dyn Renderer>>,
}

impl RendererRegistry {
    /// Create an empty registry.
    pub fn new() -> RendererRegistry {
        RendererRegistry {
            renderers: HashMap::new(),
        }
    }

    /// Register a renderer under its own name. An existing renderer with the
    /// same name is replaced.
    pub fn register<R: Renderer + 'static>(&mut self, renderer: R) {
        self.renderers
            .insert(renderer.name().to_string(), Box::new(renderer));
    }

    /// Look up a renderer by format id.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut dyn Renderer, RenderError> {
        match self.renderers.get_mut(name) {
            Some(renderer) => Ok(renderer.as_mut()),
            None => Err(RenderError::UnknownFormat(name.to_string())),
        }
    }

    /// Check whether a format id is registered.
    pub fn has(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    /// All registered format ids, sorted.
    pub fn formats(&self) -> Vec<String> {
        let mut names: Vec<String> = self.renderers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Convert source text with the named format.
    pub fn convert(
        &mut self,
        source: &str,
        format: &str,
        wrap: bool,
    ) -> Result<String, RenderError> {
        self.convert_file(source, format, wrap, None)
    }

    /// [`convert`](RendererRegistry::convert), with a file name for error
    /// messages.
    pub fn convert_file(
        &mut self,
        source: &str,
        format: &str,
        wrap: bool,
        file_name: Option<&str>,
    ) -> Result<String, RenderError> {
        let renderer = self.get_mut(format)?;
        engine::convert_file(renderer, source, wrap, file_name)
    }

    /// A registry with every built-in format.
    pub fn with_defaults() -> RendererRegistry {
        let mut registry = RendererRegistry::new();
        registry.register(Html::default());
        registry.register(PlainText::default());
        registry.register(Markdown::default());
        registry.register(Wiki::default());
        registry.register(Tex::default());
        registry.register(Rtf::default());
        registry
    }
}

impl Default for RendererRegistry {
    fn default() -> RendererRegistry {
        RendererRegistry::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_registered() {
        let registry = RendererRegistry::with_defaults();
        assert_eq!(
            registry.formats(),
            vec!["html", "markdown", "rtf", "tex", "text", "wiki"]
        );
        assert!(registry.has("html"));
        assert!(!registry.has("pdf"));
    }

    #[test]
    fn test_unknown_format() {
        let mut registry = RendererRegistry::with_defaults();
        assert_eq!(
            registry.convert("text", "pdf", false),
            Err(RenderError::UnknownFormat("pdf".to_string()))
        );
    }

    #[test]
    fn test_convert_through_registry() {
        let mut registry = RendererRegistry::with_defaults();
        let result = registry.convert("\\s {bold}", "html", false);
        assert_eq!(result, Ok("<b>bold</b>".to_string()));
    }
}
