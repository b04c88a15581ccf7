//! Shared configuration loader for the Bracken toolchain.
//!
//! `defaults/bracken.default.toml` is embedded into every binary so that
//! documented defaults and runtime behavior stay in sync. Applications layer
//! user-specific files on top of those defaults via [`Loader`] before
//! deserializing into [`BrackenConfig`].

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;

const DEFAULT_TOML: &str = include_str!("../defaults/bracken.default.toml");

/// Top-level configuration consumed by Bracken applications.
#[derive(Debug, Clone, Deserialize)]
pub struct BrackenConfig {
    pub convert: ConvertConfig,
    pub markdown: MarkdownConfig,
}

/// Conversion defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    /// Format id used when none is given on the command line.
    pub default_format: String,
    /// Wrap documents in the format's body frame.
    pub wrap: bool,
}

/// Markdown-specific knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    /// Fall back to inline HTML for tags CommonMark cannot express.
    pub use_html: bool,
    /// Emit GitHub Flavored Markdown extensions.
    pub github_flavored: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start from the embedded defaults.
    pub fn new() -> Loader {
        Loader {
            builder: Config::builder()
                .add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Layer a user configuration file on top. Missing files are ignored so
    /// callers can probe well-known locations unconditionally.
    pub fn with_user_file(mut self, path: &Path) -> Loader {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        self
    }

    /// Build and deserialize the final configuration.
    pub fn load(self) -> Result<BrackenConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Loader {
        Loader::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_deserialize() {
        let config = Loader::new().load().expect("defaults must load");
        assert_eq!(config.convert.default_format, "html");
        assert!(config.convert.wrap);
        assert!(config.markdown.use_html);
        assert!(!config.markdown.github_flavored);
    }

    #[test]
    fn test_missing_user_file_is_ignored() {
        let config = Loader::new()
            .with_user_file(Path::new("/nonexistent/bracken.toml"))
            .load()
            .expect("missing user file must not fail");
        assert_eq!(config.convert.default_format, "html");
    }
}
