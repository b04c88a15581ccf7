//! The Renderer trait and the argument view passed to its methods.

use bracken_parser::Element;

use crate::engine::Scope;
use crate::error::RenderError;
use crate::tags::TagKind;

/// How a text leaf should be written out.
///
/// Requested by renderer methods when they recursively render their own
/// sub-elements; the default collapses whitespace runs and applies the
/// format's escape table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spec {
    /// Collapse every whitespace run to a single space.
    pub trim: bool,
    /// After escaping, pass the text through the renderer's
    /// [`full_escape`](Renderer::full_escape) hook.
    pub full_escape: bool,
}

impl Default for Spec {
    fn default() -> Spec {
        Spec {
            trim: true,
            full_escape: false,
        }
    }
}

impl Spec {
    /// Keep whitespace exactly as written. Used by code blocks.
    pub fn verbatim() -> Spec {
        Spec {
            trim: false,
            full_escape: false,
        }
    }
}

/// Read-only view over one tag's parameters.
///
/// Created fresh for each dispatch call and discarded when it returns.
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    tag: &'a str,
    parameters: &'a [Vec<Element>],
}

impl<'a> Arguments<'a> {
    pub fn new(tag: &'a str, parameters: &'a [Vec<Element>]) -> Arguments<'a> {
        Arguments { tag, parameters }
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// The parameter at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&'a [Element]> {
        self.parameters.get(index).map(Vec::as_slice)
    }

    /// The parameter at `index`, or a [`RenderError::MissingArgument`]
    /// naming the tag.
    pub fn required(&self, index: usize) -> Result<&'a [Element], RenderError> {
        self.get(index).ok_or_else(|| RenderError::MissingArgument {
            tag: self.tag.to_string(),
            index,
        })
    }

    /// All parameters in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a [Element]> + '_ {
        self.parameters.iter().map(Vec::as_slice)
    }
}

/// The per-format capability set consumed by the dispatch engine.
///
/// A renderer is a plain struct: whatever state it needs between the priming
/// and rendering passes (section counters, citation tables) lives in its own
/// fields and is reset by [`init`](Renderer::init). To recursively render a
/// tag's content, methods call back into the engine through the [`Scope`]
/// they were handed, passing themselves along:
///
/// ```ignore
/// fn render_tag(
///     &mut self,
///     kind: &TagKind,
///     args: &Arguments,
///     scope: &mut Scope,
/// ) -> Result<Option<String>, RenderError> {
///     match kind {
///         TagKind::Strong => {
///             let content = scope.parse(self, args.required(0)?)?;
///             Ok(Some(format!("<b>{}</b>", content)))
///         }
///         _ => Ok(None),
///     }
/// }
/// ```
pub trait Renderer {
    /// Format id, e.g. `"html"`.
    fn name(&self) -> &str;

    /// Ordered character substitutions applied to every escaped text leaf.
    ///
    /// Order matters: a later substitution must not re-match text produced
    /// by an earlier one, which is why HTML escapes `&` first.
    fn escape_table(&self) -> &[(&str, &str)] {
        &[]
    }

    /// Tag ids that interrupt paragraph buffering inside block content.
    fn block_tags(&self) -> &[&str] {
        &[]
    }

    /// Escape a text leaf. The default walks [`escape_table`]
    /// (Renderer::escape_table) in declared order; formats whose escaping is
    /// not a finite substitution table override this instead.
    fn escape(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (from, to) in self.escape_table() {
            result = result.replace(from, to);
        }
        result
    }

    /// Deep escape applied on top of [`escape`](Renderer::escape) when a
    /// method requests [`Spec::full_escape`]. Identity by default.
    fn full_escape(&self, text: &str) -> String {
        text.to_string()
    }

    /// Called once before the priming pass.
    fn init(&mut self) {}

    /// Called once after the rendering pass completes.
    fn finish(&mut self) {}

    /// Handle one tag during the priming pass. `Ok(None)` means this tag has
    /// no priming behavior, which is never an error.
    fn prime_tag(
        &mut self,
        kind: &TagKind,
        args: &Arguments,
        scope: &mut Scope,
    ) -> Result<Option<String>, RenderError> {
        let _ = (kind, args, scope);
        Ok(None)
    }

    /// Handle one tag during the rendering pass. `Ok(None)` means the format
    /// has no behavior for this kind; the engine then tries its own defaults
    /// and otherwise fails with [`RenderError::UnknownTag`].
    fn render_tag(
        &mut self,
        kind: &TagKind,
        args: &Arguments,
        scope: &mut Scope,
    ) -> Result<Option<String>, RenderError>;
}
