//! Built-in format implementations.
//!
//! Each format is one struct implementing [`Renderer`](crate::Renderer).
//! They share the block-tag set and the code-block argument convention; the
//! rest is pure string templating per format.

pub mod html;
pub mod markdown;
pub mod rtf;
pub mod tex;
pub mod text;
pub mod wiki;

pub use html::Html;
pub use markdown::Markdown;
pub use rtf::Rtf;
pub use tex::Tex;
pub use text::PlainText;
pub use wiki::Wiki;

use bracken_parser::Element;

use crate::engine::Scope;
use crate::error::RenderError;
use crate::renderer::{Arguments, Renderer, Spec};

/// Tag ids that interrupt paragraph buffering, shared by all built-in
/// formats.
pub(crate) const BLOCK_TAGS: &[&str] = &[
    "block", "body", "code", "title", "number", "list", "image", "table",
];

/// Split a `\code` invocation into `(code, language)`.
///
/// One parameter is bare code; two parameters are a language identifier
/// followed by the code. The code is rendered verbatim (no whitespace
/// collapse) and edge-trimmed.
pub(crate) fn code_arguments<R: Renderer + ?Sized>(
    renderer: &mut R,
    args: &Arguments,
    scope: &mut Scope,
) -> Result<(String, String), RenderError> {
    if args.len() == 1 {
        let code = scope.parse_with(renderer, args.required(0)?, Spec::verbatim())?;
        Ok((code.trim().to_string(), String::new()))
    } else {
        let code = scope.parse_with(renderer, args.required(1)?, Spec::verbatim())?;
        let language = scope.clear(renderer, args.required(0)?);
        Ok((code.trim().to_string(), language))
    }
}

/// The cell groups of one table row parameter.
pub(crate) fn row_cells(row: &[Element]) -> impl Iterator<Item = &Vec<Element>> + '_ {
    row.iter().filter_map(|element| match element {
        Element::Group(content) => Some(content),
        _ => None,
    })
}
