//! Error types for rendering

use std::fmt;

use bracken_parser::ParseError;

/// Errors that abort a conversion.
///
/// There is no partial-output mode: any of these propagates to the caller of
/// `convert` as a hard failure. Renderers must not swallow them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// No renderer behavior for a tag during the rendering pass.
    UnknownTag { tag: String, file: Option<String> },
    /// A required capability the format chose not to provide. Raised lazily,
    /// only when the tag is actually encountered.
    TagNotImplemented { tag: String },
    /// A tag was invoked with fewer parameters than its method needs.
    MissingArgument { tag: String, index: usize },
    /// A tag parameter that exists but cannot be interpreted.
    BadArgument { tag: String, detail: String },
    /// Render recursion deeper than the supported limit (usually a macro
    /// that expands to itself).
    TooDeep,
    /// No renderer registered under the requested format id.
    UnknownFormat(String),
    /// The document failed to parse.
    Parse(ParseError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnknownTag { tag, file: None } => {
                write!(f, "unknown tag \\{}", tag)
            }
            RenderError::UnknownTag {
                tag,
                file: Some(file),
            } => {
                write!(f, "unknown tag \\{} in {}", tag, file)
            }
            RenderError::TagNotImplemented { tag } => {
                write!(f, "tag \\{} is not implemented in this format", tag)
            }
            RenderError::MissingArgument { tag, index } => {
                write!(f, "tag \\{} is missing argument {}", tag, index)
            }
            RenderError::BadArgument { tag, detail } => {
                write!(f, "bad argument of tag \\{}: {}", tag, detail)
            }
            RenderError::TooDeep => {
                write!(f, "render recursion too deep")
            }
            RenderError::UnknownFormat(name) => {
                write!(f, "unknown format `{}`", name)
            }
            RenderError::Parse(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Parse(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ParseError> for RenderError {
    fn from(error: ParseError) -> RenderError {
        RenderError::Parse(error)
    }
}
