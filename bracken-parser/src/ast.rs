//! The element tree produced by the parser.
//!
//! An element is either a raw text run, a single escaped symbol, a tag with
//! parameters, or an anonymous braced group. Tag parameters are themselves
//! element sequences, which is where the recursion lives. Every element is
//! owned exactly once by its parent sequence; the tree has no cycles and no
//! back references.

use serde::Serialize;

/// One node of the parsed document tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Element {
    /// A raw text run. Whitespace is preserved as written; runs are collapsed
    /// at render time, not at parse time.
    Text(String),
    /// A single character produced by the escape mechanism (`\\`, `\{`, ...).
    Symbol(char),
    /// A tag invocation.
    Tag(Tag),
    /// A braced sequence with no preceding tag name, e.g. a table cell.
    Group(Vec<Element>),
}

impl Element {
    /// Shorthand for a text element.
    pub fn text(content: impl Into<String>) -> Element {
        Element::Text(content.into())
    }
}

/// A tag invocation: `\id {parameter} {parameter} ...`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    /// Tag name, or a single digit `"1"`..`"6"` for headers.
    pub id: String,
    /// Ordered parameters, each an element sequence of its own.
    pub parameters: Vec<Vec<Element>>,
}

impl Tag {
    /// Create a tag with no parameters.
    pub fn new(id: impl Into<String>) -> Tag {
        Tag {
            id: id.into(),
            parameters: Vec::new(),
        }
    }

    /// Create a tag with the given parameters.
    pub fn with_parameters(id: impl Into<String>, parameters: Vec<Vec<Element>>) -> Tag {
        Tag {
            id: id.into(),
            parameters,
        }
    }

    /// True if this tag is a header (`\1` through `\6`).
    pub fn is_header(&self) -> bool {
        self.header_level().is_some()
    }

    /// Header level for `\1`..`\6`, `None` for every other id.
    pub fn header_level(&self) -> Option<u8> {
        let mut characters = self.id.chars();
        match (characters.next(), characters.next()) {
            (Some(digit @ '1'..='6'), None) => Some(digit as u8 - b'0'),
            _ => None,
        }
    }
}

/// Concatenate the text and symbol leaves of a sequence, skipping tags and
/// groups. Used for opaque values such as identifiers and link targets.
pub fn plain_text(elements: &[Element]) -> String {
    let mut result = String::new();
    for element in elements {
        match element {
            Element::Text(text) => result.push_str(text),
            Element::Symbol(symbol) => result.push(*symbol),
            Element::Tag(_) | Element::Group(_) => {}
        }
    }
    result
}
