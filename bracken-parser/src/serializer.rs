//! Canonical writer for element trees.
//!
//! Produces Bracken source that parses back into an equivalent tree. The
//! output is canonical rather than byte-identical to the input: exactly one
//! space separates a tag name from each of its parameter braces, since any
//! whitespace there is dropped by the lexer anyway. Text runs are written
//! verbatim with the three special characters escaped.

use crate::ast::Element;
use crate::syntax::{PARAMETER_BEGIN, PARAMETER_END, TAG_MARKER};

/// Serialize an element sequence to canonical Bracken source.
pub fn serialize(elements: &[Element]) -> String {
    let mut result = String::new();
    write_sequence(&mut result, elements);
    result
}

fn write_sequence(result: &mut String, elements: &[Element]) {
    for element in elements {
        write_element(result, element);
    }
}

fn write_element(result: &mut String, element: &Element) {
    match element {
        Element::Text(text) => {
            for character in text.chars() {
                if character == TAG_MARKER
                    || character == PARAMETER_BEGIN
                    || character == PARAMETER_END
                {
                    result.push(TAG_MARKER);
                }
                result.push(character);
            }
        }
        Element::Symbol(symbol) => {
            result.push(TAG_MARKER);
            result.push(*symbol);
        }
        Element::Tag(tag) => {
            result.push(TAG_MARKER);
            result.push_str(&tag.id);
            for parameter in &tag.parameters {
                result.push(' ');
                result.push(PARAMETER_BEGIN);
                write_sequence(result, parameter);
                result.push(PARAMETER_END);
            }
        }
        Element::Group(children) => {
            result.push(PARAMETER_BEGIN);
            write_sequence(result, children);
            result.push(PARAMETER_END);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_document;

    fn canonical(source: &str) -> String {
        serialize(&parse_document(source).expect("parse failed"))
    }

    #[test]
    fn test_plain_text_roundtrips_verbatim() {
        assert_eq!(canonical("plain  text"), "plain  text");
    }

    #[test]
    fn test_tag_spacing_is_canonicalized() {
        assert_eq!(canonical("\\b{bold}"), "\\b {bold}");
        assert_eq!(canonical("\\b   {bold}"), "\\b {bold}");
        assert_eq!(canonical("\\ref {a} {b}"), "\\ref {a} {b}");
    }

    #[test]
    fn test_canonical_snapshot() {
        insta::assert_snapshot!(
            canonical("\\2{Birds}{birds} the \\e{crow}"),
            @r"\2 {Birds} {birds} the \e {crow}"
        );
    }

    #[test]
    fn test_symbols_are_reescaped() {
        assert_eq!(canonical("\\\\b \\{\\}"), "\\\\b \\{\\}");
    }

    #[test]
    fn test_groups_keep_their_braces() {
        assert_eq!(canonical("\\table {{a} {b}}"), "\\table {{a}{b}}");
    }

    #[test]
    fn test_reparse_is_identity_on_canonical_form() {
        for source in [
            "plain text",
            "\\b {bold} tail",
            "\\ref {link} {label}",
            "\\table {{a}{b}}",
            "\\code {x \\{0\\} y}",
        ] {
            let parsed = parse_document(source).expect("parse failed");
            let written = serialize(&parsed);
            let reparsed = parse_document(&written).expect("reparse failed");
            assert_eq!(parsed, reparsed, "canonical form of {:?} drifted", source);
        }
    }
}
