//! Recursive IR builder
//!
//! Consumes the lexeme sequence and produces the element tree. Brace nesting
//! is recursion depth: every `ParamBegin` descends one level, every
//! `ParamEnd` returns from it. A `ParamEnd` with no open parameter makes the
//! document ambiguous and aborts the whole parse; an unclosed parameter at
//! end of input is tolerated, matching the lexer's best-effort policy for
//! malformed escapes.
//!
//! The builder keeps one nullable "pending tag" slot per nesting level. A
//! pending tag collects parameters from consecutive braced sequences and is
//! flushed into the result by whatever ends it: a text or symbol lexeme,
//! another tag name, the end of the enclosing parameter, or end of input.

use crate::ast::{Element, Tag};
use crate::error::ParseError;
use crate::lexing::{lex, Lexeme, LexemeKind};
use crate::syntax::strip_comments;

/// Maximum brace nesting depth. Deeper input is rejected rather than risking
/// the call stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parse raw source text into an element sequence.
///
/// Composes comment stripping, lexing, and IR building.
pub fn parse_document(text: &str) -> Result<Vec<Element>, ParseError> {
    let stripped = strip_comments(text);
    let lexemes = lex(&stripped);
    build_elements(&lexemes)
}

/// Build the element tree from a lexeme sequence.
pub fn build_elements(lexemes: &[Lexeme]) -> Result<Vec<Element>, ParseError> {
    let mut index = 0;
    build_sequence(lexemes, &mut index, 0)
}

fn build_sequence(
    lexemes: &[Lexeme],
    index: &mut usize,
    depth: usize,
) -> Result<Vec<Element>, ParseError> {
    let mut result: Vec<Element> = Vec::new();
    let mut pending: Option<Tag> = None;

    while *index < lexemes.len() {
        let lexeme = &lexemes[*index];
        match &lexeme.kind {
            LexemeKind::TagName(name) => {
                // A second name while one is pending means the first tag had
                // no further parameters.
                if let Some(tag) = pending.take() {
                    result.push(Element::Tag(tag));
                }
                pending = Some(Tag::new(name.clone()));
            }
            LexemeKind::ParamBegin => {
                if depth + 1 > MAX_NESTING_DEPTH {
                    return Err(ParseError::TooDeep {
                        position: lexeme.position,
                    });
                }
                *index += 1;
                let inner = build_sequence(lexemes, index, depth + 1)?;
                match pending.as_mut() {
                    Some(tag) => tag.parameters.push(inner),
                    None => result.push(Element::Group(inner)),
                }
                // `index` now rests on the matching ParamEnd (or at end of
                // input); the increment below skips it.
            }
            LexemeKind::ParamEnd => {
                if depth == 0 {
                    return Err(ParseError::UnbalancedBraces {
                        position: lexeme.position,
                    });
                }
                if let Some(tag) = pending.take() {
                    result.push(Element::Tag(tag));
                }
                return Ok(result);
            }
            LexemeKind::Text(text) => {
                if let Some(tag) = pending.take() {
                    result.push(Element::Tag(tag));
                }
                result.push(Element::Text(text.clone()));
            }
            LexemeKind::Symbol(symbol) => {
                if let Some(tag) = pending.take() {
                    result.push(Element::Tag(tag));
                }
                result.push(Element::Symbol(*symbol));
            }
        }
        *index += 1;
    }

    if let Some(tag) = pending.take() {
        result.push(Element::Tag(tag));
    }
    Ok(result)
}

/// Shift every top-level header by `offset` levels.
///
/// A legacy transform used when composing documents from parts: a part's
/// `\1` headers become `\2`, `\3`, ... in the assembled whole. The new level
/// is taken as-is; shifting past level 6 produces an id that is no longer a
/// header, exactly as written.
pub fn shift_headers(elements: &mut [Element], offset: i32) {
    if offset == 0 {
        return;
    }
    for element in elements.iter_mut() {
        if let Element::Tag(tag) = element {
            if let Some(level) = tag.header_level() {
                tag.id = (level as i32 + offset).to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::plain_text;

    fn parse(text: &str) -> Vec<Element> {
        parse_document(text).expect("parse failed")
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse("plain text"), vec![Element::text("plain text")]);
    }

    #[test]
    fn test_simple_tag() {
        assert_eq!(
            parse("\\b {bold}"),
            vec![Element::Tag(Tag::with_parameters(
                "b",
                vec![vec![Element::text("bold")]],
            ))]
        );
    }

    #[test]
    fn test_tag_with_two_parameters() {
        assert_eq!(
            parse("\\ref {link} {text}"),
            vec![Element::Tag(Tag::with_parameters(
                "ref",
                vec![vec![Element::text("link")], vec![Element::text("text")]],
            ))]
        );
    }

    #[test]
    fn test_tag_without_parameters_is_flushed_by_text() {
        assert_eq!(
            parse("\\br text"),
            vec![Element::Tag(Tag::new("br")), Element::text(" text")]
        );
    }

    #[test]
    fn test_nested_tags() {
        let elements = parse("\\b {a \\e {nested} b}");
        let Element::Tag(outer) = &elements[0] else {
            panic!("expected tag");
        };
        assert_eq!(outer.id, "b");
        assert_eq!(outer.parameters.len(), 1);
        let inner = &outer.parameters[0];
        assert_eq!(inner[0], Element::text("a "));
        let Element::Tag(nested) = &inner[1] else {
            panic!("expected nested tag");
        };
        assert_eq!(nested.id, "e");
        assert_eq!(inner[2], Element::text(" b"));
    }

    #[test]
    fn test_standalone_groups_become_cells() {
        let elements = parse("\\table {{a} {b}}");
        let Element::Tag(table) = &elements[0] else {
            panic!("expected tag");
        };
        assert_eq!(table.parameters.len(), 1);
        let row = &table.parameters[0];
        assert_eq!(
            row,
            &vec![
                Element::Group(vec![Element::text("a")]),
                Element::Group(vec![Element::text("b")]),
            ]
        );
    }

    #[test]
    fn test_unbalanced_close_is_fatal() {
        assert_eq!(
            parse_document("text}"),
            Err(ParseError::UnbalancedBraces { position: 4 })
        );
    }

    #[test]
    fn test_unclosed_parameter_is_tolerated() {
        let elements = parse_document("\\b {open").expect("parse failed");
        assert_eq!(
            elements,
            vec![Element::Tag(Tag::with_parameters(
                "b",
                vec![vec![Element::text("open")]],
            ))]
        );
    }

    #[test]
    fn test_nesting_limit() {
        let mut source = String::new();
        for _ in 0..(MAX_NESTING_DEPTH + 1) {
            source.push('{');
        }
        assert!(matches!(
            parse_document(&source),
            Err(ParseError::TooDeep { .. })
        ));
    }

    #[test]
    fn test_comments_are_stripped_before_lexing() {
        assert_eq!(
            parse("a /* hidden */b"),
            vec![Element::text("a b")]
        );
    }

    #[test]
    fn test_escaped_symbol_inside_parameter() {
        let elements = parse("\\b {\\}}");
        let Element::Tag(tag) = &elements[0] else {
            panic!("expected tag");
        };
        assert_eq!(tag.parameters[0], vec![Element::Symbol('}')]);
    }

    #[test]
    fn test_shift_headers() {
        let mut elements = parse("\\1 {Top} {top} text \\2 {Sub} {sub}");
        shift_headers(&mut elements, 1);
        let levels: Vec<String> = elements
            .iter()
            .filter_map(|element| match element {
                Element::Tag(tag) => Some(tag.id.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec!["2".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_header_parameters_reachable() {
        let elements = parse("\\2 {Title} {id}");
        let Element::Tag(header) = &elements[0] else {
            panic!("expected tag");
        };
        assert_eq!(plain_text(&header.parameters[0]), "Title");
        assert_eq!(plain_text(&header.parameters[1]), "id");
    }
}
