//! RTF output.
//!
//! The most stateful of the built-in formats, and the canonical consumer of
//! the priming pass: citations are collected into a numbered table during
//! priming so that `\cite` occurrences and the `\books` bibliography can
//! both render `[n]` references in one pass. Section numbering is plain
//! render-pass state. Everything resets in `init`, so one renderer value is
//! safe to reuse across conversions.

use std::collections::HashMap;

use bracken_parser::{plain_text, Element};

use crate::engine::Scope;
use crate::error::RenderError;
use crate::formats::{code_arguments, BLOCK_TAGS};
use crate::renderer::{Arguments, Renderer};
use crate::tags::TagKind;

const RTF_HEADER: &str = "{\\rtf0\\ansi\\deff0\n\
{\\*\\listtable{\\list\\listtemplateid1\n\
{\\listlevel\\levelnfc23{\\leveltext \\'01\\u8226 ?;}\\li720}\n\
{\\listlevel\\levelnfc23{\\leveltext \\'01\\u9702 ?;}\\li1080}\n\
{\\listlevel\\levelnfc23{\\leveltext \\'01\\u9642 ?;}\\li1440}\\listid1}}\n\
{\\listoverridetable{\\listoverride\\listid1\\ls1}}\n\
{\\fonttbl{\\f1 Courier 10 Pitch;}{\\f2 Arial;}{\\f3 Times New Roman;}}\\fs20";

/// Escape one text run for RTF: ASCII passes through, everything else
/// becomes a decimal `\uN` control word.
fn rtf_escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for character in text.chars() {
        if character.is_ascii() {
            result.push(character);
        } else {
            result.push_str(&format!("\\u{}  ", character as u32));
        }
    }
    result
}

/// RTF renderer.
#[derive(Debug, Default)]
pub struct Rtf {
    /// Section counters indexed by header level.
    levels: [usize; 7],
    /// Next citation number.
    book_index: usize,
    /// Citation key to assigned number.
    books: HashMap<String, usize>,
}

impl Rtf {
    /// Assign numbers to citation keys in order of first appearance.
    fn register_citations(&mut self, keys: &str) {
        for key in keys.split(", ") {
            if !self.books.contains_key(key) {
                self.book_index += 1;
                self.books.insert(key.to_string(), self.book_index);
            }
        }
    }
}

impl Renderer for Rtf {
    fn name(&self) -> &str {
        "rtf"
    }

    fn block_tags(&self) -> &[&str] {
        BLOCK_TAGS
    }

    fn escape(&self, text: &str) -> String {
        rtf_escape(text)
    }

    fn full_escape(&self, text: &str) -> String {
        rtf_escape(text)
    }

    fn init(&mut self) {
        self.levels = [0; 7];
        self.book_index = 0;
        self.books.clear();
    }

    fn prime_tag(
        &mut self,
        kind: &TagKind,
        args: &Arguments,
        scope: &mut Scope,
    ) -> Result<Option<String>, RenderError> {
        match kind {
            // Descend into the containers citations can live in.
            TagKind::Body | TagKind::Block => {
                Ok(Some(scope.parse_block(self, args.required(0)?)?))
            }
            TagKind::Paragraph | TagKind::Quote => {
                Ok(Some(scope.parse(self, args.required(0)?)?))
            }
            TagKind::Cite => {
                let keys = plain_text(args.required(0)?);
                self.register_citations(&keys);
                Ok(Some(String::new()))
            }
            _ => Ok(None),
        }
    }

    fn render_tag(
        &mut self,
        kind: &TagKind,
        args: &Arguments,
        scope: &mut Scope,
    ) -> Result<Option<String>, RenderError> {
        let output = match kind {
            TagKind::Body => {
                let content = scope.parse_block(self, args.required(0)?)?;
                format!("{}{{\\f3 {}}}\n}}", RTF_HEADER, content)
            }
            TagKind::Title => format!(
                "\\par\\pard \\qc\\b\\sb346\\sa173{{\\f2{{\\fs32 {}  \\fs20}}}}\\b0\n",
                scope.parse(self, args.required(0)?)?
            ),
            TagKind::Author | TagKind::Date => String::new(),
            TagKind::Ref => {
                let link = scope.clear(self, args.required(0)?);
                let text = match args.get(1) {
                    Some(parameter) => scope.parse(self, parameter)?,
                    None => link.clone(),
                };
                format!(
                    "{{\\field{{\\*\\fldinst{{HYPERLINK  \"{}\"}}}}{{\\fldrslt{{\\u1  {}\n}}}}}}",
                    link, text
                )
            }
            TagKind::Header(level) => self.header(usize::from(*level), args, scope)?,
            TagKind::Strong => format!("\n\\b {}\\b0\n", scope.parse(self, args.required(0)?)?),
            TagKind::Emphasis => format!("\\i {}\\i0\n", scope.parse(self, args.required(0)?)?),
            TagKind::Code => format!("{{\\f1 {}}}", scope.parse(self, args.required(0)?)?),
            TagKind::Deleted => format!(
                "\\strike {}\\strike0",
                scope.parse(self, args.required(0)?)?
            ),
            TagKind::Sub => format!(
                "\\sub {}\\nosupersub\n",
                scope.parse(self, args.required(0)?)?
            ),
            TagKind::Super => format!(
                "\\super {}\\nosupersub\n",
                scope.parse(self, args.required(0)?)?
            ),
            TagKind::List => {
                let mut result = String::new();
                for item in args.iter() {
                    result.push_str(&scope.parse(self, item)?);
                    result.push(' ');
                }
                result.push_str("\\par\\pard");
                result
            }
            TagKind::Table => scope.parse(self, args.required(0)?)?,
            TagKind::Image => scope.parse(self, args.required(0)?)?,
            TagKind::CodeBlock => {
                let (code, _) = code_arguments(self, args, scope)?;
                code
            }
            TagKind::Block => scope.parse_block(self, args.required(0)?)?,
            TagKind::Paragraph => format!(
                "\\par\\pard\\qj{}\n",
                scope.parse(self, args.required(0)?)?
            ),
            TagKind::Quote => scope.parse(self, args.required(0)?)?,
            TagKind::Break => "\\par\\pard".to_string(),
            TagKind::Cite => {
                let keys = plain_text(args.required(0)?);
                // Safety net for citations the priming pass never saw, e.g.
                // inside macro-expanded content.
                self.register_citations(&keys);
                let numbers: Vec<String> = keys
                    .split(", ")
                    .filter_map(|key| self.books.get(key))
                    .map(usize::to_string)
                    .collect();
                format!("[{}]", numbers.join(", "))
            }
            TagKind::Books => self.books(args, scope)?,
            _ => return Ok(None),
        };
        Ok(Some(output))
    }
}

impl Rtf {
    fn header(
        &mut self,
        level: usize,
        args: &Arguments,
        scope: &mut Scope,
    ) -> Result<String, RenderError> {
        let content = scope.parse(self, args.required(0)?)?;
        Ok(match level {
            1 => {
                self.levels[1] += 1;
                self.levels[2] = 0;
                self.levels[3] = 0;
                format!(
                    "\\i\\b\\sb346\\sa173{{\\f2\\fs22 {}. {}\\fs20}}\\b0\\i0\n",
                    self.levels[1], content
                )
            }
            2 => {
                self.levels[2] += 1;
                self.levels[3] = 0;
                format!(
                    "\\b\\par\\pard\\sb346\\sa173{{\\fs22 {}.{} {}\\fs20}}\\b0\n",
                    self.levels[1], self.levels[2], content
                )
            }
            3 => {
                self.levels[3] += 1;
                format!(
                    "\\b\\par\\pard\\sb346\\sa173{{\\fs20 {}.{}.{} {}\\fs20}}\\b0\n",
                    self.levels[1], self.levels[2], self.levels[3], content
                )
            }
            _ => format!("\\b\\sb346\\sa173{{\\fs20 {}\\fs20}}\\b0\n", content),
        })
    }

    /// Numbered bibliography from the table the priming pass collected.
    fn books(&mut self, args: &Arguments, scope: &mut Scope) -> Result<String, RenderError> {
        let mut result = String::new();
        for index in 1..=self.book_index {
            result.push_str(&format!("\\par\\pard\\li720\\fi-360[{}]\\tab ", index));
            for item in args.required(0)? {
                let Element::Group(entry) = item else { continue };
                let parts: Vec<&Vec<Element>> = entry
                    .iter()
                    .filter_map(|element| match element {
                        Element::Group(content) => Some(content),
                        _ => None,
                    })
                    .collect();
                if parts.len() < 2 {
                    continue;
                }
                if self.books.get(&plain_text(parts[0])) == Some(&index) {
                    result.push_str(&scope.parse(self, parts[1])?);
                }
            }
        }
        result.push_str("\\par\\pard");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::convert;

    fn check(source: &str, expected: &str) {
        let mut rtf = Rtf::default();
        assert_eq!(convert(&mut rtf, source, false).as_deref(), Ok(expected));
    }

    #[test]
    fn test_non_ascii_text_is_escaped() {
        check("АБВ", "\\u1040  \\u1041  \\u1042  ");
    }

    #[test]
    fn test_ascii_passes_through() {
        check("plain text", "plain text");
    }

    #[test]
    fn test_section_numbering() {
        check(
            "\\1 {A} {a}\\1 {B} {b}",
            "\\i\\b\\sb346\\sa173{\\f2\\fs22 1. A\\fs20}\\b0\\i0\n\
             \\i\\b\\sb346\\sa173{\\f2\\fs22 2. B\\fs20}\\b0\\i0\n",
        );
    }

    #[test]
    fn test_citations_are_numbered_in_document_order() {
        let mut rtf = Rtf::default();
        let result = convert(
            &mut rtf,
            "\\cite {crow} and \\cite {raven, crow}",
            false,
        )
        .expect("conversion failed");
        assert_eq!(result, "[1] and [2, 1]");
    }

    #[test]
    fn test_numbering_resets_between_conversions() {
        let mut rtf = Rtf::default();
        let first = convert(&mut rtf, "\\cite {crow}", false).expect("conversion failed");
        let second = convert(&mut rtf, "\\cite {raven}", false).expect("conversion failed");
        assert_eq!(first, "[1]");
        assert_eq!(second, "[1]");
    }
}
