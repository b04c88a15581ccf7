//! MediaWiki output.

use crate::engine::Scope;
use crate::error::RenderError;
use crate::formats::{code_arguments, row_cells, BLOCK_TAGS};
use crate::renderer::{Arguments, Renderer};
use crate::tags::TagKind;

/// Wiki markup renderer.
#[derive(Debug, Default)]
pub struct Wiki;

impl Renderer for Wiki {
    fn name(&self) -> &str {
        "wiki"
    }

    fn block_tags(&self) -> &[&str] {
        BLOCK_TAGS
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
                content.replace("\n\n\n", "\n\n").replace("\n\n\n", "\n\n")
            }
            // Metadata tags are ignored.
            TagKind::Title | TagKind::Author | TagKind::Date => String::new(),
            TagKind::Ref => {
                let link = scope.clear(self, args.required(0)?);
                let text = match args.get(1) {
                    Some(parameter) => scope.parse(self, parameter)?,
                    None => link.clone(),
                };
                format!("[[{}|{}]]", link, text)
            }
            TagKind::Header(level) => {
                let marks = "=".repeat(usize::from(*level));
                format!("{} {} {}", marks, scope.parse(self, args.required(0)?)?, marks)
            }
            TagKind::Strong => format!("'''{}'''", scope.parse(self, args.required(0)?)?),
            TagKind::Emphasis => format!("''{}''", scope.parse(self, args.required(0)?)?),
            TagKind::Code => format!("`{}`", scope.parse(self, args.required(0)?)?),
            TagKind::Deleted => format!("~~{}~~", scope.parse(self, args.required(0)?)?),
            TagKind::Sub => format!("<sub>{}</sub>", scope.parse(self, args.required(0)?)?),
            TagKind::Super => format!("<sup>{}</sup>", scope.parse(self, args.required(0)?)?),
            TagKind::List => {
                let mut result = String::new();
                for item in args.iter() {
                    result.push_str(&format!("* {}\n", scope.parse(self, item)?));
                }
                result
            }
            TagKind::Table => {
                let mut result = String::from(
                    "{| class=\"wikitable\" border=\"1\" cellspacing=\"0\" cellpadding=\"2\"\n",
                );
                for row in args.iter() {
                    result.push_str("|-\n");
                    for cell in row_cells(row) {
                        result.push_str(&format!("| {}\n", scope.parse(self, cell)?));
                    }
                }
                result.push_str("|}\n");
                result
            }
            TagKind::Image => {
                let source = scope.parse(self, args.required(0)?)?;
                match args.get(1) {
                    Some(parameter) => format!(
                        "[[File:{}|thumb|{}]]",
                        source,
                        scope.parse(self, parameter)?
                    ),
                    None => format!("[[File:{}|thumb]]", source),
                }
            }
            TagKind::CodeBlock => {
                let (code, language) = code_arguments(self, args, scope)?;
                if language.is_empty() {
                    format!("<pre><tt>{}\n</tt></pre>", code)
                } else {
                    format!(
                        "<syntaxhighlight lang=\"{}\">\n{}\n</syntaxhighlight>",
                        language, code
                    )
                }
            }
            TagKind::Block => scope.parse_block(self, args.required(0)?)?,
            TagKind::Paragraph => format!("{}\n\n", scope.parse(self, args.required(0)?)?),
            TagKind::Quote => format!(">{}", scope.parse(self, args.required(0)?)?),
            _ => return Ok(None),
        };
        Ok(Some(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::convert;

    fn check(source: &str, expected: &str) {
        let mut wiki = Wiki;
        assert_eq!(convert(&mut wiki, source, false).as_deref(), Ok(expected));
    }

    #[test]
    fn test_header() {
        check("\\2 {Birds} {birds}", "== Birds ==");
    }

    #[test]
    fn test_emphasis() {
        check("\\s {strong} \\e {emphasis}", "'''strong''' ''emphasis''");
    }

    #[test]
    fn test_ref() {
        check("\\ref {Crow} {hooded crow}", "[[Crow|hooded crow]]");
    }

    #[test]
    fn test_code_block_with_language() {
        check(
            "\\code {python} {print(1)}",
            "<syntaxhighlight lang=\"python\">\nprint(1)\n</syntaxhighlight>",
        );
    }
}
