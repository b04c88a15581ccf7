//! Plain text output.
//!
//! No escaping, no inline decoration: emphasis and friends pass their
//! content through. Structure survives as indentation, bullets, and ruled
//! tables.

use crate::engine::Scope;
use crate::error::RenderError;
use crate::formats::{code_arguments, row_cells, BLOCK_TAGS};
use crate::renderer::{Arguments, Renderer};
use crate::tags::TagKind;

/// Plain-text renderer.
#[derive(Debug, Default)]
pub struct PlainText;

impl Renderer for PlainText {
    fn name(&self) -> &str {
        "text"
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
            TagKind::Body => format!("{}\n", scope.parse_block(self, args.required(0)?)?),
            // Metadata tags are ignored.
            TagKind::Title | TagKind::Author | TagKind::Date => String::new(),
            TagKind::Ref => {
                let link = scope.clear(self, args.required(0)?);
                let text = match args.get(1) {
                    Some(parameter) => scope.parse(self, parameter)?,
                    None => link.clone(),
                };
                format!("{} ({})", text, link)
            }
            TagKind::Header(level) => format!(
                "{}{}",
                "  ".repeat(usize::from(*level) - 1),
                scope.parse(self, args.required(0)?)?
            ),
            TagKind::Emphasis
            | TagKind::Strong
            | TagKind::Code
            | TagKind::Deleted
            | TagKind::Sub
            | TagKind::Super
            | TagKind::Quote => scope.parse(self, args.required(0)?)?,
            TagKind::List => {
                let mut result = String::new();
                for item in args.iter() {
                    result.push_str("  * ");
                    result.push_str(&scope.parse_block(self, item)?);
                }
                result
            }
            TagKind::Table => self.table(args, scope)?,
            TagKind::Image => match args.get(1) {
                Some(parameter) => format!("[{}]", scope.parse(self, parameter)?),
                None => "[]".to_string(),
            },
            TagKind::CodeBlock => {
                let (code, _) = code_arguments(self, args, scope)?;
                format!("{}\n", code)
            }
            TagKind::Block => scope.parse_block(self, args.required(0)?)?,
            TagKind::Paragraph => format!("{}\n", scope.parse(self, args.required(0)?)?),
            TagKind::Break => "\n".to_string(),
            _ => return Ok(None),
        };
        Ok(Some(output))
    }
}

impl PlainText {
    /// Ruled table with per-column widths.
    fn table(&mut self, args: &Arguments, scope: &mut Scope) -> Result<String, RenderError> {
        let mut widths: Vec<usize> = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();
        for row in args.iter() {
            let mut cells: Vec<String> = Vec::new();
            for cell in row_cells(row) {
                cells.push(scope.parse(self, cell)?);
            }
            for (index, cell) in cells.iter().enumerate() {
                let width = cell.chars().count();
                if index < widths.len() {
                    widths[index] = widths[index].max(width);
                } else {
                    widths.push(width);
                }
            }
            rows.push(cells);
        }

        let ruler: String = format!(
            "+{}+",
            widths
                .iter()
                .map(|width| "-".repeat(width + 2))
                .collect::<Vec<String>>()
                .join("+")
        );

        let mut result = format!("{}\n", ruler);
        for cells in rows {
            result.push('|');
            for (index, cell) in cells.iter().enumerate() {
                let padding = " ".repeat(widths[index] - cell.chars().count());
                result.push_str(&format!(" {}{} |", cell, padding));
            }
            result.push('\n');
        }
        result.push_str(&format!("{}\n", ruler));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::convert;

    fn check(source: &str, expected: &str) {
        let mut text = PlainText;
        assert_eq!(convert(&mut text, source, false).as_deref(), Ok(expected));
    }

    #[test]
    fn test_inline_decoration_is_dropped() {
        check("\\s {bold} and \\e {italic}", "bold and italic");
    }

    #[test]
    fn test_header_indentation() {
        check("\\3 {Deep} {d}", "    Deep");
    }

    #[test]
    fn test_ref() {
        check("\\ref {https://example.org} {site}", "site (https://example.org)");
    }

    #[test]
    fn test_table() {
        check(
            "\\table {{aa} {b}} {{c} {dddd}}",
            "+----+------+\n| aa | b    |\n| c  | dddd |\n+----+------+\n",
        );
    }
}
