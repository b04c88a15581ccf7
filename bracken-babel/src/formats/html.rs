//! HTML output.

use crate::engine::Scope;
use crate::error::RenderError;
use crate::formats::{code_arguments, row_cells, BLOCK_TAGS};
use crate::renderer::{Arguments, Renderer};
use crate::tags::TagKind;

const BODY_BEGIN: &str = "\
<html>
    <head>
        <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\">
        <link rel=\"stylesheet\" href=\"style.css\">
    </head>
    <body>
";

const BODY_END: &str = "\
    </body>
</html>
";

/// The ampersand substitution comes first so later substitutions are not
/// themselves re-escaped.
const ESCAPE_TABLE: &[(&str, &str)] = &[("&", "&amp;"), ("<", "&lt;"), (">", "&gt;")];

/// HTML renderer.
#[derive(Debug, Default)]
pub struct Html;

impl Renderer for Html {
    fn name(&self) -> &str {
        "html"
    }

    fn escape_table(&self) -> &[(&str, &str)] {
        ESCAPE_TABLE
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
                format!("{}{}{}", BODY_BEGIN, content, BODY_END)
            }
            TagKind::Title => {
                format!("<title>{}</title>", scope.parse(self, args.required(0)?)?)
            }
            TagKind::Author => format!(
                "<meta name=\"author\" content=\"{}\">",
                scope.parse(self, args.required(0)?)?
            ),
            TagKind::Date => format!(
                "<meta name=\"date\" content=\"{}\">",
                scope.parse(self, args.required(0)?)?
            ),
            TagKind::Ref => {
                let link = scope.parse(self, args.required(0)?)?;
                let text = match args.get(1) {
                    Some(parameter) => scope.parse(self, parameter)?,
                    None => link.clone(),
                };
                format!("<a href=\"{}\">{}</a>", link, text)
            }
            TagKind::Header(level) => {
                let anchor = match args.get(1) {
                    Some(parameter) => format!(" id=\"{}\"", scope.clear(self, parameter)),
                    None => String::new(),
                };
                let content = scope.parse(self, args.required(0)?)?;
                format!("<h{}{}>{}</h{}>", level, anchor, content, level)
            }
            TagKind::Strong => format!("<b>{}</b>", scope.parse(self, args.required(0)?)?),
            TagKind::Emphasis => format!("<i>{}</i>", scope.parse(self, args.required(0)?)?),
            TagKind::Code => format!("<code>{}</code>", scope.parse(self, args.required(0)?)?),
            TagKind::Deleted => format!("<del>{}</del>", scope.parse(self, args.required(0)?)?),
            TagKind::Sub => format!("<sub>{}</sub>", scope.parse(self, args.required(0)?)?),
            TagKind::Super => format!("<sup>{}</sup>", scope.parse(self, args.required(0)?)?),
            TagKind::List => {
                let mut items = String::new();
                for item in args.iter() {
                    items.push_str(&format!("<li>{}</li>", scope.parse(self, item)?));
                }
                format!("<ul>{}</ul>", items)
            }
            TagKind::Table => {
                let mut rows = String::new();
                for row in args.iter() {
                    let mut cells = String::new();
                    for cell in row_cells(row) {
                        cells.push_str(&format!(
                            "<td>{}</td>",
                            scope.parse_block(self, cell)?
                        ));
                    }
                    rows.push_str(&format!("<tr>{}</tr>", cells));
                }
                format!("<table>{}</table>", rows)
            }
            TagKind::Image => {
                let title = match args.get(1) {
                    Some(parameter) => format!(" alt=\"{}\"", scope.parse(self, parameter)?),
                    None => String::new(),
                };
                format!(
                    "<img src=\"{}\"{} />",
                    scope.clear(self, args.required(0)?),
                    title
                )
            }
            TagKind::CodeBlock => {
                let (code, _) = code_arguments(self, args, scope)?;
                format!("<pre><tt>{}</tt></pre>", code)
            }
            TagKind::Block => scope.parse_block(self, args.required(0)?)?,
            TagKind::Paragraph => format!("<p>{}</p>", scope.parse(self, args.required(0)?)?),
            TagKind::Quote => format!(
                "<blockquote>{}</blockquote>",
                scope.parse(self, args.required(0)?)?
            ),
            TagKind::Break => "<br />".to_string(),
            TagKind::Size => format!(
                "<span style=\"font-size: {}\">{}</span>",
                scope.clear(self, args.required(0)?),
                scope.parse(self, args.required(1)?)?
            ),
            TagKind::Formal => format!("&lt;{}&gt;", scope.parse(self, args.required(0)?)?),
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
        let mut html = Html;
        assert_eq!(convert(&mut html, source, false).as_deref(), Ok(expected));
    }

    #[test]
    fn test_inline_tags() {
        check("\\s {bold}", "<b>bold</b>");
        check("\\e {italic}", "<i>italic</i>");
        check("\\c {code}", "<code>code</code>");
        check("\\del {gone}", "<del>gone</del>");
        check("\\sub {x}\\super {y}", "<sub>x</sub><sup>y</sup>");
    }

    #[test]
    fn test_header_with_anchor() {
        check("\\2 {Birds} {birds}", "<h2 id=\"birds\">Birds</h2>");
        check("\\3 {Plain}", "<h3>Plain</h3>");
    }

    #[test]
    fn test_ref_falls_back_to_link() {
        check(
            "\\ref {https://example.org} {site}",
            "<a href=\"https://example.org\">site</a>",
        );
        check(
            "\\ref {https://example.org}",
            "<a href=\"https://example.org\">https://example.org</a>",
        );
    }

    #[test]
    fn test_list() {
        check("\\list {one} {two}", "<ul><li>one</li><li>two</li></ul>");
    }

    #[test]
    fn test_image() {
        check("\\image {crow.png} {A crow}", "<img src=\"crow.png\" alt=\"A crow\" />");
        check("\\image {crow.png}", "<img src=\"crow.png\" />");
    }
}
