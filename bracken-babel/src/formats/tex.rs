//! TeX output.
//!
//! The only built-in format with required capabilities it deliberately does
//! not provide: deleted text, font size, and block quotes raise
//! [`RenderError::TagNotImplemented`] when a document actually uses them.

use bracken_parser::{plain_text, Element};

use crate::engine::Scope;
use crate::error::RenderError;
use crate::formats::{code_arguments, row_cells, BLOCK_TAGS};
use crate::renderer::{Arguments, Renderer};
use crate::tags::TagKind;

const BODY_BEGIN: &str = "\
\\documentclass[twoside,psfig]{article}
\\usepackage[utf8]{inputenc}
\\usepackage[russian]{babel}
\\usepackage{enumitem}
\\usepackage{float}
\\usepackage[margin=3cm,hmarginratio=1:1,top=32mm,columnsep=20pt]{geometry}
\\usepackage{graphicx}
\\usepackage{hyperref}
\\usepackage{multicol}
\\begin{document}
";

const ESCAPE_TABLE: &[(&str, &str)] = &[("_", "\\_")];

/// Sectioning commands by header level.
const HEADERS: &[&str] = &[
    "section",
    "subsection",
    "subsubsection",
    "paragraph",
    "subparagraph",
];

/// TeX renderer.
#[derive(Debug, Default)]
pub struct Tex;

impl Renderer for Tex {
    fn name(&self) -> &str {
        "tex"
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
                format!("{}{}\\end{{document}}", BODY_BEGIN, content)
            }
            TagKind::Title => format!(
                "\\title{{{}}}\n\\maketitle",
                scope.parse(self, args.required(0)?)?
            ),
            TagKind::Author => format!("\\author{{{}}}", scope.parse(self, args.required(0)?)?),
            TagKind::Date => format!("\\date{{{}}}", scope.parse(self, args.required(0)?)?),
            TagKind::Ref => {
                let link = scope.clear(self, args.required(0)?);
                let link = link.strip_prefix('#').unwrap_or(&link);
                let text = match args.get(1) {
                    Some(parameter) => scope.parse(self, parameter)?,
                    None => link.to_string(),
                };
                format!("\\href{{{}}}{{{}}}", link, text)
            }
            TagKind::Header(level) => {
                let content = scope.parse(self, args.required(0)?)?;
                match HEADERS.get(usize::from(*level) - 1) {
                    Some(command) => format!("\\{}{{{}}}", command, content),
                    None => content,
                }
            }
            TagKind::Strong => format!("{{\\bf {}}}", scope.parse(self, args.required(0)?)?),
            TagKind::Emphasis => format!("{{\\em {}}}", scope.parse(self, args.required(0)?)?),
            TagKind::Code => format!("{{\\tt {}}}", scope.parse(self, args.required(0)?)?),
            TagKind::Sub => format!("${{{}}}$", scope.parse(self, args.required(0)?)?),
            TagKind::Super => format!(
                "\\textsuperscript{{{}}}",
                scope.parse(self, args.required(0)?)?
            ),
            TagKind::List => {
                let mut result = String::from("\\begin{itemize}\n");
                for item in args.iter() {
                    result.push_str(&format!("\\item {}\n\n", scope.parse(self, item)?));
                }
                result.push_str("\\end{itemize}\n");
                result
            }
            TagKind::Table => self.table(args, scope)?,
            TagKind::Image => {
                let mut result = format!(
                    "\\begin{{figure}}[h]\\begin{{center}}\\includegraphics{{{}}}\\end{{center}}",
                    scope.parse(self, args.required(0)?)?
                );
                if let Some(parameter) = args.get(1) {
                    result.push_str(&format!("\\caption{{{}}}", scope.parse(self, parameter)?));
                }
                result.push_str("\\end{figure}");
                result
            }
            TagKind::CodeBlock => {
                let (code, _) = code_arguments(self, args, scope)?;
                format!("\\begin{{verbatim}}{}\\end{{verbatim}}", code)
            }
            TagKind::Block => scope.parse_block(self, args.required(0)?)?,
            TagKind::Paragraph => format!("{}\n\n", scope.parse(self, args.required(0)?)?),
            TagKind::Break => "\\\\".to_string(),
            TagKind::Cite => format!("\\cite{{{}}}", scope.clear(self, args.required(0)?)),
            // Math content is raw TeX already; escaping would mangle it.
            TagKind::Math => format!("${}$", plain_text(args.required(0)?)),
            TagKind::MathBlock => format!("\\[{}\\]", plain_text(args.required(0)?)),
            TagKind::Item => format!("\\item{{{}}}", scope.parse(self, args.required(0)?)?),
            TagKind::Abstract => format!(
                "\\begin{{abstract}}\n\n{}\\end{{abstract}}\n\n",
                scope.parse_block(self, args.required(0)?)?
            ),
            TagKind::Ordered => {
                let mut result = String::from("\\begin{ordered}\n");
                for item in args.required(0)? {
                    if let Element::Group(content) = item {
                        result.push_str(&format!("\\item {}\n\n", scope.parse(self, content)?));
                    }
                }
                result.push_str("\\end{ordered}\n");
                result
            }
            TagKind::Books => self.books(args, scope)?,
            TagKind::Deleted | TagKind::Size | TagKind::Quote => {
                return Err(RenderError::TagNotImplemented {
                    tag: kind.name().to_string(),
                })
            }
            _ => return Ok(None),
        };
        Ok(Some(output))
    }
}

impl Tex {
    fn table(&mut self, args: &Arguments, scope: &mut Scope) -> Result<String, RenderError> {
        let mut result = String::from("\\begin{table}[h]\n\\begin{center}\n\\begin{tabular}");

        let mut max_columns = 0;
        for row in args.iter() {
            max_columns = max_columns.max(row_cells(row).count());
        }
        result.push_str(&format!("{{|{}}}\n\\hline\n", "l|".repeat(max_columns)));

        for row in args.iter() {
            let mut cells: Vec<String> = Vec::new();
            for cell in row_cells(row) {
                cells.push(scope.parse(self, cell)?);
            }
            result.push_str(&cells.join(" & "));
            result.push_str(" \\\\\n\\hline\n");
        }

        result.push_str("\\end{tabular}\n\\end{center}\n\\end{table}\n");
        Ok(result)
    }

    /// Bibliography: the first parameter holds `{{key} {entry}}` groups.
    fn books(&mut self, args: &Arguments, scope: &mut Scope) -> Result<String, RenderError> {
        let mut result = String::from("\\begin{thebibliography}{0}\n\n");
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
            result.push_str(&format!(
                "\\bibitem{{{}}} {}\n\n",
                scope.clear(self, parts[0]),
                scope.parse(self, parts[1])?
            ));
        }
        result.push_str("\\end{thebibliography}\n\n");
        Ok(result)
    }
}
