//! Markdown output.
//!
//! Targets CommonMark. Tags that CommonMark has no syntax for (deleted
//! text, subscript, superscript) fall back to inline HTML when `use_html`
//! is set and are passed through bare otherwise; `github_flavored` switches
//! deleted text to `~~` strikethrough.

use crate::engine::Scope;
use crate::error::RenderError;
use crate::formats::{code_arguments, row_cells, BLOCK_TAGS};
use crate::renderer::{Arguments, Renderer};
use crate::tags::TagKind;

/// Markdown renderer.
#[derive(Debug)]
pub struct Markdown {
    list_level: usize,
    use_html: bool,
    github_flavored: bool,
}

impl Default for Markdown {
    fn default() -> Markdown {
        Markdown::new(true, false)
    }
}

impl Markdown {
    pub fn new(use_html: bool, github_flavored: bool) -> Markdown {
        Markdown {
            list_level: 0,
            use_html,
            github_flavored,
        }
    }
}

impl Renderer for Markdown {
    fn name(&self) -> &str {
        "markdown"
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
                // Paragraph joints can stack blank lines; squash them.
                content.replace("\n\n\n", "\n\n").replace("\n\n\n", "\n\n")
            }
            // Metadata tags are ignored.
            TagKind::Title | TagKind::Author | TagKind::Date => String::new(),
            TagKind::Ref => {
                let link = scope.parse(self, args.required(0)?)?;
                let text = match args.get(1) {
                    Some(parameter) => scope.parse(self, parameter)?,
                    None => link.clone(),
                };
                format!("[{}]({})", text, link)
            }
            TagKind::Header(level) => {
                // ATX headers only go to level 6.
                let level = usize::from(*level).min(6);
                format!("{} {}", "#".repeat(level), scope.parse(self, args.required(0)?)?)
            }
            TagKind::Strong => format!("**{}**", scope.parse(self, args.required(0)?)?),
            TagKind::Emphasis => format!("*{}*", scope.parse(self, args.required(0)?)?),
            TagKind::Code => format!("`{}`", scope.parse(self, args.required(0)?)?),
            TagKind::Deleted => {
                let content = scope.parse(self, args.required(0)?)?;
                if self.github_flavored {
                    format!("~~{}~~", content)
                } else if self.use_html {
                    format!("<del>{}</del>", content)
                } else {
                    content
                }
            }
            TagKind::Sub => {
                let content = scope.parse(self, args.required(0)?)?;
                if self.use_html {
                    format!("<sub>{}</sub>", content)
                } else {
                    content
                }
            }
            TagKind::Super => {
                let content = scope.parse(self, args.required(0)?)?;
                if self.use_html {
                    format!("<sup>{}</sup>", content)
                } else {
                    content
                }
            }
            TagKind::List => {
                self.list_level += 1;
                let mut result = String::new();
                for item in args.iter() {
                    let rendered = scope.parse(self, item);
                    match rendered {
                        Ok(rendered) => {
                            result.push('\n');
                            result.push_str(&"  ".repeat(self.list_level));
                            result.push_str(&format!("* {}", rendered));
                        }
                        Err(error) => {
                            self.list_level -= 1;
                            return Err(error);
                        }
                    }
                }
                self.list_level -= 1;
                result
            }
            TagKind::Table => {
                let mut result = String::new();
                for (index, row) in args.iter().enumerate() {
                    result.push('|');
                    let mut cell_count = 0;
                    for cell in row_cells(row) {
                        result.push_str(&format!(" {} |", scope.parse(self, cell)?));
                        cell_count += 1;
                    }
                    result.push('\n');
                    if index == 0 {
                        result.push('|');
                        result.push_str(&"---|".repeat(cell_count));
                        result.push('\n');
                    }
                }
                result
            }
            TagKind::Image => {
                let source = scope.parse(self, args.required(0)?)?;
                let title = match args.get(1) {
                    Some(parameter) => scope.parse(self, parameter)?,
                    None => source.clone(),
                };
                format!("![{}]({})", title, source)
            }
            TagKind::CodeBlock => {
                let (code, language) = code_arguments(self, args, scope)?;
                format!("```{}\n{}\n```", language, code)
            }
            TagKind::Block => scope.parse_block(self, args.required(0)?)?,
            TagKind::Paragraph => format!("{}\n\n", scope.parse(self, args.required(0)?)?),
            TagKind::Quote => format!("> {}", scope.parse(self, args.required(0)?)?),
            _ => return Ok(None),
        };
        Ok(Some(output))
    }
}
