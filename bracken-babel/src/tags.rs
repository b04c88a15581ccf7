//! The closed set of dispatch keys.
//!
//! Tag ids are strings in the tree but a closed enum at the dispatch seam:
//! every id is parsed once into a [`TagKind`] and renderers match on that,
//! with [`TagKind::Other`] as the documented fallback for ids no format
//! claims. Deprecated single-letter aliases (`\b`, `\i`, `\m`) fold into
//! their canonical kinds here, so no renderer has to know about them.

/// Dispatch key for one tag invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKind {
    /// `\1`..`\6`, with the level.
    Header(u8),
    /// `\body` — the whole-document wrapper.
    Body,
    /// `\title`, metadata.
    Title,
    /// `\author`, metadata.
    Author,
    /// `\date`, metadata.
    Date,
    /// `\ref {target} {text}?` — hyperlink.
    Ref,
    /// `\e` (alias `\i`) — emphasis.
    Emphasis,
    /// `\s` (alias `\b`) — strong emphasis.
    Strong,
    /// `\c` (alias `\m`) — inline code.
    Code,
    /// `\del` — deleted text.
    Deleted,
    /// `\sub` — subscript.
    Sub,
    /// `\super` — superscript.
    Super,
    /// `\list {item} ...` — bulleted list.
    List,
    /// `\table {{cell} ...} ...` — rows of cells.
    Table,
    /// `\image {source} {title}?`.
    Image,
    /// `\code {language}? {code}` — code block.
    CodeBlock,
    /// `\block` — explicit paragraph-processing container.
    Block,
    /// `\text` — one synthesized paragraph. Produced by the engine, rarely
    /// written by hand.
    Paragraph,
    /// `\quote` — block quote.
    Quote,
    /// `\br` — line break.
    Break,
    /// `\size {points} {text}` — font size.
    Size,
    /// `\formal` — formal argument marker, engine default available.
    Formal,
    /// `\nospell` — spell-check suppression, engine default available.
    Nospell,
    /// `\ignore` — drops markup, engine default available.
    Ignore,
    /// `\cite {keys}` — citation.
    Cite,
    /// `\books {{key} {entry} ...}` — bibliography.
    Books,
    /// `\math` — inline math, content passed through raw.
    Math,
    /// `\mathblock` — display math.
    MathBlock,
    /// `\item` — a single list item.
    Item,
    /// `\abstract` — article abstract.
    Abstract,
    /// `\ordered` — ordered list.
    Ordered,
    /// Any id not listed above.
    Other(String),
}

impl TagKind {
    /// Parse a tag id into its dispatch key.
    pub fn from_id(id: &str) -> TagKind {
        let mut characters = id.chars();
        if let (Some(digit @ '1'..='6'), None) = (characters.next(), characters.next()) {
            return TagKind::Header(digit as u8 - b'0');
        }
        match id {
            "body" => TagKind::Body,
            "title" => TagKind::Title,
            "author" => TagKind::Author,
            "date" => TagKind::Date,
            "ref" => TagKind::Ref,
            "e" | "i" => TagKind::Emphasis,
            "s" | "b" => TagKind::Strong,
            "c" | "m" => TagKind::Code,
            "del" => TagKind::Deleted,
            "sub" => TagKind::Sub,
            "super" => TagKind::Super,
            "list" => TagKind::List,
            "table" => TagKind::Table,
            "image" => TagKind::Image,
            "code" => TagKind::CodeBlock,
            "block" => TagKind::Block,
            "text" => TagKind::Paragraph,
            "quote" => TagKind::Quote,
            "br" => TagKind::Break,
            "size" => TagKind::Size,
            "formal" => TagKind::Formal,
            "nospell" => TagKind::Nospell,
            "ignore" => TagKind::Ignore,
            "cite" => TagKind::Cite,
            "books" => TagKind::Books,
            "math" => TagKind::Math,
            "mathblock" => TagKind::MathBlock,
            "item" => TagKind::Item,
            "abstract" => TagKind::Abstract,
            "ordered" => TagKind::Ordered,
            other => TagKind::Other(other.to_string()),
        }
    }

    /// Canonical tag name, as used in diagnostics. All header levels report
    /// as `header`; aliases report their canonical id.
    pub fn name(&self) -> &str {
        match self {
            TagKind::Header(_) => "header",
            TagKind::Body => "body",
            TagKind::Title => "title",
            TagKind::Author => "author",
            TagKind::Date => "date",
            TagKind::Ref => "ref",
            TagKind::Emphasis => "e",
            TagKind::Strong => "s",
            TagKind::Code => "c",
            TagKind::Deleted => "del",
            TagKind::Sub => "sub",
            TagKind::Super => "super",
            TagKind::List => "list",
            TagKind::Table => "table",
            TagKind::Image => "image",
            TagKind::CodeBlock => "code",
            TagKind::Block => "block",
            TagKind::Paragraph => "text",
            TagKind::Quote => "quote",
            TagKind::Break => "br",
            TagKind::Size => "size",
            TagKind::Formal => "formal",
            TagKind::Nospell => "nospell",
            TagKind::Ignore => "ignore",
            TagKind::Cite => "cite",
            TagKind::Books => "books",
            TagKind::Math => "math",
            TagKind::MathBlock => "mathblock",
            TagKind::Item => "item",
            TagKind::Abstract => "abstract",
            TagKind::Ordered => "ordered",
            TagKind::Other(id) => id,
        }
    }
}
