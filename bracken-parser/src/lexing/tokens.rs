//! Raw token definitions for the Bracken lexer.
//!
//! The raw token set is deliberately dumb: it knows the special characters
//! and nothing about tag names. The tag-name state machine runs in a second
//! pass over these tokens (see [`super::lex`]), which keeps the logos lexer
//! completely vanilla.

use logos::Logos;

/// Raw tokens produced by the first tokenization stage.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum RawToken {
    /// A tag marker followed by a non-alphanumeric character: the escape
    /// mechanism. `\\`, `\{` and `\}` all produce literal characters.
    #[regex(r"\\[^A-Za-z0-9]", priority = 3)]
    Escape,

    /// A bare tag marker. Only matches when the next character is
    /// alphanumeric (otherwise [`RawToken::Escape`] wins) or at end of input.
    #[token("\\", priority = 2)]
    Marker,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    /// A run of space characters. Preserved raw; collapsing happens at
    /// render time.
    #[regex(r"[ \t\n\r]+")]
    Whitespace,

    /// A run of ordinary characters.
    #[regex(r"[^ \t\n\r{}\\]+")]
    Word,
}
