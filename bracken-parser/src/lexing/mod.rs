//! Lexer
//!
//! Tokenization runs in two stages, mirroring the rest of the pipeline's
//! transformation style:
//!
//! 1. Base tokenization with a vanilla logos lexer over the six raw token
//!    classes (escape, marker, braces, whitespace, word). See
//!    [`tokens::RawToken`].
//! 2. An assembly pass that applies the tag-name state machine and produces
//!    the [`Lexeme`] sequence the parser consumes: text runs, tag names,
//!    escaped symbols, and parameter delimiters, each with its byte offset.
//!
//! The assembly pass owns the two pieces of lexer state: whether a tag name
//! is currently accumulating, and the pending plain-text word. Words are
//! flushed as `Text` lexemes by the events that end them (a marker, a
//! closing brace, end of input); an opening brace *discards* the pending
//! word instead, which is what normalizes the whitespace between a tag name
//! and its parameter list.
//!
//! A tag marker as the very last character of the input has nothing to
//! escape; it is reported as a warning and skipped, and lexing continues
//! best-effort.

pub mod tokens;

use logos::Logos;
use serde::Serialize;

pub use tokens::RawToken;

/// One classified token with the byte offset it was produced at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lexeme {
    pub kind: LexemeKind,
    pub position: usize,
}

/// The lexeme classes consumed by the parser.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum LexemeKind {
    /// A run of plain text, whitespace included.
    Text(String),
    /// A tag name, without the marker.
    TagName(String),
    /// A single escaped character.
    Symbol(char),
    /// `{`
    ParamBegin,
    /// `}`
    ParamEnd,
}

impl Lexeme {
    fn new(kind: LexemeKind, position: usize) -> Lexeme {
        Lexeme { kind, position }
    }
}

/// Tokenize preprocessed source text into a lexeme sequence.
///
/// The input must already have comments stripped (see
/// [`crate::syntax::strip_comments`]); the lexer itself knows nothing about
/// comments. The scan is a single left-to-right pass with no backtracking.
pub fn lex(text: &str) -> Vec<Lexeme> {
    let mut lexemes: Vec<Lexeme> = Vec::new();
    let mut word = String::new();
    let mut tag_name = String::new();
    let mut in_tag = false;

    let flush_word = |lexemes: &mut Vec<Lexeme>, word: &mut String, position: usize| {
        if !word.is_empty() {
            lexemes.push(Lexeme::new(LexemeKind::Text(std::mem::take(word)), position));
        }
    };

    for (token, span) in RawToken::lexer(text).spanned() {
        let Ok(token) = token else { continue };
        let slice = &text[span.clone()];
        match token {
            RawToken::Escape => {
                flush_word(&mut lexemes, &mut word, span.start);
                if let Some(symbol) = slice.chars().nth(1) {
                    lexemes.push(Lexeme::new(LexemeKind::Symbol(symbol), span.start + 1));
                }
            }
            RawToken::Marker => {
                if span.end == text.len() {
                    tracing::warn!("tag marker at the end of input has nothing to escape");
                    continue;
                }
                flush_word(&mut lexemes, &mut word, span.start);
                in_tag = true;
                tag_name.clear();
            }
            RawToken::OpenBrace => {
                in_tag = false;
                if !tag_name.is_empty() {
                    lexemes.push(Lexeme::new(
                        LexemeKind::TagName(std::mem::take(&mut tag_name)),
                        span.start,
                    ));
                }
                lexemes.push(Lexeme::new(LexemeKind::ParamBegin, span.start));
                // Whitespace between the tag name and its parameter list is
                // dropped, not emitted as text.
                word.clear();
            }
            RawToken::CloseBrace => {
                flush_word(&mut lexemes, &mut word, span.start);
                lexemes.push(Lexeme::new(LexemeKind::ParamEnd, span.start));
            }
            RawToken::Whitespace => {
                if in_tag {
                    // The name is complete; the space itself is dropped.
                    in_tag = false;
                } else {
                    word.push_str(slice);
                }
            }
            RawToken::Word => {
                if in_tag {
                    tag_name.push_str(slice);
                } else {
                    word.push_str(slice);
                }
            }
        }
    }
    flush_word(&mut lexemes, &mut word, text.len());

    lexemes
}
