//! Parser library for the Bracken markup format
//!
//! Bracken is a light markup language built around backslash-prefixed tags:
//!
//! ```text
//! \2 {Birds} {birds}
//!
//! The \e {hooded crow} is a \ref {https://example.org/eurasian} {Eurasian}
//! bird species.
//! ```
//!
//! A document is parsed exactly once into a format-independent element tree;
//! output formats are produced later by walking that tree (see the
//! `bracken-babel` crate). This crate owns everything up to and including the
//! tree:
//!
//! - [`syntax`] — the character-level constants, comment stripping, and
//!   whitespace normalization helpers,
//! - [`lexing`] — tokenization into a flat [`Lexeme`](lexing::Lexeme)
//!   sequence,
//! - [`parsing`] — the recursive IR builder producing [`Element`](ast::Element)
//!   sequences, plus post-parse transforms,
//! - [`outline`] — the header-derived outline tree used for tables of
//!   contents and numbering,
//! - [`serializer`] — the canonical writer turning an element sequence back
//!   into re-parseable Bracken source.

pub mod ast;
pub mod error;
pub mod lexing;
pub mod outline;
pub mod parsing;
pub mod serializer;
pub mod syntax;

pub use ast::{plain_text, Element, Tag};
pub use error::ParseError;
pub use lexing::{lex, Lexeme, LexemeKind};
pub use outline::{header_ids, Outline, OutlineNode};
pub use parsing::{build_elements, parse_document, shift_headers};
pub use serializer::serialize;
