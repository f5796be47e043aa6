//! Token types for the C# lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Punctuation(PunctuationId)` for operators and punctuators
//!
//! ## Notes
//! - Contextual keywords (`partial`, `record`, `global`, ...) are emitted as `Ident`; the parser decides.
//! - Literal payloads keep their raw source text. Nothing downstream evaluates them.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::Span;
use stubgen_core::lang::keywords::{self, KeywordId};
use stubgen_core::lang::punctuation::PunctuationId;

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    /// Identifier without any `@` verbatim prefix.
    Ident(String),
    Number(String),
    /// Any string literal form (regular, verbatim, interpolated, raw), raw text including quotes.
    String(String),
    Char(String),

    // ========== Special ==========
    Eof,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
