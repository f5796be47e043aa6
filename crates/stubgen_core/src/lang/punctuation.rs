//! Operator and punctuator vocabulary.
//!
//! C# does not distinguish operators from punctuators lexically, so a single registry covers both. The lexer
//! performs longest-match lookup against [`PUNCTUATION`] (three, then two, then one character).
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `>` is only ever a single-character token: `>>`, `>=` and `>>=` are not registered so that nested
//!   generic argument lists (`List<List<int>>`) close one bracket per token.
//!
//! ## Examples
//! ```rust
//! use stubgen_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("=>"), Some(PunctuationId::FatArrow));
//! assert_eq!(punctuation::from_str(">>"), None);
//! assert_eq!(punctuation::as_str(PunctuationId::ColonColon), "::");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets, braces and parentheses.
    Delimiter,
    /// `,`, `;`, `:`.
    Separator,
    /// `.`, `::`, `?.`, `->`.
    Access,
    /// Everything else.
    Operator,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Delimiters
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,

    // Separators
    Semicolon,
    Comma,
    Colon,

    // Access
    Dot,
    ColonColon,
    QuestionDot,
    Arrow,
    DotDot,

    // Operators
    Question,
    QuestionQuestion,
    QuestionQuestionEq,
    Eq,
    EqEq,
    FatArrow,
    Bang,
    BangEq,
    Lt,
    LtEq,
    LtLt,
    LtLtEq,
    Gt,
    Plus,
    PlusPlus,
    PlusEq,
    Minus,
    MinusMinus,
    MinusEq,
    Star,
    StarEq,
    Slash,
    SlashEq,
    Percent,
    PercentEq,
    Amp,
    AmpAmp,
    AmpEq,
    Pipe,
    PipePipe,
    PipeEq,
    Caret,
    CaretEq,
    Tilde,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
}

use PunctuationCategory as C;

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    // Delimiters
    info(PunctuationId::LBrace, "{", C::Delimiter),
    info(PunctuationId::RBrace, "}", C::Delimiter),
    info(PunctuationId::LParen, "(", C::Delimiter),
    info(PunctuationId::RParen, ")", C::Delimiter),
    info(PunctuationId::LBracket, "[", C::Delimiter),
    info(PunctuationId::RBracket, "]", C::Delimiter),
    // Separators
    info(PunctuationId::Semicolon, ";", C::Separator),
    info(PunctuationId::Comma, ",", C::Separator),
    info(PunctuationId::Colon, ":", C::Separator),
    // Access
    info(PunctuationId::Dot, ".", C::Access),
    info(PunctuationId::ColonColon, "::", C::Access),
    info(PunctuationId::QuestionDot, "?.", C::Access),
    info(PunctuationId::Arrow, "->", C::Access),
    info(PunctuationId::DotDot, "..", C::Access),
    // Operators
    info(PunctuationId::Question, "?", C::Operator),
    info(PunctuationId::QuestionQuestion, "??", C::Operator),
    info(PunctuationId::QuestionQuestionEq, "??=", C::Operator),
    info(PunctuationId::Eq, "=", C::Operator),
    info(PunctuationId::EqEq, "==", C::Operator),
    info(PunctuationId::FatArrow, "=>", C::Operator),
    info(PunctuationId::Bang, "!", C::Operator),
    info(PunctuationId::BangEq, "!=", C::Operator),
    info(PunctuationId::Lt, "<", C::Operator),
    info(PunctuationId::LtEq, "<=", C::Operator),
    info(PunctuationId::LtLt, "<<", C::Operator),
    info(PunctuationId::LtLtEq, "<<=", C::Operator),
    info(PunctuationId::Gt, ">", C::Operator),
    info(PunctuationId::Plus, "+", C::Operator),
    info(PunctuationId::PlusPlus, "++", C::Operator),
    info(PunctuationId::PlusEq, "+=", C::Operator),
    info(PunctuationId::Minus, "-", C::Operator),
    info(PunctuationId::MinusMinus, "--", C::Operator),
    info(PunctuationId::MinusEq, "-=", C::Operator),
    info(PunctuationId::Star, "*", C::Operator),
    info(PunctuationId::StarEq, "*=", C::Operator),
    info(PunctuationId::Slash, "/", C::Operator),
    info(PunctuationId::SlashEq, "/=", C::Operator),
    info(PunctuationId::Percent, "%", C::Operator),
    info(PunctuationId::PercentEq, "%=", C::Operator),
    info(PunctuationId::Amp, "&", C::Operator),
    info(PunctuationId::AmpAmp, "&&", C::Operator),
    info(PunctuationId::AmpEq, "&=", C::Operator),
    info(PunctuationId::Pipe, "|", C::Operator),
    info(PunctuationId::PipePipe, "||", C::Operator),
    info(PunctuationId::PipeEq, "|=", C::Operator),
    info(PunctuationId::Caret, "^", C::Operator),
    info(PunctuationId::CaretEq, "^=", C::Operator),
    info(PunctuationId::Tilde, "~", C::Operator),
];

/// Longest spelling in the registry.
pub const MAX_SPELLING_LEN: usize = 3;

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a punctuation spelling to its identifier.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo { id, canonical, category }
}
