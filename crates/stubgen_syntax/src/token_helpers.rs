//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make it easy
//! to work with ID-based tokens.

use crate::lexer::{Token, TokenKind};
use stubgen_core::lang::keywords::{self, ContextualKeywordId, KeywordId};
use stubgen_core::lang::punctuation::PunctuationId;

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return the identifier text, if this is an identifier token.
    pub fn ident(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Return the contextual keyword this identifier spells, if any.
    pub fn contextual_id(&self) -> Option<ContextualKeywordId> {
        self.ident().and_then(keywords::contextual_from_str)
    }

    /// Return `true` if this identifier spells the given contextual keyword.
    pub fn is_contextual(&self, id: ContextualKeywordId) -> bool {
        self.contextual_id() == Some(id)
    }

    /// Return `true` for identifiers and reserved keywords alike.
    pub fn is_word(&self) -> bool {
        matches!(self, TokenKind::Ident(_) | TokenKind::Keyword(_))
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.keyword_id()`.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        self.kind.keyword_id()
    }

    /// Convenience wrapper for `self.kind.punctuation_id()`.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }
}
