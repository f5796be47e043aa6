//! C# language vocabulary registries.
//!
//! This module is the front door for language-level vocabulary: reserved keywords, punctuators and the
//! predefined (keyword-spelled) types, plus the conventions the scaffold generator follows.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata.
//!
//! ## Examples
//! ```rust
//! use stubgen_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("class"), Some(KeywordId::Class));
//! assert_eq!(keywords::as_str(KeywordId::Class), "class");
//! ```

pub mod conventions;
pub mod keywords;
pub mod punctuation;
pub mod types;
