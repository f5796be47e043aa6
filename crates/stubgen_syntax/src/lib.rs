//! Syntax frontend for C# sources: lexer, tolerant parser, AST, diagnostics.
//!
//! The frontend only recognises what scaffold generation needs: `using` directives, namespaces, type
//! declarations and member signatures. Method bodies, initializers and attribute arguments are skipped as
//! balanced token runs and never modelled.
//!
//! ## Notes
//! - This crate is "syntax-only": no name resolution, no semantic checks, no cross-file lookup.
//! - Vocabulary identity (keywords/punctuation/predefined types) comes from `stubgen_core::lang` registries.
//! - Parsing is tolerant: malformed members are reported as diagnostics and skipped, and only an unterminated
//!   body (unexpected end of input) fails the whole parse.
//!
//! ## Examples
//! ```rust
//! use stubgen_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("namespace Acme { public class Foo { } }").unwrap();
//! let output = parser::parse(&tokens).unwrap();
//! assert_eq!(output.unit.members.len(), 1);
//! assert!(output.diagnostics.is_empty());
//! ```
//!
//! ## See also
//! - `stubgen_core::lang` for registry-backed language vocabulary.

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
