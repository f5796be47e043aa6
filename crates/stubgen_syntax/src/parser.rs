//! Tolerant parser for the C# declaration surface
//!
//! Converts a token stream into a [`CompilationUnit`]: `using` directives, namespaces, type declarations and
//! member signatures. Bodies, initializers and attribute arguments are skipped as balanced token runs.
//!
//! ## Examples
//!
//! ```rust
//! use stubgen_syntax::{ast::NamespaceMember, lexer, parser};
//!
//! let source = "namespace Shop { public class Cart { public void Add(int qty) { } } }";
//! let tokens = lexer::lex(source).unwrap();
//! let output = parser::parse(&tokens).unwrap();
//! assert!(matches!(output.unit.members[0].node, NamespaceMember::Namespace(_)));
//! ```

use crate::ast::*;
use crate::diagnostics::{SyntaxError, SyntaxErrorKind};
use crate::lexer::{Token, TokenKind};
use stubgen_core::lang::keywords::{self, ContextualKeywordId, KeywordId};
use stubgen_core::lang::punctuation::{self, PunctuationId};
use stubgen_core::lang::types;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/members.rs");
include!("parser/types.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
