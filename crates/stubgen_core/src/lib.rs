//! Shared, pure vocabulary for the stubgen scaffold generator.
//!
//! This crate is intentionally small and dependency-free. It holds the C# reserved-word, punctuation and
//! predefined-type registries used by the syntax frontend, plus the naming conventions and fixed strings the
//! scaffold generator emits.
//!
//! ## Notes
//!
//! - No IO, no global mutable state, no AST types.
//! - Callers work with stable IDs (`KeywordId`, `PunctuationId`, `PredefinedTypeId`) and look up spellings via
//!   the registry tables instead of matching on strings.

pub mod lang;
