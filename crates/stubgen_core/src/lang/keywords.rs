//! Define the reserved and contextual keyword vocabulary of C#.
//!
//! This module is the single source of truth for keywords: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) recording canonical spellings and categories. Contextual keywords (`partial`,
//! `record`, `async`, ...) are only keywords in certain positions; the lexer emits them as identifiers and the
//! parser consults [`contextual_from_str`].
//!
//! ## Notes
//! - Lookup is **case-sensitive** (C# keywords are lower-case).
//! - Categories are metadata only; they do not enforce parsing context.
//!
//! ## Examples
//! ```rust
//! use stubgen_core::lang::keywords::{self, ContextualKeywordId, KeywordId};
//!
//! assert_eq!(keywords::from_str("public"), Some(KeywordId::Public));
//! assert_eq!(keywords::from_str("Public"), None);
//! assert!(keywords::is_modifier(KeywordId::Static));
//! assert_eq!(keywords::contextual_from_str("partial"), Some(ContextualKeywordId::Partial));
//! ```

/// Stable identifier for every reserved C# keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    Abstract,
    As,
    Base,
    Bool,
    Break,
    Byte,
    Case,
    Catch,
    Char,
    Checked,
    Class,
    Const,
    Continue,
    Decimal,
    Default,
    Delegate,
    Do,
    Double,
    Else,
    Enum,
    Event,
    Explicit,
    Extern,
    False,
    Finally,
    Fixed,
    Float,
    For,
    Foreach,
    Goto,
    If,
    Implicit,
    In,
    Int,
    Interface,
    Internal,
    Is,
    Lock,
    Long,
    Namespace,
    New,
    Null,
    Object,
    Operator,
    Out,
    Override,
    Params,
    Private,
    Protected,
    Public,
    Readonly,
    Ref,
    Return,
    SByte,
    Sealed,
    Short,
    Sizeof,
    Stackalloc,
    Static,
    String,
    Struct,
    Switch,
    This,
    Throw,
    True,
    Try,
    Typeof,
    UInt,
    ULong,
    Unchecked,
    Unsafe,
    UShort,
    Using,
    Virtual,
    Void,
    Volatile,
    While,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// Keyword-spelled builtin types (`int`, `string`, ...).
    PredefinedType,
    /// Accessibility and member modifiers.
    Modifier,
    /// Keywords that introduce declarations.
    Declaration,
    /// Parameter passing modifiers (`ref`, `out`, ...).
    Parameter,
    /// Statement keywords.
    Statement,
    /// Expression keywords and operators.
    Expression,
    /// `true`, `false`, `null`.
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

use KeywordCategory as C;

/// Registry of all reserved keywords, in alphabetical order.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(KeywordId::Abstract, "abstract", C::Modifier),
    info(KeywordId::As, "as", C::Expression),
    info(KeywordId::Base, "base", C::Expression),
    info(KeywordId::Bool, "bool", C::PredefinedType),
    info(KeywordId::Break, "break", C::Statement),
    info(KeywordId::Byte, "byte", C::PredefinedType),
    info(KeywordId::Case, "case", C::Statement),
    info(KeywordId::Catch, "catch", C::Statement),
    info(KeywordId::Char, "char", C::PredefinedType),
    info(KeywordId::Checked, "checked", C::Statement),
    info(KeywordId::Class, "class", C::Declaration),
    info(KeywordId::Const, "const", C::Modifier),
    info(KeywordId::Continue, "continue", C::Statement),
    info(KeywordId::Decimal, "decimal", C::PredefinedType),
    info(KeywordId::Default, "default", C::Expression),
    info(KeywordId::Delegate, "delegate", C::Declaration),
    info(KeywordId::Do, "do", C::Statement),
    info(KeywordId::Double, "double", C::PredefinedType),
    info(KeywordId::Else, "else", C::Statement),
    info(KeywordId::Enum, "enum", C::Declaration),
    info(KeywordId::Event, "event", C::Declaration),
    info(KeywordId::Explicit, "explicit", C::Declaration),
    info(KeywordId::Extern, "extern", C::Modifier),
    info(KeywordId::False, "false", C::Literal),
    info(KeywordId::Finally, "finally", C::Statement),
    info(KeywordId::Fixed, "fixed", C::Statement),
    info(KeywordId::Float, "float", C::PredefinedType),
    info(KeywordId::For, "for", C::Statement),
    info(KeywordId::Foreach, "foreach", C::Statement),
    info(KeywordId::Goto, "goto", C::Statement),
    info(KeywordId::If, "if", C::Statement),
    info(KeywordId::Implicit, "implicit", C::Declaration),
    info(KeywordId::In, "in", C::Parameter),
    info(KeywordId::Int, "int", C::PredefinedType),
    info(KeywordId::Interface, "interface", C::Declaration),
    info(KeywordId::Internal, "internal", C::Modifier),
    info(KeywordId::Is, "is", C::Expression),
    info(KeywordId::Lock, "lock", C::Statement),
    info(KeywordId::Long, "long", C::PredefinedType),
    info(KeywordId::Namespace, "namespace", C::Declaration),
    info(KeywordId::New, "new", C::Modifier),
    info(KeywordId::Null, "null", C::Literal),
    info(KeywordId::Object, "object", C::PredefinedType),
    info(KeywordId::Operator, "operator", C::Declaration),
    info(KeywordId::Out, "out", C::Parameter),
    info(KeywordId::Override, "override", C::Modifier),
    info(KeywordId::Params, "params", C::Parameter),
    info(KeywordId::Private, "private", C::Modifier),
    info(KeywordId::Protected, "protected", C::Modifier),
    info(KeywordId::Public, "public", C::Modifier),
    info(KeywordId::Readonly, "readonly", C::Modifier),
    info(KeywordId::Ref, "ref", C::Parameter),
    info(KeywordId::Return, "return", C::Statement),
    info(KeywordId::SByte, "sbyte", C::PredefinedType),
    info(KeywordId::Sealed, "sealed", C::Modifier),
    info(KeywordId::Short, "short", C::PredefinedType),
    info(KeywordId::Sizeof, "sizeof", C::Expression),
    info(KeywordId::Stackalloc, "stackalloc", C::Expression),
    info(KeywordId::Static, "static", C::Modifier),
    info(KeywordId::String, "string", C::PredefinedType),
    info(KeywordId::Struct, "struct", C::Declaration),
    info(KeywordId::Switch, "switch", C::Statement),
    info(KeywordId::This, "this", C::Parameter),
    info(KeywordId::Throw, "throw", C::Statement),
    info(KeywordId::True, "true", C::Literal),
    info(KeywordId::Try, "try", C::Statement),
    info(KeywordId::Typeof, "typeof", C::Expression),
    info(KeywordId::UInt, "uint", C::PredefinedType),
    info(KeywordId::ULong, "ulong", C::PredefinedType),
    info(KeywordId::Unchecked, "unchecked", C::Statement),
    info(KeywordId::Unsafe, "unsafe", C::Modifier),
    info(KeywordId::UShort, "ushort", C::PredefinedType),
    info(KeywordId::Using, "using", C::Declaration),
    info(KeywordId::Virtual, "virtual", C::Modifier),
    info(KeywordId::Void, "void", C::PredefinedType),
    info(KeywordId::Volatile, "volatile", C::Modifier),
    info(KeywordId::While, "while", C::Statement),
];

/// Resolve a spelling to a reserved keyword.
pub fn from_str(name: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == name).map(|k| k.id)
}

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a keyword.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return `true` if the spelling is a reserved keyword (and therefore needs `@` to be used as an identifier).
pub fn is_reserved(name: &str) -> bool {
    from_str(name).is_some()
}

/// Return `true` if the keyword may appear in a member's modifier list.
pub fn is_modifier(id: KeywordId) -> bool {
    category(id) == KeywordCategory::Modifier
}

/// Return the full metadata entry for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo { id, canonical, category }
}

// ============================================================================
// Contextual keywords
// ============================================================================

/// Identifiers that act as keywords only in specific positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextualKeywordId {
    /// `partial class` / `partial void`.
    Partial,
    /// `async Task Foo()`.
    Async,
    /// `record Foo(...)` / `record struct`.
    Record,
    /// `required` members.
    Required,
    /// `file class Foo` (file-local types).
    File,
    /// `global using` and `global::` alias qualifier.
    Global,
    /// Generic constraint clauses.
    Where,
    /// `scoped ref` parameters.
    Scoped,
}

/// Contextual keyword spellings.
pub const CONTEXTUAL_KEYWORDS: &[(ContextualKeywordId, &str)] = &[
    (ContextualKeywordId::Partial, "partial"),
    (ContextualKeywordId::Async, "async"),
    (ContextualKeywordId::Record, "record"),
    (ContextualKeywordId::Required, "required"),
    (ContextualKeywordId::File, "file"),
    (ContextualKeywordId::Global, "global"),
    (ContextualKeywordId::Where, "where"),
    (ContextualKeywordId::Scoped, "scoped"),
];

/// Resolve an identifier spelling to a contextual keyword.
pub fn contextual_from_str(name: &str) -> Option<ContextualKeywordId> {
    CONTEXTUAL_KEYWORDS.iter().find(|(_, s)| *s == name).map(|(id, _)| *id)
}

/// Return the spelling of a contextual keyword.
pub fn contextual_as_str(id: ContextualKeywordId) -> &'static str {
    CONTEXTUAL_KEYWORDS
        .iter()
        .find(|(k, _)| *k == id)
        .map(|(_, s)| *s)
        .expect("contextual keyword missing")
}

/// Return `true` for contextual keywords that behave like member/type modifiers.
pub fn is_contextual_modifier(id: ContextualKeywordId) -> bool {
    matches!(
        id,
        ContextualKeywordId::Partial
            | ContextualKeywordId::Async
            | ContextualKeywordId::Required
            | ContextualKeywordId::File
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyword_round_trips_through_its_spelling() {
        for k in KEYWORDS {
            assert_eq!(from_str(k.canonical), Some(k.id), "{}", k.canonical);
            assert_eq!(as_str(k.id), k.canonical);
        }
    }

    #[test]
    fn registry_has_no_duplicate_spellings() {
        let mut seen = std::collections::HashSet::new();
        for k in KEYWORDS {
            assert!(seen.insert(k.canonical), "duplicate keyword spelling {}", k.canonical);
        }
        assert_eq!(KEYWORDS.len(), 77);
    }

    #[test]
    fn contextual_keywords_are_not_reserved() {
        for (id, spelling) in CONTEXTUAL_KEYWORDS {
            assert!(!is_reserved(spelling), "{spelling} must stay an identifier");
            assert_eq!(contextual_as_str(*id), *spelling);
        }
    }

    #[test]
    fn modifiers() {
        assert!(is_modifier(KeywordId::Public));
        assert!(is_modifier(KeywordId::Readonly));
        assert!(!is_modifier(KeywordId::Class));
        assert!(!is_modifier(KeywordId::Ref));
        assert!(is_contextual_modifier(ContextualKeywordId::Async));
        assert!(!is_contextual_modifier(ContextualKeywordId::Where));
    }
}
