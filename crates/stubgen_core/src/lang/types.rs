//! Predefined (keyword-spelled) type vocabulary.
//!
//! C# spells its builtin types with reserved keywords (`int`, `string`, `object`, ...). This registry maps
//! each of those keywords to a [`PredefinedTypeId`] and records the primitive kind that drives default-value
//! synthesis.
//!
//! ## Notes
//! - Framework names such as `System.Int32` are *not* predefined types; they are ordinary named types.
//! - This module is vocabulary only. Literal rendering lives with the scaffold generator.
//!
//! ## Examples
//! ```rust
//! use stubgen_core::lang::keywords::KeywordId;
//! use stubgen_core::lang::types::{self, PredefinedTypeId, PrimitiveKind};
//!
//! assert_eq!(types::from_keyword(KeywordId::UInt), Some(PredefinedTypeId::UInt));
//! assert_eq!(types::from_keyword(KeywordId::Class), None);
//! assert_eq!(
//!     types::kind(PredefinedTypeId::UShort),
//!     PrimitiveKind::Integer { signed: false, bits: 16 }
//! );
//! ```

use super::keywords::{self, KeywordId};

/// Stable identifier for predefined types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredefinedTypeId {
    Bool,
    Byte,
    SByte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    Decimal,
    Char,
    String,
    Object,
    Void,
}

/// Shape of a predefined type, as far as default values are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Integer { signed: bool, bits: u8 },
    /// Binary floating point, `bits` is 32 or 64.
    Float { bits: u8 },
    /// 128-bit decimal floating point.
    Decimal,
    Text,
    Character,
    Boolean,
    /// `object`, `void`.
    Other,
}

/// Metadata for a predefined type.
#[derive(Debug, Clone, Copy)]
pub struct PredefinedTypeInfo {
    pub id: PredefinedTypeId,
    pub keyword: KeywordId,
    pub kind: PrimitiveKind,
    /// The framework type the keyword aliases.
    pub clr_name: &'static str,
}

/// Registry of predefined types.
pub const PREDEFINED_TYPES: &[PredefinedTypeInfo] = &[
    info(PredefinedTypeId::Bool, KeywordId::Bool, PrimitiveKind::Boolean, "System.Boolean"),
    info(PredefinedTypeId::Byte, KeywordId::Byte, int(false, 8), "System.Byte"),
    info(PredefinedTypeId::SByte, KeywordId::SByte, int(true, 8), "System.SByte"),
    info(PredefinedTypeId::Short, KeywordId::Short, int(true, 16), "System.Int16"),
    info(PredefinedTypeId::UShort, KeywordId::UShort, int(false, 16), "System.UInt16"),
    info(PredefinedTypeId::Int, KeywordId::Int, int(true, 32), "System.Int32"),
    info(PredefinedTypeId::UInt, KeywordId::UInt, int(false, 32), "System.UInt32"),
    info(PredefinedTypeId::Long, KeywordId::Long, int(true, 64), "System.Int64"),
    info(PredefinedTypeId::ULong, KeywordId::ULong, int(false, 64), "System.UInt64"),
    info(PredefinedTypeId::Float, KeywordId::Float, PrimitiveKind::Float { bits: 32 }, "System.Single"),
    info(PredefinedTypeId::Double, KeywordId::Double, PrimitiveKind::Float { bits: 64 }, "System.Double"),
    info(PredefinedTypeId::Decimal, KeywordId::Decimal, PrimitiveKind::Decimal, "System.Decimal"),
    info(PredefinedTypeId::Char, KeywordId::Char, PrimitiveKind::Character, "System.Char"),
    info(PredefinedTypeId::String, KeywordId::String, PrimitiveKind::Text, "System.String"),
    info(PredefinedTypeId::Object, KeywordId::Object, PrimitiveKind::Other, "System.Object"),
    info(PredefinedTypeId::Void, KeywordId::Void, PrimitiveKind::Other, "System.Void"),
];

/// Resolve a keyword to the predefined type it spells, if any.
pub fn from_keyword(keyword: KeywordId) -> Option<PredefinedTypeId> {
    PREDEFINED_TYPES.iter().find(|t| t.keyword == keyword).map(|t| t.id)
}

/// Resolve a spelling (`"int"`) to a predefined type.
pub fn from_str(name: &str) -> Option<PredefinedTypeId> {
    keywords::from_str(name).and_then(from_keyword)
}

/// Return the keyword spelling of a predefined type.
pub fn as_str(id: PredefinedTypeId) -> &'static str {
    keywords::as_str(info_for(id).keyword)
}

/// Return the primitive kind of a predefined type.
pub fn kind(id: PredefinedTypeId) -> PrimitiveKind {
    info_for(id).kind
}

/// Return the full metadata entry for a predefined type.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PredefinedTypeId) -> &'static PredefinedTypeInfo {
    PREDEFINED_TYPES
        .iter()
        .find(|t| t.id == id)
        .expect("predefined type info missing")
}

const fn int(signed: bool, bits: u8) -> PrimitiveKind {
    PrimitiveKind::Integer { signed, bits }
}

const fn info(
    id: PredefinedTypeId,
    keyword: KeywordId,
    kind: PrimitiveKind,
    clr_name: &'static str,
) -> PredefinedTypeInfo {
    PredefinedTypeInfo {
        id,
        keyword,
        kind,
        clr_name,
    }
}
