//! Default-value literals for declared types.
//!
//! Each literal is chosen so it converts implicitly to the declared type: a `uint` constant does not convert
//! to `ushort`, so the narrow unsigned types get a plain `0`.

use stubgen_core::lang::types::{self, PredefinedTypeId, PrimitiveKind};
use stubgen_syntax::ast::TypeRef;

/// Return the C# literal used to initialise a local of type `ty`. Total: every type has a literal.
pub fn default_literal(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Predefined(id) => predefined_literal(*id),
        _ => "null".to_string(),
    }
}

fn predefined_literal(id: PredefinedTypeId) -> String {
    let literal = match types::kind(id) {
        PrimitiveKind::Integer { signed: false, bits: 32 } => "0u",
        PrimitiveKind::Integer { signed: true, bits: 64 } => "0L",
        PrimitiveKind::Integer { signed: false, bits: 64 } => "0UL",
        PrimitiveKind::Integer { .. } => "0",
        PrimitiveKind::Float { bits: 32 } => "0f",
        PrimitiveKind::Float { .. } => "0d",
        PrimitiveKind::Decimal => "0m",
        PrimitiveKind::Text => "\"\"",
        PrimitiveKind::Character => "'\\0'",
        PrimitiveKind::Boolean => "false",
        PrimitiveKind::Other => return format!("default({})", types::as_str(id)),
    };
    literal.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stubgen_syntax::ast::{QualifiedName, TupleElement};

    fn lit(id: PredefinedTypeId) -> String {
        default_literal(&TypeRef::Predefined(id))
    }

    #[test]
    fn test_integer_literals() {
        assert_eq!(lit(PredefinedTypeId::Byte), "0");
        assert_eq!(lit(PredefinedTypeId::SByte), "0");
        assert_eq!(lit(PredefinedTypeId::Short), "0");
        assert_eq!(lit(PredefinedTypeId::UShort), "0");
        assert_eq!(lit(PredefinedTypeId::Int), "0");
        assert_eq!(lit(PredefinedTypeId::UInt), "0u");
        assert_eq!(lit(PredefinedTypeId::Long), "0L");
        assert_eq!(lit(PredefinedTypeId::ULong), "0UL");
    }

    #[test]
    fn test_floating_and_decimal_literals() {
        assert_eq!(lit(PredefinedTypeId::Float), "0f");
        assert_eq!(lit(PredefinedTypeId::Double), "0d");
        assert_eq!(lit(PredefinedTypeId::Decimal), "0m");
    }

    #[test]
    fn test_text_char_bool_literals() {
        assert_eq!(lit(PredefinedTypeId::String), "\"\"");
        assert_eq!(lit(PredefinedTypeId::Char), "'\\0'");
        assert_eq!(lit(PredefinedTypeId::Bool), "false");
    }

    #[test]
    fn test_other_predefined_use_default_expression() {
        assert_eq!(lit(PredefinedTypeId::Object), "default(object)");
        assert_eq!(lit(PredefinedTypeId::Void), "default(void)");
    }

    #[test]
    fn test_non_predefined_types_are_null() {
        let int = TypeRef::Predefined(PredefinedTypeId::Int);
        let cases = [
            TypeRef::simple("Order"),
            TypeRef::Named(QualifiedName::simple("Int32")),
            TypeRef::Nullable(Box::new(int.clone())),
            TypeRef::Array {
                element: Box::new(int.clone()),
                rank: 1,
            },
            TypeRef::Tuple(vec![
                TupleElement { ty: int.clone(), name: None },
                TupleElement { ty: int, name: None },
            ]),
        ];
        for ty in &cases {
            assert_eq!(default_literal(ty), "null", "{ty}");
        }
    }
}
