//! Abstract Syntax Tree definitions for the C# declaration surface.
//!
//! The tree is closed: every declaration shape the parser recognises has its own variant, and shapes that
//! scaffold generation never inspects (events, operators, indexers, destructors) collapse into
//! [`Member::Other`]. Consumers are expected to match exhaustively.

use std::fmt;

use stubgen_core::lang::keywords::{self, ContextualKeywordId, KeywordId};
use stubgen_core::lang::types::{self, PredefinedTypeId};

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

/// One source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilationUnit {
    pub usings: Vec<Spanned<UsingDirective>>,
    pub members: Vec<Spanned<NamespaceMember>>,
}

// ============================================================================
// Using directives and namespaces
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct UsingDirective {
    /// `global using ...`
    pub is_global: bool,
    pub kind: UsingKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UsingKind {
    /// `using System.Text;`
    Namespace(QualifiedName),
    /// `using static System.Math;`
    Static(TypeRef),
    /// `using Json = Newtonsoft.Json;`
    Alias { alias: Ident, target: TypeRef },
}

/// Renders the directive body, without `global`, `using` or the trailing semicolon.
impl fmt::Display for UsingDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            UsingKind::Namespace(name) => write!(f, "{name}"),
            UsingKind::Static(ty) => write!(f, "{} {ty}", keywords::as_str(KeywordId::Static)),
            UsingKind::Alias { alias, target } => write!(f, "{alias} = {target}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NamespaceMember {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    /// Dotted name as written (`Acme.Billing`).
    pub name: String,
    /// `namespace X;` applies to the rest of the file.
    pub file_scoped: bool,
    pub usings: Vec<Spanned<UsingDirective>>,
    pub members: Vec<Spanned<NamespaceMember>>,
}

// ============================================================================
// Type declarations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    /// `record` / `record class`
    Record,
    RecordStruct,
    Delegate,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Struct => write!(f, "struct"),
            TypeKind::Interface => write!(f, "interface"),
            TypeKind::Enum => write!(f, "enum"),
            TypeKind::Record => write!(f, "record"),
            TypeKind::RecordStruct => write!(f, "record struct"),
            TypeKind::Delegate => write!(f, "delegate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Keyword(KeywordId),
    Contextual(ContextualKeywordId),
}

/// Declaration modifiers in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Modifiers(pub Vec<Modifier>);

impl Modifiers {
    pub fn contains(&self, id: KeywordId) -> bool {
        self.0.iter().any(|m| *m == Modifier::Keyword(id))
    }

    pub fn contains_contextual(&self, id: ContextualKeywordId) -> bool {
        self.0.iter().any(|m| *m == Modifier::Contextual(id))
    }

    /// `true` only for an explicit `public`; C# members default to `private`.
    pub fn is_public(&self) -> bool {
        self.contains(KeywordId::Public)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match m {
                Modifier::Keyword(id) => write!(f, "{}", keywords::as_str(*id))?,
                Modifier::Contextual(id) => write!(f, "{}", keywords::contextual_as_str(*id))?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: Ident,
    pub modifiers: Modifiers,
    pub type_parameters: Vec<Ident>,
    /// C# 12 primary constructor / positional record parameters.
    pub primary_parameters: Option<Vec<Spanned<Parameter>>>,
    pub base_types: Vec<TypeRef>,
    pub members: Vec<Spanned<Member>>,
}

// ============================================================================
// Members
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    Property(PropertyDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Type(TypeDecl),
    Other(OtherMember),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub names: Vec<Ident>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub name: Ident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub modifiers: Modifiers,
    pub return_type: TypeRef,
    /// `IFoo` in `void IFoo.Run()`.
    pub explicit_interface: Option<QualifiedName>,
    pub name: Ident,
    pub type_parameters: Vec<Ident>,
    pub parameters: Vec<Spanned<Parameter>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub modifiers: Modifiers,
    pub name: Ident,
    pub parameters: Vec<Spanned<Parameter>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtherMemberKind {
    Event,
    Indexer,
    Operator,
    Conversion,
    Destructor,
}

/// A member whose signature is skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherMember {
    pub kind: OtherMemberKind,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterModifier {
    Ref,
    Out,
    In,
    Params,
    This,
}

impl ParameterModifier {
    pub fn keyword(self) -> KeywordId {
        match self {
            ParameterModifier::Ref => KeywordId::Ref,
            ParameterModifier::Out => KeywordId::Out,
            ParameterModifier::In => KeywordId::In,
            ParameterModifier::Params => KeywordId::Params,
            ParameterModifier::This => KeywordId::This,
        }
    }

    pub fn from_keyword(id: KeywordId) -> Option<Self> {
        match id {
            KeywordId::Ref => Some(ParameterModifier::Ref),
            KeywordId::Out => Some(ParameterModifier::Out),
            KeywordId::In => Some(ParameterModifier::In),
            KeywordId::Params => Some(ParameterModifier::Params),
            KeywordId::This => Some(ParameterModifier::This),
            _ => None,
        }
    }

    /// `true` if the argument must repeat the modifier at the call site.
    pub fn passes_by_reference(self) -> bool {
        matches!(self, ParameterModifier::Ref | ParameterModifier::Out | ParameterModifier::In)
    }
}

impl fmt::Display for ParameterModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", keywords::as_str(self.keyword()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub modifier: Option<ParameterModifier>,
    pub ty: TypeRef,
    pub name: Ident,
    /// `int x = 5`; the default expression itself is not kept.
    pub has_default: bool,
}

// ============================================================================
// Types
// ============================================================================

/// A type as written in source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Keyword-spelled builtin (`int`, `string`, `object`, ...).
    Predefined(PredefinedTypeId),
    Named(QualifiedName),
    /// `T[]` has rank 1, `T[,]` has rank 2.
    Array { element: Box<TypeRef>, rank: usize },
    Nullable(Box<TypeRef>),
    Tuple(Vec<TupleElement>),
    Pointer(Box<TypeRef>),
}

impl TypeRef {
    pub fn predefined(&self) -> Option<PredefinedTypeId> {
        match self {
            TypeRef::Predefined(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        self.predefined() == Some(PredefinedTypeId::Void)
    }

    /// Shorthand for a single unqualified, non-generic name.
    pub fn simple(name: impl Into<Ident>) -> Self {
        TypeRef::Named(QualifiedName::simple(name))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Predefined(id) => write!(f, "{}", types::as_str(*id)),
            TypeRef::Named(name) => write!(f, "{name}"),
            TypeRef::Array { element, rank } => {
                write!(f, "{element}[{}]", ",".repeat(rank.saturating_sub(1)))
            }
            TypeRef::Nullable(inner) => write!(f, "{inner}?"),
            TypeRef::Tuple(elements) => {
                write!(f, "(")?;
                for (i, el) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", el.ty)?;
                    if let Some(name) = &el.name {
                        write!(f, " {name}")?;
                    }
                }
                write!(f, ")")
            }
            TypeRef::Pointer(inner) => write!(f, "{inner}*"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleElement {
    pub ty: TypeRef,
    pub name: Option<Ident>,
}

/// `global::System.Collections.Generic.List<int>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Alias qualifier before `::`.
    pub alias: Option<Ident>,
    pub segments: Vec<NameSegment>,
}

impl QualifiedName {
    pub fn simple(name: impl Into<Ident>) -> Self {
        Self {
            alias: None,
            segments: vec![NameSegment {
                ident: name.into(),
                type_args: Vec::new(),
            }],
        }
    }

    /// The rightmost identifier (`List` for `System.Collections.Generic.List<int>`).
    pub fn last_ident(&self) -> Option<&str> {
        self.segments.last().map(|s| s.ident.as_str())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(alias) = &self.alias {
            write!(f, "{alias}::")?;
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameSegment {
    pub ident: Ident,
    pub type_args: Vec<TypeRef>,
}

impl fmt::Display for NameSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ident)?;
        if !self.type_args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.type_args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic(name: &str, args: Vec<TypeRef>) -> TypeRef {
        TypeRef::Named(QualifiedName {
            alias: None,
            segments: vec![NameSegment {
                ident: name.to_string(),
                type_args: args,
            }],
        })
    }

    #[test]
    fn type_display_is_canonical() {
        let int = TypeRef::Predefined(PredefinedTypeId::Int);
        let dict = generic("Dictionary", vec![TypeRef::Predefined(PredefinedTypeId::String), int.clone()]);
        assert_eq!(dict.to_string(), "Dictionary<string, int>");

        let jagged = TypeRef::Array {
            element: Box::new(TypeRef::Array {
                element: Box::new(int.clone()),
                rank: 1,
            }),
            rank: 1,
        };
        assert_eq!(jagged.to_string(), "int[][]");
        assert_eq!(
            TypeRef::Array {
                element: Box::new(int.clone()),
                rank: 3
            }
            .to_string(),
            "int[,,]"
        );
        assert_eq!(TypeRef::Nullable(Box::new(int.clone())).to_string(), "int?");
        assert_eq!(
            TypeRef::Tuple(vec![
                TupleElement {
                    ty: int,
                    name: Some("count".to_string())
                },
                TupleElement {
                    ty: TypeRef::simple("Foo"),
                    name: None
                },
            ])
            .to_string(),
            "(int count, Foo)"
        );
    }

    #[test]
    fn using_display_renders_body_only() {
        let alias = UsingDirective {
            is_global: true,
            kind: UsingKind::Alias {
                alias: "Json".to_string(),
                target: TypeRef::Named(QualifiedName {
                    alias: None,
                    segments: vec![
                        NameSegment {
                            ident: "Newtonsoft".to_string(),
                            type_args: vec![],
                        },
                        NameSegment {
                            ident: "Json".to_string(),
                            type_args: vec![],
                        },
                    ],
                }),
            },
        };
        assert_eq!(alias.to_string(), "Json = Newtonsoft.Json");

        let stat = UsingDirective {
            is_global: false,
            kind: UsingKind::Static(TypeRef::simple("Math")),
        };
        assert_eq!(stat.to_string(), "static Math");
    }

    #[test]
    fn span_converts_to_source_span() {
        let span: miette::SourceSpan = Span::new(4, 9).into();
        assert_eq!(span.offset(), 4);
        assert_eq!(span.len(), 5);
    }
}
