//! Value types flowing between extraction, generation and the pipeline.
//!
//! Models are built once, bottom-up, from a parsed source unit and never mutated afterwards. They carry just
//! enough of a class's surface to emit a scaffold: the selected constructor's parameters and the public
//! methods' signatures. Bodies are never inspected.

use std::path::PathBuf;

use stubgen_core::lang::conventions;
use stubgen_syntax::ast::{ParameterModifier, TypeRef};

/// One input file's path and full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub text: String,
}

/// Namespace context of a source unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceModel {
    /// First namespace declared in the unit; empty for code outside any namespace.
    pub name: String,
    /// Every `using` directive in the unit, in source order, rendered without `using` / `;`
    /// (`System.Text`, `static System.Math`, `Json = Newtonsoft.Json`).
    pub imports: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterModel {
    pub name: String,
    pub ty: TypeRef,
    /// Zero-based ordinal in the declaring parameter list.
    pub position: usize,
    pub modifier: Option<ParameterModifier>,
}

impl ParameterModel {
    /// Canonical string form of the declared type.
    pub fn type_descriptor(&self) -> String {
        self.ty.to_string()
    }

    /// `true` when the declared type looks like an interface and gets a mock.
    pub fn is_interface(&self) -> bool {
        conventions::is_interface_name(&self.type_descriptor())
    }

    /// The `ref` / `out` / `in` keyword a call site must repeat, if any.
    pub fn call_site_modifier(&self) -> Option<ParameterModifier> {
        self.modifier.filter(|m| m.passes_by_reference())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodModel {
    pub name: String,
    pub return_type: TypeRef,
    pub parameters: Vec<ParameterModel>,
}

impl MethodModel {
    pub fn returns_void(&self) -> bool {
        self.return_type.is_void()
    }
}

/// The testable surface of one class declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassModel {
    /// Innermost enclosing namespace; empty if none.
    pub namespace: String,
    pub name: String,
    /// Parameters of the selected public constructor; empty when there is none.
    pub constructor_parameters: Vec<ParameterModel>,
    /// Public methods in declaration order.
    pub methods: Vec<MethodModel>,
}

/// Everything extracted from one source unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedUnit {
    pub namespace: NamespaceModel,
    pub classes: Vec<ClassModel>,
}

/// One generated test source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// `<ClassName>Tests`
    pub target_name: String,
    /// Namespace of the class the scaffold was generated from.
    pub namespace: String,
    pub source: String,
}

impl GeneratedArtifact {
    /// Output file name: `<target_name><extension>`, optionally prefixed with the namespace of origin.
    pub fn file_name(&self, extension: &str, qualified: bool) -> String {
        if qualified && !self.namespace.is_empty() {
            format!("{}.{}{}", self.namespace, self.target_name, extension)
        } else {
            format!("{}{}", self.target_name, extension)
        }
    }
}
