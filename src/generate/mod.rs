//! Scaffold generation: [`ClassModel`] → xUnit test class source.
//!
//! Every scaffold has the same shape:
//!
//! ```text
//! using ...;
//!
//! namespace <Namespace>.Tests
//! {
//!     public class <Class>Tests
//!     {
//!         private <Class> <subject>;
//!         private Mock<IDep> <dep>;
//!
//!         public <Class>Tests() { mocks, default locals, subject construction }
//!
//!         [Fact]
//!         public void <Method>Test() { Arrange / Act / Assert }
//!     }
//! }
//! ```
//!
//! Generated tests always fail until a human replaces the placeholder assertion.
//!
//! ## Notes
//! - Output is a pure function of the model and config, normalised by [`writer::normalize`].
//! - Generated field and test method names are unique within a scaffold: a clash gets a numeric suffix
//!   (`clock`, `clock2`; `ParseTest`, `ParseTest2` for overloads).

pub mod config;
pub mod writer;

use std::collections::HashSet;

use stubgen_core::lang::conventions::{
    self, ACT_MARKER, ACTUAL_VARIABLE, ARRANGE_MARKER, ASSERT_MARKER, EXPECTED_VARIABLE, FACT_ATTRIBUTE,
    FAIL_ASSERT_STATEMENT, MOCK_OBJECT_PROPERTY,
};

use crate::defaults::default_literal;
use crate::model::{ClassModel, ExtractedUnit, GeneratedArtifact, MethodModel, ParameterModel};

pub use config::{GeneratorConfig, ImportPolicy};
pub use writer::{ScaffoldWriter, normalize};

/// Turns class models into test scaffolds.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldGenerator {
    config: GeneratorConfig,
}

impl ScaffoldGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the scaffold of one class, with the default imports only.
    pub fn generate(&self, class: &ClassModel) -> GeneratedArtifact {
        self.emit(class, &[])
    }

    /// Generate one scaffold per class, in input order.
    pub fn generate_all(&self, classes: &[ClassModel]) -> Vec<GeneratedArtifact> {
        classes.iter().map(|class| self.generate(class)).collect()
    }

    /// Generate the scaffolds of a whole source unit, honouring the configured [`ImportPolicy`].
    #[tracing::instrument(skip_all, fields(classes = unit.classes.len()))]
    pub fn generate_unit(&self, unit: &ExtractedUnit) -> Vec<GeneratedArtifact> {
        let source_imports: &[String] = match self.config.import_policy {
            ImportPolicy::DefaultOnly => &[],
            ImportPolicy::MergeSource => &unit.namespace.imports,
        };
        unit.classes.iter().map(|class| self.emit(class, source_imports)).collect()
    }

    fn emit(&self, class: &ClassModel, source_imports: &[String]) -> GeneratedArtifact {
        tracing::debug!(
            class = %class.name,
            namespace = %class.namespace,
            methods = class.methods.len(),
            "generating scaffold"
        );

        let target_name = conventions::test_class_name(&class.name);
        let layout = FieldLayout::new(class);
        let spacing = self.config.blank_lines_between_members;
        let mut w = ScaffoldWriter::new(&self.config);

        for import in self.imports(class, source_imports) {
            w.writeln(&format!("using {import};"));
        }
        w.newline();
        w.writeln(&format!("namespace {}", conventions::test_namespace(&class.namespace)));
        w.open_block();
        w.writeln(&format!("public class {target_name}"));
        w.open_block();

        emit_fields(&mut w, class, &layout);
        w.blank_lines(spacing);
        emit_constructor(&mut w, class, &layout, &target_name);

        let mut test_names = UniqueNames::default();
        for method in &class.methods {
            w.blank_lines(spacing);
            let name = test_names.claim(conventions::test_method_name(&method.name));
            emit_test_method(&mut w, method, &layout.subject, &name);
        }

        w.close_block();
        w.close_block();

        GeneratedArtifact {
            target_name,
            namespace: class.namespace.clone(),
            source: normalize(&w.finish(), spacing.max(1)),
        }
    }

    /// Default imports, the class's own namespace, then (when merging) the unit's imports, without repeats.
    fn imports<'m>(&'m self, class: &'m ClassModel, source_imports: &'m [String]) -> Vec<&'m str> {
        let mut imports: Vec<&str> = Vec::new();
        let namespace = (!class.namespace.is_empty()).then_some(class.namespace.as_str());
        let candidates = self
            .config
            .default_imports
            .iter()
            .map(String::as_str)
            .chain(namespace)
            .chain(source_imports.iter().map(String::as_str));
        for import in candidates {
            if !imports.contains(&import) {
                imports.push(import);
            }
        }
        imports
    }
}

/// Names used by one scaffold's fields and setup constructor.
struct FieldLayout {
    subject: String,
    /// Indexed like `ClassModel::constructor_parameters`.
    arguments: Vec<SetupArgument>,
}

/// How the setup constructor supplies one constructor parameter.
enum SetupArgument {
    /// A `Mock<T>` field, passed as `field.Object`.
    Mock(String),
    /// A local initialised to the parameter type's default.
    Local(String),
}

impl FieldLayout {
    fn new(class: &ClassModel) -> Self {
        let mut names = UniqueNames::default();
        let subject = names.claim(conventions::subject_field_name(&class.name));
        let mocks: Vec<Option<String>> = class
            .constructor_parameters
            .iter()
            .map(|p| {
                p.is_interface()
                    .then(|| names.claim(conventions::mock_field_name(&p.type_descriptor())))
            })
            .collect();
        let arguments = class
            .constructor_parameters
            .iter()
            .zip(mocks)
            .map(|(p, mock)| match mock {
                Some(field) => SetupArgument::Mock(field),
                None => SetupArgument::Local(names.claim(escape(&p.name))),
            })
            .collect();
        Self { subject, arguments }
    }

    fn mocked<'c>(&'c self, class: &'c ClassModel) -> impl Iterator<Item = (&'c ParameterModel, &'c str)> {
        class
            .constructor_parameters
            .iter()
            .zip(&self.arguments)
            .filter_map(|(p, arg)| match arg {
                SetupArgument::Mock(field) => Some((p, field.as_str())),
                SetupArgument::Local(_) => None,
            })
    }
}

/// Hands out names, suffixing `2`, `3`, ... on repeats.
#[derive(Default)]
struct UniqueNames(HashSet<String>);

impl UniqueNames {
    fn claim(&mut self, base: String) -> String {
        let mut candidate = base.clone();
        let mut n = 2;
        while self.0.contains(&candidate) {
            candidate = format!("{base}{n}");
            n += 1;
        }
        self.0.insert(candidate.clone());
        candidate
    }

    fn reserve(&mut self, name: &str) {
        self.0.insert(name.to_string());
    }
}

fn escape(name: &str) -> String {
    conventions::escape_identifier(name)
}

fn emit_fields(w: &mut ScaffoldWriter, class: &ClassModel, layout: &FieldLayout) {
    w.writeln(&format!("private {} {};", class.name, layout.subject));
    for (param, field) in layout.mocked(class) {
        w.writeln(&format!(
            "private {} {field};",
            conventions::mock_type(&param.type_descriptor())
        ));
    }
}

fn emit_constructor(w: &mut ScaffoldWriter, class: &ClassModel, layout: &FieldLayout, target_name: &str) {
    w.writeln(&format!("public {target_name}()"));
    w.open_block();

    let mut args = Vec::with_capacity(layout.arguments.len());
    for (param, arg) in class.constructor_parameters.iter().zip(&layout.arguments) {
        match arg {
            SetupArgument::Mock(field) => {
                w.writeln(&format!(
                    "{field} = new {}();",
                    conventions::mock_type(&param.type_descriptor())
                ));
                args.push(format!("{field}.{MOCK_OBJECT_PROPERTY}"));
            }
            SetupArgument::Local(local) => {
                w.writeln(&default_local(param, local));
                args.push(argument(param, local));
            }
        }
    }
    w.writeln(&format!("{} = new {}({});", layout.subject, class.name, args.join(", ")));

    w.close_block();
}

fn emit_test_method(w: &mut ScaffoldWriter, method: &MethodModel, subject: &str, test_name: &str) {
    w.writeln(&format!("[{FACT_ATTRIBUTE}]"));
    w.writeln(&format!("public void {test_name}()"));
    w.open_block();

    // Locals must not shadow the subject field or the result variables.
    let mut names = UniqueNames::default();
    names.reserve(subject);
    if !method.returns_void() {
        names.reserve(ACTUAL_VARIABLE);
        names.reserve(EXPECTED_VARIABLE);
    }
    let locals: Vec<String> = method.parameters.iter().map(|p| names.claim(escape(&p.name))).collect();

    if !method.parameters.is_empty() {
        w.writeln(ARRANGE_MARKER);
        for (param, local) in method.parameters.iter().zip(&locals) {
            w.writeln(&default_local(param, local));
        }
        w.newline();
    }

    let args: Vec<String> = method
        .parameters
        .iter()
        .zip(&locals)
        .map(|(param, local)| argument(param, local))
        .collect();
    let call = format!("{subject}.{}({})", escape(&method.name), args.join(", "));

    w.writeln(ACT_MARKER);
    if method.returns_void() {
        w.writeln(&format!("{call};"));
        w.newline();
        w.writeln(ASSERT_MARKER);
    } else {
        let ty = &method.return_type;
        w.writeln(&format!("{ty} {ACTUAL_VARIABLE} = {call};"));
        w.newline();
        w.writeln(ASSERT_MARKER);
        w.writeln(&format!("{ty} {EXPECTED_VARIABLE} = {};", default_literal(ty)));
        w.writeln(&format!("Assert.Equal({EXPECTED_VARIABLE}, {ACTUAL_VARIABLE});"));
    }
    w.writeln(FAIL_ASSERT_STATEMENT);

    w.close_block();
}

/// `int count = 0;`
fn default_local(param: &ParameterModel, local: &str) -> String {
    format!("{} {local} = {};", param.ty, default_literal(&param.ty))
}

/// `count`, `ref count`, `out value`
fn argument(param: &ParameterModel, local: &str) -> String {
    match param.call_site_modifier() {
        Some(modifier) => format!("{modifier} {local}"),
        None => local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NamespaceModel;
    use stubgen_core::lang::types::PredefinedTypeId;
    use stubgen_syntax::ast::{ParameterModifier, TypeRef};

    fn int() -> TypeRef {
        TypeRef::Predefined(PredefinedTypeId::Int)
    }

    fn param(name: &str, ty: TypeRef, position: usize) -> ParameterModel {
        ParameterModel {
            name: name.to_string(),
            ty,
            position,
            modifier: None,
        }
    }

    fn class(name: &str, ctor: Vec<ParameterModel>, methods: Vec<MethodModel>) -> ClassModel {
        ClassModel {
            namespace: "Shop".to_string(),
            name: name.to_string(),
            constructor_parameters: ctor,
            methods,
        }
    }

    fn generate(class: &ClassModel) -> String {
        ScaffoldGenerator::default().generate(class).source
    }

    #[test]
    fn test_no_constructor_parameters_uses_parameterless_call() {
        let out = generate(&class("Cart", vec![], vec![]));
        assert!(out.contains("        private Cart cart;\n"));
        assert!(out.contains("            cart = new Cart();\n"));
        assert!(!out.contains("new Mock<"));
    }

    #[test]
    fn test_interface_dependency_gets_mock_field() {
        let out = generate(&class("Cart", vec![param("pricing", TypeRef::simple("IPricing"), 0)], vec![]));
        assert!(out.contains("private Mock<IPricing> pricing;"));
        assert!(out.contains("pricing = new Mock<IPricing>();"));
        assert!(out.contains("cart = new Cart(pricing.Object);"));
    }

    #[test]
    fn test_mixed_constructor_arguments_keep_order() {
        let ctor = vec![
            param("retries", int(), 0),
            param("clock", TypeRef::simple("IClock"), 1),
            param("name", TypeRef::Predefined(PredefinedTypeId::String), 2),
        ];
        let out = generate(&class("Cart", ctor, vec![]));
        insta::assert_snapshot!(out, @r#"
        using Xunit;
        using System;
        using System.Collections.Generic;
        using System.Text;
        using Moq;
        using Shop;

        namespace Shop.Tests
        {
            public class CartTests
            {
                private Cart cart;
                private Mock<IClock> clock;

                public CartTests()
                {
                    int retries = 0;
                    clock = new Mock<IClock>();
                    string name = "";
                    cart = new Cart(retries, clock.Object, name);
                }
            }
        }
        "#);
    }

    #[test]
    fn test_void_method_body() {
        let method = MethodModel {
            name: "Do".to_string(),
            return_type: TypeRef::Predefined(PredefinedTypeId::Void),
            parameters: vec![param("x", int(), 0)],
        };
        let out = generate(&class("Worker", vec![], vec![method]));
        let arrange = out.find("// Arrange").unwrap();
        let local = out.find("int x = 0;").unwrap();
        let act = out.find("// Act").unwrap();
        let call = out.find("worker.Do(x);").unwrap();
        let assert = out.find("// Assert").unwrap();
        let fail = out.find(FAIL_ASSERT_STATEMENT).unwrap();
        assert!(arrange < local && local < act && act < call && call < assert && assert < fail);
        assert!(out.contains("[Fact]\n        public void DoTest()"));
        assert!(!out.contains("Assert.Equal"));
    }

    #[test]
    fn test_non_void_method_body() {
        let method = MethodModel {
            name: "Get".to_string(),
            return_type: int(),
            parameters: vec![],
        };
        let out = generate(&class("Worker", vec![], vec![method]));
        assert!(!out.contains("// Arrange"));
        let actual = out.find("int actual = worker.Get();").unwrap();
        let expected = out.find("int expected = 0;").unwrap();
        let equal = out.find("Assert.Equal(expected, actual);").unwrap();
        let fail = out.find(FAIL_ASSERT_STATEMENT).unwrap();
        assert!(actual < expected && expected < equal && equal < fail);
    }

    #[test]
    fn test_by_ref_arguments_and_keyword_names() {
        let mut value = param("value", int(), 1);
        value.modifier = Some(ParameterModifier::Out);
        let method = MethodModel {
            name: "TryGet".to_string(),
            return_type: TypeRef::Predefined(PredefinedTypeId::Bool),
            parameters: vec![param("event", TypeRef::Predefined(PredefinedTypeId::String), 0), value],
        };
        let out = generate(&class("Lock", vec![], vec![method]));
        assert!(out.contains("private Lock @lock;"));
        assert!(out.contains("string @event = \"\";"));
        assert!(out.contains("int value = 0;"));
        assert!(out.contains("bool actual = @lock.TryGet(@event, out value);"));
    }

    #[test]
    fn test_name_clashes_get_suffixes() {
        let ctor = vec![
            param("primary", TypeRef::simple("IClock"), 0),
            param("backup", TypeRef::simple("IClock"), 1),
        ];
        let overload = |ty: TypeRef| MethodModel {
            name: "Parse".to_string(),
            return_type: TypeRef::Predefined(PredefinedTypeId::Void),
            parameters: vec![param("s", ty, 0)],
        };
        let methods = vec![overload(int()), overload(TypeRef::Predefined(PredefinedTypeId::String))];
        let out = generate(&class("Clock", ctor, methods));
        assert!(out.contains("private Mock<IClock> clock2;"));
        assert!(out.contains("private Mock<IClock> clock3;"));
        assert!(out.contains("clock = new Clock(clock2.Object, clock3.Object);"));
        assert!(out.contains("public void ParseTest()"));
        assert!(out.contains("public void ParseTest2()"));
    }

    #[test]
    fn test_locals_never_shadow_fields() {
        let ctor = vec![param("cart", int(), 0), param("clock", TypeRef::simple("IClock"), 1), param("clock", int(), 2)];
        let method = MethodModel {
            name: "Add".to_string(),
            return_type: int(),
            parameters: vec![param("cart", int(), 0), param("actual", int(), 1)],
        };
        let out = generate(&class("Cart", ctor, vec![method]));
        assert!(out.contains("int cart2 = 0;
            clock = new Mock<IClock>();
            int clock2 = 0;
"));
        assert!(out.contains("cart = new Cart(cart2, clock.Object, clock2);"));
        assert!(out.contains("int cart2 = 0;
            int actual2 = 0;
"));
        assert!(out.contains("int actual = cart.Add(cart2, actual2);"));
    }

    #[test]
    fn test_empty_namespace() {
        let mut model = class("Loose", vec![], vec![]);
        model.namespace.clear();
        let artifact = ScaffoldGenerator::default().generate(&model);
        assert!(artifact.source.contains("namespace Tests\n"));
        assert!(!artifact.source.contains("using ;"));
        assert!(artifact.source.contains("using Moq;\n\nnamespace Tests"));
    }

    #[test]
    fn test_import_policies() {
        let unit = ExtractedUnit {
            namespace: NamespaceModel {
                name: "Shop".to_string(),
                imports: vec!["System".to_string(), "System.Linq".to_string(), "Shop".to_string()],
            },
            classes: vec![class("Cart", vec![], vec![])],
        };
        let default_only = ScaffoldGenerator::default().generate_unit(&unit);
        assert!(!default_only[0].source.contains("using System.Linq;"));

        let merged = ScaffoldGenerator::new(GeneratorConfig::new().with_import_policy(ImportPolicy::MergeSource))
            .generate_unit(&unit);
        let source = &merged[0].source;
        assert!(source.contains("using Moq;\nusing Shop;\nusing System.Linq;\n"));
        assert_eq!(source.matches("using System;").count(), 1);
        assert_eq!(source.matches("using Shop;").count(), 1);
    }

    #[test]
    fn test_artifact_metadata_and_generate_all() {
        let classes = vec![class("A", vec![], vec![]), class("B", vec![], vec![])];
        let artifacts = ScaffoldGenerator::default().generate_all(&classes);
        let names: Vec<&str> = artifacts.iter().map(|a| a.target_name.as_str()).collect();
        assert_eq!(names, vec!["ATests", "BTests"]);
        assert!(artifacts.iter().all(|a| a.namespace == "Shop"));
        assert!(artifacts.iter().all(|a| a.source.ends_with("}\n")));
    }
}
