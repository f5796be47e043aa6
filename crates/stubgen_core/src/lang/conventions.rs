//! Naming conventions and fixed strings used by generated test scaffolds.
//!
//! Generated tests target xUnit (`[Fact]`, `Assert`) with Moq (`Mock<T>`). Everything the generator spells
//! literally lives here so that changes to the scaffold's vocabulary happen in one place.
//!
//! ## Examples
//! ```rust
//! use stubgen_core::lang::conventions;
//!
//! assert!(conventions::is_interface_name("IService"));
//! assert!(!conventions::is_interface_name("Item"));
//! assert_eq!(conventions::subject_field_name("OrderService"), "orderService");
//! assert_eq!(conventions::mock_field_name("IRepository<User>"), "repository");
//! assert_eq!(conventions::subject_field_name("Event"), "@event");
//! ```

use super::keywords;

/// Appended to a class name to form its test class name.
pub const CLASS_TEST_POSTFIX: &str = "Tests";
/// Appended to a method name to form its test method name.
pub const METHOD_TEST_POSTFIX: &str = "Test";
/// Last segment of the namespace generated tests live in.
pub const TEST_NAMESPACE_SEGMENT: &str = "Tests";

/// Imports every generated file starts with, in emission order.
pub const DEFAULT_IMPORTS: &[&str] = &["Xunit", "System", "System.Collections.Generic", "System.Text", "Moq"];

/// Test-framework marker attribute placed on every test method.
pub const FACT_ATTRIBUTE: &str = "Fact";

pub const ARRANGE_MARKER: &str = "// Arrange";
pub const ACT_MARKER: &str = "// Act";
pub const ASSERT_MARKER: &str = "// Assert";

/// Placeholder that keeps a generated test failing until someone writes a real assertion.
pub const FAIL_ASSERT_STATEMENT: &str = "Assert.True(false, \"This test needs an implementation\");";

pub const ACTUAL_VARIABLE: &str = "actual";
pub const EXPECTED_VARIABLE: &str = "expected";

/// Generic wrapper type of the mocking framework.
pub const MOCK_TYPE: &str = "Mock";
/// Property exposing the mocked instance.
pub const MOCK_OBJECT_PROPERTY: &str = "Object";

/// Return `true` if `name` looks like an interface: longer than one character, a leading `I`, then another
/// upper-case letter.
pub fn is_interface_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('I'), Some(second)) if second.is_uppercase()
    )
}

/// Lower-case the first character, leaving the rest untouched.
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Prefix `@` when `name` is a reserved keyword so it stays a valid identifier.
pub fn escape_identifier(name: &str) -> String {
    if keywords::is_reserved(name) {
        format!("@{name}")
    } else {
        name.to_string()
    }
}

/// Field name holding the instance under test (`OrderService` → `orderService`).
pub fn subject_field_name(class_name: &str) -> String {
    escape_identifier(&lower_first(class_name))
}

/// Field name holding the mock for an interface-typed dependency (`ILogger<Foo>` → `logger`).
///
/// Only the leading identifier of the type descriptor is used, so generic arguments and nullable markers
/// never leak into the field name.
pub fn mock_field_name(interface_type: &str) -> String {
    let ident: String = interface_type
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    let stripped = ident.strip_prefix('I').unwrap_or(&ident);
    escape_identifier(&lower_first(stripped))
}

/// `Mock<T>`.
pub fn mock_type(interface_type: &str) -> String {
    format!("{MOCK_TYPE}<{interface_type}>")
}

/// `<ClassName>Tests`.
pub fn test_class_name(class_name: &str) -> String {
    format!("{class_name}{CLASS_TEST_POSTFIX}")
}

/// `<MethodName>Test`.
pub fn test_method_name(method_name: &str) -> String {
    format!("{method_name}{METHOD_TEST_POSTFIX}")
}

/// `<Namespace>.Tests`, or just `Tests` for code outside any namespace.
pub fn test_namespace(namespace: &str) -> String {
    if namespace.is_empty() {
        TEST_NAMESPACE_SEGMENT.to_string()
    } else {
        format!("{namespace}.{TEST_NAMESPACE_SEGMENT}")
    }
}
