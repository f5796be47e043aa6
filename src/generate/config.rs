//! Scaffold generation configuration

use stubgen_core::lang::conventions::DEFAULT_IMPORTS;

/// Which `using` directives a scaffold starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportPolicy {
    /// The fixed default imports plus the namespace of the class under test.
    #[default]
    DefaultOnly,
    /// As `DefaultOnly`, followed by the source unit's own imports that are not already present.
    MergeSource,
}

/// Scaffold generation configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Namespaces imported by every scaffold, in order
    pub default_imports: Vec<String>,
    pub import_policy: ImportPolicy,
    /// Number of blank lines between the members of the generated test class
    pub blank_lines_between_members: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            default_imports: DEFAULT_IMPORTS.iter().map(|s| s.to_string()).collect(),
            import_policy: ImportPolicy::DefaultOnly,
            blank_lines_between_members: 1,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Replace the default import list
    pub fn with_default_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Set the import policy
    pub fn with_import_policy(mut self, policy: ImportPolicy) -> Self {
        self.import_policy = policy;
        self
    }

    /// Set the spacing between generated members
    pub fn with_blank_lines_between_members(mut self, count: usize) -> Self {
        self.blank_lines_between_members = count;
        self
    }
}
