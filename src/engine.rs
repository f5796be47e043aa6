//! Generation engine: source text → scaffolds.
//!
//! [`GenerationEngine::process`] is a pure function of its input. The engine holds only immutable
//! configuration, so one instance is shared by every generate worker of the pipeline.

use crate::extract::extract;
use crate::generate::{GeneratorConfig, ScaffoldGenerator};
use crate::model::GeneratedArtifact;

pub use crate::extract::GenerationError;

#[derive(Debug, Clone, Default)]
pub struct GenerationEngine {
    generator: ScaffoldGenerator,
}

impl GenerationEngine {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            generator: ScaffoldGenerator::new(config),
        }
    }

    pub fn generator(&self) -> &ScaffoldGenerator {
        &self.generator
    }

    /// Extract every class of `source` and generate one scaffold per class.
    ///
    /// A unit without classes yields an empty list.
    ///
    /// ## Errors
    ///
    /// Returns [`GenerationError`] when the source cannot be tokenized or ends inside an unterminated
    /// declaration. Recoverable syntax errors only drop the malformed declaration.
    #[tracing::instrument(skip_all, fields(len = source.len()))]
    pub fn process(&self, source: &str) -> Result<Vec<GeneratedArtifact>, GenerationError> {
        let unit = extract(source)?;
        Ok(self.generator.generate_unit(&unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::ImportPolicy;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_engine_is_shareable() {
        assert_send_sync::<GenerationEngine>();
    }

    #[test]
    fn test_one_artifact_per_class() {
        let source = "namespace N { public class A { public void X() { } } public class B { public int Y() => 1; } }";
        let artifacts = GenerationEngine::default().process(source).unwrap();
        let names: Vec<&str> = artifacts.iter().map(|a| a.target_name.as_str()).collect();
        assert_eq!(names, vec!["ATests", "BTests"]);
    }

    #[test]
    fn test_zero_classes() {
        let artifacts = GenerationEngine::default().process("namespace N { interface IA { } }").unwrap();
        assert!(artifacts.is_empty());
    }

    #[test]
    fn test_process_is_deterministic() {
        let source = "using System.Linq; namespace N { public class A { public A(IB b, int n) { } public string Z(long v) => null; } }";
        let engine = GenerationEngine::new(GeneratorConfig::new().with_import_policy(ImportPolicy::MergeSource));
        assert_eq!(engine.generator().config().import_policy, ImportPolicy::MergeSource);
        assert_eq!(engine.process(source).unwrap(), engine.process(source).unwrap());
    }

    #[test]
    fn test_fatal_error_propagates() {
        let err = GenerationEngine::default().process("class A {").unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }
}
