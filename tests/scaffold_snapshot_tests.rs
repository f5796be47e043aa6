//! Golden snapshot tests for generated scaffolds
//!
//! These tests run the engine on the `.cs` files under `tests/fixtures/` and compare every generated
//! test file against stored snapshots, so changes to scaffold layout are reviewed and intentional.
//!
//! Run with: `cargo test --test scaffold_snapshot_tests`
//! Review changes: `cargo insta review`

use std::fs;

use stubgen::{GeneratedArtifact, GenerationEngine, GeneratorConfig, ImportPolicy};

fn load_fixture(name: &str) -> String {
    let path = format!("tests/fixtures/{}.cs", name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read fixture: {}", path))
}

/// All artifacts of one source file, each under a `==> file <==` header.
fn render(artifacts: &[GeneratedArtifact]) -> String {
    artifacts
        .iter()
        .map(|a| format!("==> {} <==\n{}", a.file_name(".cs", false), a.source))
        .collect::<Vec<_>>()
        .join("\n")
}

fn generate(engine: &GenerationEngine, fixture: &str) -> Vec<GeneratedArtifact> {
    engine
        .process(&load_fixture(fixture))
        .unwrap_or_else(|e| panic!("generation failed for {fixture}: {e}"))
}

#[test]
fn test_service_with_mocked_dependencies() {
    let artifacts = generate(&GenerationEngine::default(), "order_service");
    insta::assert_snapshot!("order_service", render(&artifacts));
}

#[test]
fn test_file_scoped_namespace_and_nested_class() {
    let artifacts = generate(&GenerationEngine::default(), "toolkit");
    insta::assert_snapshot!("toolkit", render(&artifacts));
}

#[test]
fn test_merged_imports_without_namespace() {
    let engine = GenerationEngine::new(GeneratorConfig::new().with_import_policy(ImportPolicy::MergeSource));
    let artifacts = generate(&engine, "archive");
    insta::assert_snapshot!("archive_merge_source", render(&artifacts));
}
