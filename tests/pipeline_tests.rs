//! End-to-end tests for the concurrent read → generate → write pipeline
//!
//! Every test works on real temporary directories.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use stubgen::pipeline::Stage;
use stubgen::{CollisionPolicy, GenerationEngine, PipelineCoordinator, PipelineOptions, PipelineReport};
use tempfile::TempDir;

fn write_source(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn coordinator(parallelism: i64) -> PipelineCoordinator {
    PipelineCoordinator::new(GenerationEngine::default(), PipelineOptions::from_degree(parallelism).unwrap())
}

fn output_names(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

/// Sources with two, one and zero classes, plus a file with a top-level class.
fn corpus(dir: &Path) -> Vec<PathBuf> {
    vec![
        write_source(
            dir,
            "Billing.cs",
            "namespace Shop.Billing { public class Invoice { public Invoice(IClock clock) { } public decimal Total() => 0m; } \
             public class Receipt { public void Print() { } } }",
        ),
        write_source(dir, "Cart.cs", "namespace Shop { public class Cart { public int Count() => 0; } }"),
        write_source(dir, "Contracts.cs", "namespace Shop { public interface IClock { } public enum Kind { A } }"),
        write_source(dir, "Script.cs", "class Script { public void Run(string[] args) { } }"),
    ]
}

async fn run(coordinator: &PipelineCoordinator, paths: Vec<PathBuf>, out: &Path) -> PipelineReport {
    coordinator.run(paths, out).await
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_outputs_are_independent_of_parallelism() {
    let expected: BTreeSet<String> = ["InvoiceTests.cs", "ReceiptTests.cs", "CartTests.cs", "ScriptTests.cs"]
        .into_iter()
        .map(String::from)
        .collect();

    let mut contents = Vec::new();
    for parallelism in [1, 2, 8] {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let paths = corpus(src.path());

        let report = run(&coordinator(parallelism), paths, out.path()).await;

        assert!(report.is_success(), "P={parallelism}: {:?}", report.failures);
        assert_eq!(report.files_read, 4);
        assert_eq!(report.artifacts_generated, 4);
        assert_eq!(report.artifacts_written, 4);
        assert_eq!(report.collisions, 0);
        assert_eq!(output_names(out.path()), expected, "P={parallelism}");
        assert_eq!(report.outputs.len(), 4);

        contents.push(fs::read_to_string(out.path().join("InvoiceTests.cs")).unwrap());
    }
    assert!(contents.windows(2).all(|w| w[0] == w[1]));
    assert!(contents[0].contains("private Mock<IClock> clock;"));
}

#[tokio::test]
async fn test_broken_file_does_not_stop_others() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let mut paths = corpus(src.path());
    paths.push(write_source(src.path(), "Broken.cs", "namespace Shop { public class Broken { public void M() {"));

    let report = run(&coordinator(2), paths, out.path()).await;

    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.stage, Stage::Generate);
    assert!(failure.path.ends_with("Broken.cs"));
    assert!(failure.message.contains("Broken.cs"), "diagnostic should name the file: {}", failure.message);
    assert_eq!(report.files_read, 5);
    assert_eq!(output_names(out.path()).len(), 4);
}

#[tokio::test]
async fn test_missing_input_is_read_failure() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let mut paths = corpus(src.path());
    paths.insert(0, src.path().join("Vanished.cs"));

    let report = run(&coordinator(3), paths, out.path()).await;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].stage, Stage::Read);
    assert_eq!(report.files_read, 4);
    assert_eq!(output_names(out.path()).len(), 4);
}

#[tokio::test]
async fn test_unwritable_destination_is_write_failure() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let missing = out.path().join("not-created");
    let paths = vec![write_source(src.path(), "Cart.cs", "public class Cart { }")];

    let report = run(&coordinator(1), paths, &missing).await;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].stage, Stage::Write);
    assert_eq!(report.failures[0].path, missing.join("CartTests.cs"));
    assert_eq!(report.artifacts_written, 0);
}

#[tokio::test]
async fn test_empty_input_finishes() {
    let out = TempDir::new().unwrap();
    let report = run(&coordinator(4), Vec::new(), out.path()).await;
    assert_eq!(report, PipelineReport::default());
    assert!(output_names(out.path()).is_empty());
}

#[tokio::test]
async fn test_class_free_files_write_nothing() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let paths = vec![
        write_source(src.path(), "Empty.cs", ""),
        write_source(src.path(), "Only.cs", "namespace A { interface IOnly { } }"),
    ];

    let report = run(&coordinator(2), paths, out.path()).await;

    assert!(report.is_success());
    assert_eq!(report.files_read, 2);
    assert_eq!(report.artifacts_generated, 0);
    assert!(output_names(out.path()).is_empty());
}

fn same_name_sources(dir: &Path) -> Vec<PathBuf> {
    vec![
        write_source(dir, "A.cs", "namespace Alpha { public class Worker { public void A() { } } }"),
        write_source(dir, "B.cs", "namespace Beta { public class Worker { public void B() { } } }"),
    ]
}

#[tokio::test]
async fn test_overwrite_policy_keeps_one_file() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    let report = run(&coordinator(2), same_name_sources(src.path()), out.path()).await;

    assert!(report.is_success());
    assert_eq!(report.artifacts_written, 2);
    assert_eq!(report.collisions, 1);
    assert_eq!(output_names(out.path()), BTreeSet::from(["WorkerTests.cs".to_string()]));

    let text = fs::read_to_string(out.path().join("WorkerTests.cs")).unwrap();
    assert!(text.contains("namespace Alpha.Tests") ^ text.contains("namespace Beta.Tests"));
}

#[tokio::test]
async fn test_qualify_policy_keeps_both_files() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let options = PipelineOptions::from_degree(2)
        .unwrap()
        .with_collision_policy(CollisionPolicy::Qualify);
    let coordinator = PipelineCoordinator::new(GenerationEngine::default(), options);

    let report = run(&coordinator, same_name_sources(src.path()), out.path()).await;

    assert!(report.is_success());
    assert_eq!(report.collisions, 0);
    assert_eq!(
        output_names(out.path()),
        BTreeSet::from(["Alpha.WorkerTests.cs".to_string(), "Beta.WorkerTests.cs".to_string()])
    );
}

#[tokio::test]
async fn test_custom_extension_names_outputs() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let options = PipelineOptions::from_degree(1).unwrap().with_extension("csx").unwrap();
    let coordinator = PipelineCoordinator::new(GenerationEngine::default(), options);
    let paths = vec![write_source(src.path(), "Job.csx", "public class Job { }")];

    let report = run(&coordinator, paths, out.path()).await;

    assert!(report.is_success());
    assert_eq!(output_names(out.path()), BTreeSet::from(["JobTests.csx".to_string()]));
}

#[tokio::test]
async fn test_handle_accepts_paths_incrementally() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let coordinator = coordinator(1);

    let handle = coordinator.start(out.path());
    for path in corpus(src.path()) {
        assert!(handle.submit(path).await);
    }
    let report = handle.finish().await;

    assert!(report.is_success());
    assert_eq!(report.artifacts_written, 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_many_files_with_small_channels() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = (0..40)
        .map(|i| {
            write_source(
                src.path(),
                &format!("C{i}.cs"),
                &format!("namespace Bulk {{ public class C{i} {{ public int V() => {i}; }} }}"),
            )
        })
        .collect();
    let options = PipelineOptions::from_degree(3)
        .unwrap()
        .with_channel_capacity(std::num::NonZeroUsize::MIN);
    let coordinator = PipelineCoordinator::new(GenerationEngine::default(), options);

    let report = run(&coordinator, paths, out.path()).await;

    assert!(report.is_success());
    assert_eq!(report.artifacts_written, 40);
    assert_eq!(output_names(out.path()).len(), 40);
}
