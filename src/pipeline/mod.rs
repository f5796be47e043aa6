//! Concurrent read → generate → write pipeline.
//!
//! Each stage owns a worker budget of P (a semaphore with P permits plus a `JoinSet`) and the stages are
//! connected by bounded channels. Units and artifacts move through the channels by value, so no two workers
//! ever touch the same one.
//!
//! ## Completion
//!
//! Closing the path channel cascades: a stage stops dispatching once its input channel is closed, waits for
//! its in-flight workers, then drops its output sender, which closes the next stage's input. A run is complete
//! once all three stages have drained.
//!
//! ## Failures
//!
//! Per-file failures (unreadable file, unparsable source, failed write, panicked worker) are collected in the
//! [`PipelineReport`] and never stop other files from being processed. Invalid options are rejected with a
//! [`ConfigError`] before any stage starts.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod stages;

use std::collections::BTreeSet;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::engine::GenerationEngine;
use stages::{StageWorkers, WriteTarget};

/// Default source file extension.
pub const DEFAULT_EXTENSION: &str = ".cs";

// ============================================================================
// Options
// ============================================================================

/// Invalid pipeline configuration. Detected before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("parallelism must be an integer, got `{0}`")]
    InvalidParallelism(String),
    #[error("parallelism must be greater than zero, got {0}")]
    NonPositiveParallelism(i64),
    #[error("source file extension must not be empty")]
    EmptyExtension,
    #[error("source directory `{}` does not exist or is not a directory", .0.display())]
    SourceDirectory(PathBuf),
}

/// What to do when two artifacts map to the same output file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// `<Class>Tests<ext>`; the last writer wins and the collision is logged.
    #[default]
    Overwrite,
    /// `<Namespace>.<Class>Tests<ext>` for classes declared inside a namespace.
    Qualify,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    parallelism: NonZeroUsize,
    extension: String,
    collision_policy: CollisionPolicy,
    channel_capacity: NonZeroUsize,
}

impl PipelineOptions {
    pub fn new(parallelism: NonZeroUsize) -> Self {
        Self {
            parallelism,
            extension: DEFAULT_EXTENSION.to_string(),
            collision_policy: CollisionPolicy::default(),
            channel_capacity: NonZeroUsize::new(parallelism.get().saturating_mul(2)).unwrap_or(parallelism),
        }
    }

    /// Validate a parallelism degree given as an integer.
    pub fn from_degree(degree: i64) -> Result<Self, ConfigError> {
        usize::try_from(degree)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self::new)
            .ok_or(ConfigError::NonPositiveParallelism(degree))
    }

    /// Validate a parallelism degree given as text (a command-line argument).
    pub fn parse_degree(raw: &str) -> Result<Self, ConfigError> {
        let degree = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidParallelism(raw.to_string()))?;
        Self::from_degree(degree)
    }

    /// Set the source file extension (`cs` or `.cs`); generated files use the same one.
    pub fn with_extension(mut self, extension: &str) -> Result<Self, ConfigError> {
        let bare = extension.trim().trim_start_matches('.');
        if bare.is_empty() {
            return Err(ConfigError::EmptyExtension);
        }
        self.extension = format!(".{bare}");
        Ok(self)
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Capacity of each inter-stage channel (default `2 * P`).
    pub fn with_channel_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism.get()
    }

    /// Extension with its leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn collision_policy(&self) -> CollisionPolicy {
        self.collision_policy
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity.get()
    }

    /// `true` if `path` has the configured extension.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == &self.extension[1..])
    }
}

// ============================================================================
// Report
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Read,
    Generate,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Read => write!(f, "read"),
            Stage::Generate => write!(f, "generate"),
            Stage::Write => write!(f, "write"),
        }
    }
}

/// One file that could not be carried through a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    pub stage: Stage,
    /// Input path for read/generate failures, output path for write failures; empty if unknown.
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed for {}: {}", self.stage, self.path.display(), self.message)
    }
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub files_read: usize,
    pub artifacts_generated: usize,
    pub artifacts_written: usize,
    /// Writes that targeted a file name already written during this run.
    pub collisions: usize,
    /// Distinct output files written.
    pub outputs: BTreeSet<PathBuf>,
    /// Sorted by stage, then path.
    pub failures: Vec<StageFailure>,
}

impl PipelineReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Mutex-guarded report shared by every worker of a run.
#[derive(Debug, Default)]
struct ReportCollector {
    inner: Mutex<PipelineReport>,
}

impl ReportCollector {
    fn update(&self, f: impl FnOnce(&mut PipelineReport)) {
        let mut report = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut report);
    }

    fn fail(&self, stage: Stage, path: PathBuf, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%stage, path = %path.display(), "{message}");
        self.update(|r| r.failures.push(StageFailure { stage, path, message }));
    }

    fn take(&self) -> PipelineReport {
        let mut report = std::mem::take(&mut *self.inner.lock().unwrap_or_else(PoisonError::into_inner));
        report
            .failures
            .sort_by(|a, b| (a.stage, &a.path).cmp(&(b.stage, &b.path)));
        report
    }
}

// ============================================================================
// Coordinator
// ============================================================================

/// Drives files through the read, generate and write stages.
#[derive(Debug, Clone)]
pub struct PipelineCoordinator {
    engine: Arc<GenerationEngine>,
    options: PipelineOptions,
}

impl PipelineCoordinator {
    pub fn new(engine: GenerationEngine, options: PipelineOptions) -> Self {
        Self {
            engine: Arc::new(engine),
            options,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Process every path and wait until all stages have drained.
    ///
    /// Paths are submitted in order, but nothing is guaranteed about the order in which files are read,
    /// generated or written.
    pub async fn run<I>(&self, paths: I, destination: &Path) -> PipelineReport
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let handle = self.start(destination);
        for path in paths {
            if !handle.submit(path).await {
                break;
            }
        }
        handle.finish().await
    }

    /// Spawn the three stages and return a handle for submitting paths.
    ///
    /// ## Panics
    ///
    /// - If called outside a Tokio runtime.
    pub fn start(&self, destination: &Path) -> PipelineHandle {
        let parallelism = self.options.parallelism();
        let capacity = self.options.channel_capacity();
        let report = Arc::new(ReportCollector::default());

        let (path_tx, path_rx) = mpsc::channel(capacity);
        let (unit_tx, unit_rx) = mpsc::channel(capacity);
        let (artifact_tx, artifact_rx) = mpsc::channel(capacity);

        tracing::debug!(parallelism, capacity, destination = %destination.display(), "starting pipeline");

        let read = tokio::spawn(stages::read_stage(
            path_rx,
            unit_tx,
            StageWorkers::new(Stage::Read, parallelism, Arc::clone(&report)),
        ));
        let generate = tokio::spawn(stages::generate_stage(
            unit_rx,
            artifact_tx,
            Arc::clone(&self.engine),
            StageWorkers::new(Stage::Generate, parallelism, Arc::clone(&report)),
        ));
        let write = tokio::spawn(stages::write_stage(
            artifact_rx,
            Arc::new(WriteTarget::new(destination, &self.options)),
            StageWorkers::new(Stage::Write, parallelism, Arc::clone(&report)),
        ));

        PipelineHandle {
            paths: path_tx,
            stages: vec![(Stage::Read, read), (Stage::Generate, generate), (Stage::Write, write)],
            report,
        }
    }
}

/// A running pipeline. Dropping the handle without [`finish`](Self::finish) closes the input but does not
/// wait for the stages.
pub struct PipelineHandle {
    paths: mpsc::Sender<PathBuf>,
    stages: Vec<(Stage, JoinHandle<()>)>,
    report: Arc<ReportCollector>,
}

impl PipelineHandle {
    /// Queue a path for reading. Waits while the read stage's input is full; returns `false` if the read
    /// stage is gone.
    pub async fn submit(&self, path: PathBuf) -> bool {
        self.paths.send(path).await.is_ok()
    }

    /// Close the input and wait for all three stages to drain.
    pub async fn finish(self) -> PipelineReport {
        let PipelineHandle { paths, stages, report } = self;
        drop(paths);
        for (stage, handle) in stages {
            if let Err(e) = handle.await {
                report.fail(stage, PathBuf::new(), format!("stage dispatcher failed: {e}"));
            }
        }
        let report = report.take();
        tracing::info!(
            read = report.files_read,
            generated = report.artifacts_generated,
            written = report.artifacts_written,
            failures = report.failures.len(),
            "pipeline finished"
        );
        report
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_degree() {
        assert_eq!(PipelineOptions::parse_degree("4").unwrap().parallelism(), 4);
        assert_eq!(PipelineOptions::parse_degree(" 1 ").unwrap().parallelism(), 1);
        assert_eq!(
            PipelineOptions::parse_degree("0"),
            Err(ConfigError::NonPositiveParallelism(0))
        );
        assert_eq!(
            PipelineOptions::parse_degree("-3"),
            Err(ConfigError::NonPositiveParallelism(-3))
        );
        assert_eq!(
            PipelineOptions::parse_degree("four"),
            Err(ConfigError::InvalidParallelism("four".to_string()))
        );
    }

    #[test]
    fn test_default_options() {
        let options = PipelineOptions::from_degree(3).unwrap();
        assert_eq!(options.extension(), ".cs");
        assert_eq!(options.collision_policy(), CollisionPolicy::Overwrite);
        assert_eq!(options.channel_capacity(), 6);
    }

    #[test]
    fn test_coordinator_keeps_options() {
        let options = PipelineOptions::from_degree(5)
            .unwrap()
            .with_collision_policy(CollisionPolicy::Qualify);
        let coordinator = PipelineCoordinator::new(GenerationEngine::default(), options.clone());
        assert_eq!(coordinator.options(), &options);
        assert_eq!(coordinator.options().channel_capacity(), 10);
    }

    #[test]
    fn test_with_extension() {
        let options = PipelineOptions::from_degree(1).unwrap();
        assert_eq!(options.clone().with_extension("csx").unwrap().extension(), ".csx");
        assert_eq!(options.clone().with_extension(".cs").unwrap().extension(), ".cs");
        assert_eq!(options.clone().with_extension("."), Err(ConfigError::EmptyExtension));
        assert_eq!(options.with_extension(""), Err(ConfigError::EmptyExtension));
    }

    #[test]
    fn test_matches_extension() {
        let options = PipelineOptions::from_degree(1).unwrap();
        assert!(options.matches(Path::new("src/Cart.cs")));
        assert!(!options.matches(Path::new("src/Cart.csx")));
        assert!(!options.matches(Path::new("src/cs")));
    }

    #[test]
    fn test_collector_sorts_failures() {
        let collector = ReportCollector::default();
        collector.fail(Stage::Write, PathBuf::from("b"), "x");
        collector.fail(Stage::Read, PathBuf::from("z"), "y");
        collector.fail(Stage::Read, PathBuf::from("a"), "z");
        let report = collector.take();
        let order: Vec<(Stage, &str)> = report
            .failures
            .iter()
            .map(|f| (f.stage, f.path.to_str().unwrap()))
            .collect();
        assert_eq!(order, vec![(Stage::Read, "a"), (Stage::Read, "z"), (Stage::Write, "b")]);
        assert!(!report.is_success());
        assert_eq!(report.failures[0].to_string(), "read failed for a: z");
    }
}
