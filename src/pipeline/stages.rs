//! Stage dispatchers and their worker pools.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc::{Receiver, Sender};
use tokio::sync::{Mutex as AsyncMutex, Semaphore};
use tokio::task::{JoinError, JoinSet};

use super::{CollisionPolicy, PipelineOptions, ReportCollector, Stage};
use crate::engine::GenerationEngine;
use crate::model::{GeneratedArtifact, SourceUnit};

/// An artifact on its way to the write stage, with the file it came from.
pub(super) struct PendingWrite {
    origin: PathBuf,
    artifact: GeneratedArtifact,
}

/// At most `parallelism` concurrent workers for one stage.
pub(super) struct StageWorkers {
    stage: Stage,
    permits: Arc<Semaphore>,
    tasks: JoinSet<()>,
    report: Arc<ReportCollector>,
}

impl StageWorkers {
    pub(super) fn new(stage: Stage, parallelism: usize, report: Arc<ReportCollector>) -> Self {
        Self {
            stage,
            permits: Arc::new(Semaphore::new(parallelism)),
            tasks: JoinSet::new(),
            report,
        }
    }

    fn report(&self) -> Arc<ReportCollector> {
        Arc::clone(&self.report)
    }

    /// Wait for a free worker slot, then run `work` on it.
    async fn spawn<F>(&mut self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let permit = match Arc::clone(&self.permits).acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                self.report
                    .fail(self.stage, PathBuf::new(), format!("worker pool unavailable: {e}"));
                return;
            }
        };
        self.tasks.spawn(async move {
            let _permit = permit;
            work.await;
        });
        // Reap finished workers so the set only holds in-flight ones.
        while let Some(result) = self.tasks.try_join_next() {
            self.joined(result);
        }
    }

    /// Wait for every in-flight worker.
    async fn drain(mut self) {
        while let Some(result) = self.tasks.join_next().await {
            self.joined(result);
        }
        tracing::debug!(stage = %self.stage, "stage drained");
    }

    fn joined(&self, result: Result<(), JoinError>) {
        if let Err(e) = result {
            self.report
                .fail(self.stage, PathBuf::new(), format!("worker task failed: {e}"));
        }
    }
}

// ============================================================================
// Read
// ============================================================================

pub(super) async fn read_stage(mut paths: Receiver<PathBuf>, units: Sender<SourceUnit>, mut workers: StageWorkers) {
    while let Some(path) = paths.recv().await {
        let units = units.clone();
        let report = workers.report();
        workers
            .spawn(async move {
                tracing::info!(path = %path.display(), "reading file");
                match tokio::fs::read_to_string(&path).await {
                    Ok(text) => {
                        report.update(|r| r.files_read += 1);
                        if let Err(e) = units.send(SourceUnit { path, text }).await {
                            report.fail(Stage::Read, e.0.path, "generate stage is no longer accepting input");
                        }
                    }
                    Err(e) => report.fail(Stage::Read, path, e.to_string()),
                }
            })
            .await;
    }
    workers.drain().await;
}

// ============================================================================
// Generate
// ============================================================================

pub(super) async fn generate_stage(
    mut units: Receiver<SourceUnit>,
    artifacts: Sender<PendingWrite>,
    engine: Arc<GenerationEngine>,
    mut workers: StageWorkers,
) {
    while let Some(unit) = units.recv().await {
        let artifacts = artifacts.clone();
        let engine = Arc::clone(&engine);
        let report = workers.report();
        workers
            .spawn(async move {
                let SourceUnit { path, text } = unit;
                let outcome = tokio::task::spawn_blocking(move || {
                    let result = engine.process(&text);
                    (text, result)
                })
                .await;

                match outcome {
                    Ok((_, Ok(generated))) => {
                        if generated.is_empty() {
                            tracing::debug!(path = %path.display(), "no classes found");
                        }
                        report.update(|r| r.artifacts_generated += generated.len());
                        for artifact in generated {
                            let pending = PendingWrite {
                                origin: path.clone(),
                                artifact,
                            };
                            if artifacts.send(pending).await.is_err() {
                                report.fail(Stage::Generate, path, "write stage is no longer accepting input");
                                break;
                            }
                        }
                    }
                    Ok((text, Err(e))) => {
                        let rendered = e.render(&path.display().to_string(), &text);
                        report.fail(Stage::Generate, path, format!("{e}\n{}", rendered.trim_end()));
                    }
                    Err(e) => report.fail(Stage::Generate, path, format!("generation panicked: {e}")),
                }
            })
            .await;
    }
    workers.drain().await;
}

// ============================================================================
// Write
// ============================================================================

/// Destination directory plus the table of output names claimed during this run.
pub(super) struct WriteTarget {
    destination: PathBuf,
    extension: String,
    policy: CollisionPolicy,
    claimed: Mutex<HashMap<String, ClaimedName>>,
}

struct ClaimedName {
    origin: PathBuf,
    /// Serialises writes to the same file.
    lock: Arc<AsyncMutex<()>>,
}

impl WriteTarget {
    pub(super) fn new(destination: &Path, options: &PipelineOptions) -> Self {
        Self {
            destination: destination.to_path_buf(),
            extension: options.extension().to_string(),
            policy: options.collision_policy(),
            claimed: Mutex::new(HashMap::new()),
        }
    }

    fn file_name(&self, artifact: &GeneratedArtifact) -> String {
        artifact.file_name(&self.extension, self.policy == CollisionPolicy::Qualify)
    }

    /// Claim `file_name` for `origin`, returning the lock that orders writes to it.
    fn claim(&self, file_name: &str, origin: &Path, report: &ReportCollector) -> Arc<AsyncMutex<()>> {
        let mut claimed = self.claimed.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = claimed.get(file_name) {
            tracing::warn!(
                file = file_name,
                first = %existing.origin.display(),
                second = %origin.display(),
                "output file name already written in this run, last writer wins"
            );
            report.update(|r| r.collisions += 1);
            return Arc::clone(&existing.lock);
        }
        let lock = Arc::new(AsyncMutex::new(()));
        claimed.insert(
            file_name.to_string(),
            ClaimedName {
                origin: origin.to_path_buf(),
                lock: Arc::clone(&lock),
            },
        );
        lock
    }
}

pub(super) async fn write_stage(
    mut pending: Receiver<PendingWrite>,
    target: Arc<WriteTarget>,
    mut workers: StageWorkers,
) {
    while let Some(PendingWrite { origin, artifact }) = pending.recv().await {
        let target = Arc::clone(&target);
        let report = workers.report();
        workers
            .spawn(async move {
                let file_name = target.file_name(&artifact);
                let lock = target.claim(&file_name, &origin, &report);
                let _guard = lock.lock().await;

                let path = target.destination.join(&file_name);
                tracing::info!(path = %path.display(), class = %artifact.target_name, "writing file");
                match tokio::fs::write(&path, artifact.source.as_bytes()).await {
                    Ok(()) => report.update(|r| {
                        r.artifacts_written += 1;
                        r.outputs.insert(path);
                    }),
                    Err(e) => report.fail(Stage::Write, path, e.to_string()),
                }
            })
            .await;
    }
    workers.drain().await;
}
