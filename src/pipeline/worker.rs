//! Fixed-size pool of extraction workers.
//!
//! All workers pull from the same candidate channel, so a slow archive only
//! occupies one worker while the others keep draining the queue. A worker
//! exits when the candidate channel is closed; cancellation only matters
//! when it is blocked handing a result to an aggregator that stopped
//! reading.

use super::cancel::CancelSignal;
use super::error::ExtractError;
use super::paths::extraction_target;
use crate::extractor::{DirectoryCreator, Extractor};
use crossbeam_channel::{select, Receiver, Sender};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

/// Number of workers when none is configured.
pub const DEFAULT_WORKERS: usize = 20;

/// Upper bound accepted for the worker count.
pub const MAX_WORKERS: usize = 64;

/// Outcome of processing one archive.
#[derive(Debug)]
pub struct ExtractionResult {
    pub archive: PathBuf,
    pub target: PathBuf,
    pub outcome: Result<(), ExtractError>,
}

impl ExtractionResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Everything a worker needs to process an archive. Shared by all workers.
pub struct WorkerContext {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub extractor: Arc<dyn Extractor>,
    pub directories: Arc<dyn DirectoryCreator>,
}

impl WorkerContext {
    /// Map, create and extract a single archive.
    ///
    /// Every task is announced before any work starts. A target directory
    /// that cannot be created fails the task without invoking the extractor.
    pub fn process(&self, archive: PathBuf) -> ExtractionResult {
        let target = extraction_target(&archive, &self.source_root, &self.destination_root);
        info!(
            archive = %archive.display(),
            target = %target.display(),
            "Extracting {} to {}",
            archive.display(),
            target.display()
        );

        if let Err(source) = self.directories.ensure_dir(&target) {
            return ExtractionResult {
                outcome: Err(ExtractError::DirectoryCreation {
                    archive: archive.clone(),
                    target: target.clone(),
                    source,
                }),
                archive,
                target,
            };
        }

        let outcome = self
            .extractor
            .extract(&archive, &target)
            .map_err(|source| ExtractError::Extraction {
                archive: archive.clone(),
                target: target.clone(),
                source,
            });

        ExtractionResult {
            archive,
            target,
            outcome,
        }
    }
}

/// Handles to the spawned worker threads.
#[derive(Debug)]
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Block until every worker has exited.
    pub fn join(self) {
        for handle in self.handles {
            // A panicking worker already dropped its result sender
            let _ = handle.join();
        }
    }
}

/// Spawn `count` workers reading from `paths` and reporting on `results`.
///
/// The caller's `results` sender is consumed; the result channel closes once
/// the last worker exits.
pub fn spawn_workers(
    count: usize,
    context: Arc<WorkerContext>,
    paths: &Receiver<PathBuf>,
    results: Sender<ExtractionResult>,
    cancel: &CancelSignal,
) -> Result<WorkerPool, ExtractError> {
    let mut handles = Vec::with_capacity(count);

    for id in 0..count {
        let context = Arc::clone(&context);
        let paths = paths.clone();
        let results = results.clone();
        let cancel = cancel.clone();

        let handle = thread::Builder::new()
            .name(format!("unzipall-worker-{}", id))
            .spawn(move || run_worker(id, &context, &paths, &results, &cancel))
            .map_err(|source| ExtractError::Spawn {
                role: "worker",
                source,
            })?;
        handles.push(handle);
    }

    Ok(WorkerPool { handles })
}

fn run_worker(
    id: usize,
    context: &WorkerContext,
    paths: &Receiver<PathBuf>,
    results: &Sender<ExtractionResult>,
    cancel: &CancelSignal,
) {
    for archive in paths.iter() {
        if cancel.is_cancelled() {
            debug!(worker = id, archive = %archive.display(), "Cancelled before start");
            return;
        }
        let result = context.process(archive);
        select! {
            send(results, result) -> sent => {
                if sent.is_err() {
                    debug!(worker = id, "Result channel closed, stopping");
                    return;
                }
            }
            recv(cancel.channel()) -> _ => {
                debug!(worker = id, "Cancelled, dropping result");
                return;
            }
        }
    }
    debug!(worker = id, "Candidate channel closed, exiting");
}
