//! Concurrent discovery and extraction of archives.
//!
//! A single [`Pipeline::extract_all`] call wires up three stages:
//!
//! ```text
//! walker ──paths──▶ workers (N) ──results──▶ aggregator
//!    ▲                  ▲                        │
//!    └──────────────────┴──────cancel────────────┘
//! ```
//!
//! The aggregator stops at the first failure and cancels everything
//! upstream. Whether the call then waits for the other threads is decided
//! by [`ShutdownPolicy`].

pub mod aggregate;
pub mod cancel;
pub mod error;
pub mod paths;
pub mod walker;
pub mod worker;

pub use aggregate::{AggregateState, Aggregator, ResultMap};
pub use cancel::{CancelSignal, Cancellation};
pub use error::ExtractError;
pub use paths::extraction_target;
pub use walker::{WalkOptions, DEFAULT_SUFFIX};
pub use worker::{ExtractionResult, DEFAULT_WORKERS, MAX_WORKERS};

use crate::extractor::{DirectoryCreator, Extractor, FsDirectoryCreator};
use crossbeam_channel::bounded;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use worker::WorkerContext;

/// What happens to still-running threads when a failure is returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShutdownPolicy {
    /// Return immediately; in-flight extractions finish on their own.
    #[default]
    Detach,
    /// Cancel, then wait for the walker and every worker before returning.
    Drain,
}

impl fmt::Display for ShutdownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownPolicy::Detach => write!(f, "detach"),
            ShutdownPolicy::Drain => write!(f, "drain"),
        }
    }
}

/// Tuning for one pipeline.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Worker count; zero is treated as one
    pub workers: usize,
    pub walk: WalkOptions,
    pub shutdown: ShutdownPolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            walk: WalkOptions::default(),
            shutdown: ShutdownPolicy::default(),
        }
    }
}

/// Extracts every archive under a source tree into a mirrored destination.
pub struct Pipeline {
    options: ExtractOptions,
    extractor: Arc<dyn Extractor>,
    directories: Arc<dyn DirectoryCreator>,
}

impl Pipeline {
    pub fn new(options: ExtractOptions, extractor: Arc<dyn Extractor>) -> Self {
        Self {
            options,
            extractor,
            directories: Arc::new(FsDirectoryCreator),
        }
    }

    /// Replace the filesystem directory creator.
    pub fn with_directory_creator(mut self, directories: Arc<dyn DirectoryCreator>) -> Self {
        self.directories = directories;
        self
    }

    /// Number of workers a run actually starts.
    pub fn worker_count(&self) -> usize {
        self.options.workers.max(1)
    }

    /// Extract every archive under `source_root` into `destination_root`.
    ///
    /// Returns the complete archive to target map, or the first failure
    /// observed. Nothing is partially returned: a failure discards every
    /// success collected before it.
    pub fn extract_all(
        &self,
        source_root: &Path,
        destination_root: &Path,
    ) -> Result<ResultMap, ExtractError> {
        let cancel = Cancellation::new();

        let walk = walker::spawn_walker(source_root, self.options.walk.clone(), cancel.signal())?;

        let context = Arc::new(WorkerContext {
            source_root: source_root.to_path_buf(),
            destination_root: destination_root.to_path_buf(),
            extractor: Arc::clone(&self.extractor),
            directories: Arc::clone(&self.directories),
        });
        let (results_tx, results_rx) = bounded(0);
        let pool = worker::spawn_workers(
            self.worker_count(),
            context,
            &walk.paths,
            results_tx,
            &cancel.signal(),
        )?;
        debug!(
            workers = pool.size(),
            source = %source_root.display(),
            destination = %destination_root.display(),
            "Pipeline started"
        );

        let outcome = Aggregator::new(&cancel, source_root).run(&results_rx, &walk.outcome);

        match (&outcome, self.options.shutdown) {
            (Ok(_), _) => {
                // The result channel closed, so every worker is already done
                pool.join();
                let _ = walk.handle.join();
            }
            (Err(_), ShutdownPolicy::Drain) => {
                cancel.cancel();
                debug!("Draining walker and workers");
                drop(results_rx);
                pool.join();
                let _ = walk.handle.join();
            }
            (Err(_), ShutdownPolicy::Detach) => {
                debug!("Returning without waiting for in-flight extractions");
            }
        }

        outcome
    }
}
