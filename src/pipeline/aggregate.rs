//! Fan-in of extraction results.
//!
//! The aggregator is the only owner of the result map. It stops at the first
//! failure, triggers cancellation and hands back that single error; results
//! still in flight are never looked at.
//!
//! ```text
//! Collecting ──success──▶ Collecting
//!     │
//!     ├──failure / walk error──▶ Failed     (terminal)
//!     └──clean close + walk ok──▶ Completed (terminal)
//! ```

use super::cancel::Cancellation;
use super::error::ExtractError;
use super::worker::ExtractionResult;
use crossbeam_channel::Receiver;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Archive path to extraction target, one entry per extracted archive.
pub type ResultMap = BTreeMap<PathBuf, PathBuf>;

/// State of the aggregation.
#[derive(Debug)]
pub enum AggregateState {
    Collecting(ResultMap),
    Failed(ExtractError),
    Completed(ResultMap),
}

impl Default for AggregateState {
    fn default() -> Self {
        AggregateState::Collecting(ResultMap::new())
    }
}

impl AggregateState {
    /// Fold one extraction result into the state.
    ///
    /// A failure discards everything collected so far. Terminal states are
    /// left unchanged.
    pub fn on_result(self, result: ExtractionResult) -> Self {
        match self {
            AggregateState::Collecting(mut map) => match result.outcome {
                Ok(()) => {
                    map.insert(result.archive, result.target);
                    AggregateState::Collecting(map)
                }
                Err(e) => AggregateState::Failed(e),
            },
            terminal => terminal,
        }
    }

    /// Apply the walk outcome once the result stream has closed.
    ///
    /// A failed walk may have left archives undiscovered, so it beats the
    /// collected map.
    pub fn on_close(self, walk: Result<(), ExtractError>) -> Self {
        match self {
            AggregateState::Collecting(map) => match walk {
                Ok(()) => AggregateState::Completed(map),
                Err(e) => AggregateState::Failed(e),
            },
            terminal => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AggregateState::Collecting(_))
    }

    /// Final result of a terminal state.
    ///
    /// A state still collecting is reported as canceled; callers only convert
    /// terminal states.
    pub fn into_result(self) -> Result<ResultMap, ExtractError> {
        match self {
            AggregateState::Completed(map) => Ok(map),
            AggregateState::Failed(e) => Err(e),
            AggregateState::Collecting(_) => Err(ExtractError::Canceled),
        }
    }
}

/// Drives [`AggregateState`] from the pipeline channels.
pub struct Aggregator<'a> {
    cancel: &'a Cancellation,
    source_root: &'a Path,
}

impl<'a> Aggregator<'a> {
    pub fn new(cancel: &'a Cancellation, source_root: &'a Path) -> Self {
        Self {
            cancel,
            source_root,
        }
    }

    /// Collect results until the stream closes or a failure arrives.
    ///
    /// On failure cancellation is triggered immediately and the walk outcome
    /// is not waited for.
    pub fn run(
        &self,
        results: &Receiver<ExtractionResult>,
        walk_outcome: &Receiver<Result<(), ExtractError>>,
    ) -> Result<ResultMap, ExtractError> {
        let mut state = AggregateState::default();

        for result in results.iter() {
            state = state.on_result(result);
            if state.is_terminal() {
                debug!("Extraction failed, cancelling remaining work");
                self.cancel.cancel();
                return state.into_result();
            }
        }

        let walk = walk_outcome.recv().unwrap_or_else(|_| {
            Err(ExtractError::Traversal {
                path: self.source_root.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, "walker exited without reporting"),
            })
        });
        state = state.on_close(walk);
        if let AggregateState::Failed(_) = state {
            self.cancel.cancel();
        }

        if let AggregateState::Completed(map) = &state {
            if map.is_empty() {
                info!(
                    source = %self.source_root.display(),
                    "No archive files found in {}",
                    self.source_root.display()
                );
            }
        }

        state.into_result()
    }
}
