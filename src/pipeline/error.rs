//! Errors surfaced by the extraction pipeline.
//!
//! # Error Categories
//!
//! - Traversal errors (walk stopped, files may be undiscovered)
//! - Per-archive errors (target directory or extraction tool failed)
//! - Cancellation (internal only, used to unwind the walker)
//! - Thread spawn failures

use crate::extractor::ExtractorError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for [`Pipeline::extract_all`](super::Pipeline::extract_all).
///
/// At most one of these is ever returned per call: whichever failure reached
/// the aggregator first.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The directory walk could not continue.
    #[error("Failed to walk {}: {source}", path.display())]
    Traversal {
        /// Entry that failed (the walk root if unknown)
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The extraction target for an archive could not be created.
    #[error("Failed to create {} for {}: {source}", target.display(), archive.display())]
    DirectoryCreation {
        archive: PathBuf,
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The extraction tool failed for an archive.
    #[error("Failed to extract {} to {}: {source}", archive.display(), target.display())]
    Extraction {
        archive: PathBuf,
        target: PathBuf,
        #[source]
        source: ExtractorError,
    },

    /// Work was abandoned because the pipeline was cancelled.
    #[error("walk canceled")]
    Canceled,

    /// A pipeline thread could not be started.
    #[error("Failed to spawn {role} thread: {source}")]
    Spawn {
        role: &'static str,
        #[source]
        source: io::Error,
    },
}

impl ExtractError {
    /// Build a traversal error from a walkdir failure.
    pub fn traversal(root: &Path, err: walkdir::Error) -> Self {
        let path = err.path().unwrap_or(root).to_path_buf();
        ExtractError::Traversal {
            path,
            source: err.into(),
        }
    }

    /// The archive this error belongs to, for per-archive failures.
    pub fn archive(&self) -> Option<&Path> {
        match self {
            ExtractError::DirectoryCreation { archive, .. }
            | ExtractError::Extraction { archive, .. } => Some(archive),
            _ => None,
        }
    }

    /// Check if this error only affected a single archive.
    pub fn is_task_failure(&self) -> bool {
        matches!(
            self,
            ExtractError::DirectoryCreation { .. } | ExtractError::Extraction { .. }
        )
    }

    /// Check if this is the internal cancellation marker.
    pub fn is_canceled(&self) -> bool {
        matches!(self, ExtractError::Canceled)
    }
}
