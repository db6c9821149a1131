//! Archive discovery.
//!
//! The walker runs on its own thread and feeds archive paths to the workers
//! through a rendezvous channel. Every send races the cancellation signal, so
//! a walker whose consumers have gone away stops instead of blocking forever.
//!
//! The walk outcome travels on a separate one-slot channel and is reported
//! exactly once, after the last path has been handed over.

use super::cancel::CancelSignal;
use super::error::ExtractError;
use crossbeam_channel::{bounded, select, Receiver, Sender};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// File name suffix that marks an archive unless configured otherwise.
pub const DEFAULT_SUFFIX: &str = ".zip";

/// What the walker considers an archive and how it traverses.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Case-sensitive file name suffix, e.g. `.zip`
    pub suffix: String,
    /// Follow symbolic links while walking
    pub follow_links: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            follow_links: false,
        }
    }
}

impl WalkOptions {
    /// Check if a file name marks an archive.
    pub fn matches(&self, file_name: &OsStr) -> bool {
        file_name.to_string_lossy().ends_with(&self.suffix)
    }
}

/// Handles to a running walker thread.
#[derive(Debug)]
pub struct TreeWalk {
    /// Archive paths, closed when the walker finishes
    pub paths: Receiver<PathBuf>,
    /// The walk outcome, sent once
    pub outcome: Receiver<Result<(), ExtractError>>,
    pub handle: JoinHandle<()>,
}

/// Lazily enumerate the archives under `root`.
///
/// Yields regular files (and symlinks to regular files) whose name matches
/// `options`, in file name order per directory. A traversal failure is yielded as an `Err` item; callers are
/// expected to stop there.
pub fn discover(
    root: &Path,
    options: &WalkOptions,
) -> impl Iterator<Item = Result<PathBuf, ExtractError>> {
    let walk_root = root.to_path_buf();
    let options = options.clone();

    WalkDir::new(root)
        .follow_links(options.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Err(e) => Some(Err(ExtractError::traversal(&walk_root, e))),
            Ok(entry) if is_archive_candidate(&entry) && options.matches(entry.file_name()) => {
                Some(Ok(entry.into_path()))
            }
            Ok(_) => None,
        })
}

/// A regular file, or an unfollowed symlink that resolves to one.
///
/// Linked directories are never descended into unless links are followed.
fn is_archive_candidate(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

/// Send every discovered path to `paths` until the entries run out, an entry
/// fails, or `cancel` fires.
///
/// Nothing is sent after the first failed entry.
pub fn forward_paths<I>(
    entries: I,
    paths: &Sender<PathBuf>,
    cancel: &CancelSignal,
) -> Result<(), ExtractError>
where
    I: IntoIterator<Item = Result<PathBuf, ExtractError>>,
{
    for entry in entries {
        let path = entry?;
        if cancel.is_cancelled() {
            return Err(ExtractError::Canceled);
        }
        select! {
            send(paths, path) -> sent => {
                if sent.is_err() {
                    // Every worker is gone
                    return Err(ExtractError::Canceled);
                }
            }
            recv(cancel.channel()) -> _ => return Err(ExtractError::Canceled),
        }
    }
    Ok(())
}

/// Start walking `root` on a dedicated thread.
pub fn spawn_walker(
    root: &Path,
    options: WalkOptions,
    cancel: CancelSignal,
) -> Result<TreeWalk, ExtractError> {
    let (paths_tx, paths_rx) = bounded(0);
    let (outcome_tx, outcome_rx) = bounded(1);
    let root = root.to_path_buf();

    let handle = thread::Builder::new()
        .name("unzipall-walker".to_string())
        .spawn(move || {
            let outcome = forward_paths(discover(&root, &options), &paths_tx, &cancel);
            match &outcome {
                Ok(()) => debug!(root = %root.display(), "Walk finished"),
                Err(e) if e.is_canceled() => debug!(root = %root.display(), "Walk canceled"),
                Err(e) => debug!(root = %root.display(), error = %e, "Walk stopped"),
            }
            // Outcome first; the one-slot channel never blocks
            let _ = outcome_tx.send(outcome);
            drop(paths_tx);
        })
        .map_err(|source| ExtractError::Spawn {
            role: "walker",
            source,
        })?;

    Ok(TreeWalk {
        paths: paths_rx,
        outcome: outcome_rx,
        handle,
    })
}
