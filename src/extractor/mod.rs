//! Extraction tool backends.
//!
//! The pipeline never unpacks archives itself. Each worker hands the archive
//! and its target directory to an [`Extractor`], which shells out to a
//! command-line tool with overwrite semantics.
//!
//! # Supported Tools
//!
//! - **unzip**: `unzip -o <archive> -d <target>`
//! - **7z**: `7z x -y -o<target> <archive>`
//! - **bsdtar**: `bsdtar -x -f <archive> -C <target>`
//!
//! # Design
//!
//! Extractors are stateless and are shared by every worker thread, so the
//! trait requires `Send + Sync`. Directory creation sits behind its own
//! [`DirectoryCreator`] trait so tests can fail it independently.

mod bsdtar;
mod seven_zip;
mod unzip;

pub use bsdtar::BsdtarExtractor;
pub use seven_zip::SevenZipExtractor;
pub use unzip::UnzipExtractor;

use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Result type for extractor operations.
pub type ExtractorResult<T> = Result<T, ExtractorError>;

/// Trait for archive extraction backends (Strategy pattern).
///
/// Implementors must be thread-safe: one instance serves all workers.
pub trait Extractor: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Check if the underlying tool is available on the system.
    fn is_available(&self) -> bool;

    /// Extract `archive` into `target`, overwriting existing files.
    ///
    /// `target` is expected to exist already.
    fn extract(&self, archive: &Path, target: &Path) -> ExtractorResult<()>;
}

/// Ensures that an extraction target directory exists.
pub trait DirectoryCreator: Send + Sync {
    /// Create `path` and any missing parents. Succeeds if it already exists.
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;
}

/// [`DirectoryCreator`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectoryCreator;

impl DirectoryCreator for FsDirectoryCreator {
    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        let mut builder = std::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder.create(path)
    }
}

/// Extraction tools that can be selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Unzip,
    SevenZip,
    Bsdtar,
}

impl ToolKind {
    /// All supported tools, in the order shown to users.
    pub const ALL: [ToolKind; 3] = [ToolKind::Unzip, ToolKind::SevenZip, ToolKind::Bsdtar];

    /// Parse a tool name as used in the config file and on the command line.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "unzip" => Some(ToolKind::Unzip),
            "7z" | "7zip" | "7-zip" => Some(ToolKind::SevenZip),
            "bsdtar" => Some(ToolKind::Bsdtar),
            _ => None,
        }
    }

    /// Get the executable name for this tool.
    pub fn command_name(&self) -> &'static str {
        match self {
            ToolKind::Unzip => "unzip",
            ToolKind::SevenZip => "7z",
            ToolKind::Bsdtar => "bsdtar",
        }
    }

    /// Create the extractor for this tool.
    pub fn create_extractor(
        &self,
        timeout: Option<Duration>,
        extra_args: Vec<String>,
    ) -> Box<dyn Extractor> {
        match self {
            ToolKind::Unzip => Box::new(UnzipExtractor::new(timeout, extra_args)),
            ToolKind::SevenZip => Box::new(SevenZipExtractor::new(timeout, extra_args)),
            ToolKind::Bsdtar => Box::new(BsdtarExtractor::new(timeout, extra_args)),
        }
    }

    /// Comma-separated list of accepted names, for error messages.
    pub fn supported_names() -> String {
        Self::ALL
            .iter()
            .map(|t| t.command_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.command_name())
    }
}

/// Errors from extraction backends.
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("Extraction tool not found: {0}")]
    NotAvailable(String),

    #[error("Extraction timed out after {0:?}")]
    Timeout(Duration),

    #[error("Exit code {code}: {}", truncate_stderr(stderr))]
    ExitCode { code: i32, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

fn truncate_stderr(stderr: &str) -> String {
    const MAX_LEN: usize = 200;
    let trimmed = stderr.trim();
    if trimmed.chars().count() <= MAX_LEN {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(MAX_LEN).collect();
        format!("{}...", head)
    }
}

/// Spawn `cmd` and wait for it, mapping the outcome to an [`ExtractorResult`].
///
/// Stdout is discarded (unzip lists every member) and stderr is captured for
/// the error message.
pub(crate) fn run_tool(mut cmd: Command, timeout: Option<Duration>) -> ExtractorResult<()> {
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::piped());

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ExtractorError::NotAvailable(
                cmd.get_program().to_string_lossy().into_owned(),
            ));
        }
        Err(e) => return Err(ExtractorError::Io(e)),
    };
    match wait_with_timeout(&mut child, timeout) {
        Ok((status, _)) if status.success() => Ok(()),
        Ok((status, stderr)) => Err(ExtractorError::ExitCode {
            code: status.code().unwrap_or(-1),
            stderr,
        }),
        Err(e) if e.kind() == io::ErrorKind::TimedOut => {
            Err(ExtractorError::Timeout(timeout.unwrap_or_default()))
        }
        Err(e) => Err(ExtractorError::Io(e)),
    }
}

/// Wait for a child process, optionally bounded by `timeout`.
///
/// Stderr is drained on a helper thread so a chatty tool cannot fill the pipe
/// and stall. On timeout the child is killed and reaped.
pub(crate) fn wait_with_timeout(
    child: &mut Child,
    timeout: Option<Duration>,
) -> io::Result<(ExitStatus, String)> {
    let stderr_reader = child.stderr.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf).ok();
            String::from_utf8_lossy(&buf).into_owned()
        })
    });
    let collect_stderr = |reader: Option<thread::JoinHandle<String>>| {
        reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default()
    };

    let Some(timeout) = timeout else {
        let status = child.wait()?;
        return Ok((status, collect_stderr(stderr_reader)));
    };

    let start = Instant::now();
    let poll_interval = Duration::from_millis(50);

    loop {
        match child.try_wait()? {
            Some(status) => return Ok((status, collect_stderr(stderr_reader))),
            None => {
                if start.elapsed() >= timeout {
                    // Kill and reap to prevent zombie process
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        "Process timed out",
                    ));
                }
                thread::sleep(poll_interval);
            }
        }
    }
}

/// Check if a command exists on PATH.
pub fn command_exists(command: &str) -> bool {
    #[cfg(windows)]
    let lookup_cmd = "where";
    #[cfg(not(windows))]
    let lookup_cmd = "which";

    Command::new(lookup_cmd)
        .arg(command)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
