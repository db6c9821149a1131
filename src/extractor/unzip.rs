//! Info-ZIP `unzip` backend.
//!
//! Invokes `unzip -o <archive> -d <target>`, overwriting existing files
//! without prompting.

use super::{command_exists, run_tool, Extractor, ExtractorResult};
use std::path::Path;
use std::process::Command;
use std::time::Duration;

/// Backend for the `unzip` CLI.
#[derive(Debug, Clone, Default)]
pub struct UnzipExtractor {
    /// Per-archive timeout (None = wait indefinitely).
    timeout: Option<Duration>,
    /// Extra CLI arguments inserted before the archive path.
    extra_args: Vec<String>,
}

impl UnzipExtractor {
    /// Create a new unzip backend.
    pub fn new(timeout: Option<Duration>, extra_args: Vec<String>) -> Self {
        Self {
            timeout,
            extra_args,
        }
    }

    fn command() -> &'static str {
        "unzip"
    }

    pub(crate) fn build_command(&self, archive: &Path, target: &Path) -> Command {
        let mut cmd = Command::new(Self::command());
        // -o: overwrite without prompting
        cmd.arg("-o");
        cmd.args(&self.extra_args);
        cmd.arg(archive);
        cmd.arg("-d");
        cmd.arg(target);
        cmd
    }
}

impl Extractor for UnzipExtractor {
    fn name(&self) -> &'static str {
        "unzip"
    }

    fn is_available(&self) -> bool {
        command_exists(Self::command())
    }

    fn extract(&self, archive: &Path, target: &Path) -> ExtractorResult<()> {
        run_tool(self.build_command(archive, target), self.timeout)
    }
}
