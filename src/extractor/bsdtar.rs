//! libarchive `bsdtar` backend.
//!
//! Invokes `bsdtar -x -f <archive> -C <target>`. bsdtar overwrites existing
//! files by default and reads zip as well as tar formats.

use super::{command_exists, run_tool, Extractor, ExtractorResult};
use std::path::Path;
use std::process::Command;
use std::time::Duration;

/// Backend for the `bsdtar` CLI.
#[derive(Debug, Clone, Default)]
pub struct BsdtarExtractor {
    timeout: Option<Duration>,
    extra_args: Vec<String>,
}

impl BsdtarExtractor {
    /// Create a new bsdtar backend.
    pub fn new(timeout: Option<Duration>, extra_args: Vec<String>) -> Self {
        Self {
            timeout,
            extra_args,
        }
    }

    fn command() -> &'static str {
        "bsdtar"
    }

    pub(crate) fn build_command(&self, archive: &Path, target: &Path) -> Command {
        let mut cmd = Command::new(Self::command());
        cmd.arg("-x");
        cmd.args(&self.extra_args);
        cmd.arg("-f");
        cmd.arg(archive);
        cmd.arg("-C");
        cmd.arg(target);
        cmd
    }
}

impl Extractor for BsdtarExtractor {
    fn name(&self) -> &'static str {
        "bsdtar"
    }

    fn is_available(&self) -> bool {
        command_exists(Self::command())
    }

    fn extract(&self, archive: &Path, target: &Path) -> ExtractorResult<()> {
        run_tool(self.build_command(archive, target), self.timeout)
    }
}
