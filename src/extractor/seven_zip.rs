//! 7-Zip backend.
//!
//! Invokes `7z x -y -o<target> <archive>`. 7-Zip takes the output directory
//! glued to the `-o` switch.

use super::{command_exists, run_tool, Extractor, ExtractorResult};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

/// Backend for the `7z` CLI.
#[derive(Debug, Clone, Default)]
pub struct SevenZipExtractor {
    timeout: Option<Duration>,
    extra_args: Vec<String>,
}

impl SevenZipExtractor {
    /// Create a new 7-Zip backend.
    pub fn new(timeout: Option<Duration>, extra_args: Vec<String>) -> Self {
        Self {
            timeout,
            extra_args,
        }
    }

    fn command() -> &'static str {
        "7z"
    }

    pub(crate) fn build_command(&self, archive: &Path, target: &Path) -> Command {
        let mut output_switch = OsString::from("-o");
        output_switch.push(target.as_os_str());

        let mut cmd = Command::new(Self::command());
        // x: extract with full paths, -y: assume yes (overwrite)
        cmd.args(["x", "-y"]);
        cmd.args(&self.extra_args);
        cmd.arg(output_switch);
        cmd.arg(archive);
        cmd
    }
}

impl Extractor for SevenZipExtractor {
    fn name(&self) -> &'static str {
        "7z"
    }

    fn is_available(&self) -> bool {
        command_exists(Self::command())
    }

    fn extract(&self, archive: &Path, target: &Path) -> ExtractorResult<()> {
        run_tool(self.build_command(archive, target), self.timeout)
    }
}
