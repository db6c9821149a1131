//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::extractor::ToolKind;
use crate::pipeline::{ShutdownPolicy, WalkOptions, DEFAULT_SUFFIX, DEFAULT_WORKERS, MAX_WORKERS};

/// Longest per-archive timeout accepted, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extract: ExtractConfig,
}

impl Config {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), String> {
        self.extract.validate()
    }
}

/// Extraction configuration.
///
/// CLI flags take priority over these values, which override defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Number of parallel workers
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// File name suffix that marks an archive
    #[serde(default = "default_suffix")]
    pub suffix: String,
    /// Extraction tool ("unzip", "7z", "bsdtar")
    #[serde(default = "default_tool")]
    pub tool: String,
    /// Per-archive timeout in seconds (None = wait forever)
    #[serde(default)]
    pub timeout: Option<u64>,
    /// Extra arguments passed to the tool before the archive arguments
    #[serde(default)]
    pub extra_args: Vec<String>,
    /// Follow symbolic links while walking the source tree
    #[serde(default)]
    pub follow_links: bool,
    /// What to do with running extractions after a failure
    #[serde(default)]
    pub shutdown: ShutdownPolicy,
}

pub fn default_workers() -> usize {
    DEFAULT_WORKERS
}

pub fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

pub fn default_tool() -> String {
    ToolKind::Unzip.command_name().to_string()
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            suffix: default_suffix(),
            tool: default_tool(),
            timeout: None,
            extra_args: Vec::new(),
            follow_links: false,
            shutdown: ShutdownPolicy::default(),
        }
    }
}

impl ExtractConfig {
    /// Validate configuration values.
    ///
    /// Returns `Ok(())` if all values are within acceptable bounds,
    /// or an error describing the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("extract.workers must be > 0".to_string());
        }
        if self.workers > MAX_WORKERS {
            return Err(format!(
                "extract.workers {} exceeds maximum ({})",
                self.workers, MAX_WORKERS
            ));
        }
        if self.suffix.is_empty() {
            return Err("extract.suffix must not be empty".to_string());
        }
        if ToolKind::parse(&self.tool).is_none() {
            return Err(format!(
                "Unknown tool '{}'. Valid: {}",
                self.tool,
                ToolKind::supported_names()
            ));
        }
        if let Some(0) = self.timeout {
            return Err("extract.timeout must be > 0".to_string());
        }
        if let Some(t) = self.timeout {
            if t > MAX_TIMEOUT_SECS {
                return Err(format!(
                    "extract.timeout {} exceeds maximum ({}s)",
                    t, MAX_TIMEOUT_SECS
                ));
            }
        }
        Ok(())
    }

    /// The configured tool, falling back to `unzip` for unknown names.
    pub fn tool_kind(&self) -> ToolKind {
        ToolKind::parse(&self.tool).unwrap_or(ToolKind::Unzip)
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            suffix: self.suffix.clone(),
            follow_links: self.follow_links,
        }
    }
}
