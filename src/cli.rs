//! CLI definitions for unzipall
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be exercised by tests without spawning the binary.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::path::PathBuf;

/// Version string; non-release builds carry the git SHA.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VERGEN_GIT_SHA"), ")");
#[cfg(feature = "release")]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build clap styles for a consistent CLI appearance.
///
/// - Green: headers, usage, command names
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "unzipall")]
#[command(about = "Extract every archive in a directory tree, in parallel")]
#[command(long_about = "unzipall - Extract every archive in a directory tree, in parallel.

Every file ending in the configured suffix (default .zip) below --src is
extracted into --dst, mirroring its relative location. The archive
src/bar/baz.zip lands in dst/bar/baz/. The first failure stops the run
and is reported; nothing is reported as extracted in that case.

EXAMPLES:
    unzipall                              Extract everything below . into .
    unzipall --src downloads --dst out    Mirror downloads/ into out/
    unzipall -j 4 --tool 7z               Four workers, extract with 7z
    unzipall --json                       Print the archive -> target map

Settings are read from ~/.config/unzipall/config.toml; flags win.")]
#[command(version = VERSION)]
#[command(styles = build_cli_styles())]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(flatten)]
    pub extract: ExtractArgs,

    /// Show debug output (worker and cancellation details)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options of the default extract run.
#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Directory to search for archives
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub src: PathBuf,

    /// Directory to extract into
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dst: PathBuf,

    /// Number of parallel workers [config: extract.workers, default 20]
    #[arg(short = 'j', long, value_name = "N")]
    pub workers: Option<usize>,

    /// File name suffix that marks an archive [default: .zip]
    #[arg(long, value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Extraction tool: unzip, 7z or bsdtar [default: unzip]
    #[arg(long, value_name = "NAME")]
    pub tool: Option<String>,

    /// Kill an extraction that runs longer than this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Follow symbolic links while searching
    #[arg(long)]
    pub follow_links: bool,

    /// On failure, wait for running extractions before exiting
    #[arg(long)]
    pub drain: bool,

    /// Print the archive -> target map as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configuration management
    #[command(subcommand)]
    #[command(long_about = "View and initialize unzipall configuration.

Configuration is stored in ~/.config/unzipall/config.toml and holds the
[extract] defaults: workers, suffix, tool, timeout, extra_args,
follow_links and shutdown.

EXAMPLES:
    unzipall config show    Display the effective configuration
    unzipall config path    Print the config file location
    unzipall config init    Write the defaults to the config file")]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration if no file exists yet
    Init,
}
