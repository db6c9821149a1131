//! unzipall - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use unzipall::cli::{Cli, Commands, ConfigCommands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        None => commands::extract::handle(&cli.extract),
        Some(Commands::Config(cmd)) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init => commands::config::handle_init(),
        },
        Some(Commands::Completions { shell }) => {
            commands::completions::generate_completions::<Cli>(shell)
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides the flag-derived filter.
fn setup_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "unzipall=debug,warn"
    } else if quiet {
        "warn"
    } else {
        "unzipall=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
