//! Default command: extract every archive below `--src`

use anyhow::{anyhow, bail, Context, Result};
use std::path::Path;
use std::sync::Arc;

use unzipall::cli::ExtractArgs;
use unzipall::config::ExtractConfig;
use unzipall::{Config, ExtractError, ExtractOptions, Pipeline, ResultMap, ShutdownPolicy, ToolKind};

/// Run the extraction described by `args` and the user config.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &ExtractArgs) -> Result<()> {
    let config = Config::load()?;
    let settings = resolve(args, config.extract)?;

    let tool = settings.tool_kind();
    let extractor = tool.create_extractor(settings.timeout_duration(), settings.extra_args.clone());
    if !extractor.is_available() {
        bail!(
            "'{}' is not installed or not in PATH. Install it or pick another tool with --tool ({})",
            tool,
            ToolKind::supported_names()
        );
    }

    let pipeline = Pipeline::new(options(&settings), Arc::from(extractor));
    let extracted = pipeline.extract_all(&args.src, &args.dst).map_err(|e| {
        let context = failure_context(&e, &args.src);
        anyhow::Error::new(e).context(context)
    })?;

    if let Some(report) = render(&extracted, args)? {
        println!("{}", report);
    }
    Ok(())
}

/// Layer the CLI flags over the config section and validate the result.
///
/// Flags win over the config file, which wins over defaults.
pub fn resolve(args: &ExtractArgs, mut settings: ExtractConfig) -> Result<ExtractConfig> {
    if let Some(workers) = args.workers {
        settings.workers = workers;
    }
    if let Some(suffix) = &args.suffix {
        settings.suffix = suffix.clone();
    }
    if let Some(tool) = &args.tool {
        settings.tool = tool.clone();
    }
    if args.timeout.is_some() {
        settings.timeout = args.timeout;
    }
    if args.follow_links {
        settings.follow_links = true;
    }
    if args.drain {
        settings.shutdown = ShutdownPolicy::Drain;
    }

    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings: {}", e))?;
    Ok(settings)
}

/// Headline for a failed run; the error itself follows as the cause.
pub fn failure_context(err: &ExtractError, src: &Path) -> String {
    if err.is_task_failure() {
        "Stopped at the first archive that could not be extracted".to_string()
    } else {
        format!("Searching {} for archives failed", src.display())
    }
}

pub fn options(settings: &ExtractConfig) -> ExtractOptions {
    ExtractOptions {
        workers: settings.workers,
        walk: settings.walk_options(),
        shutdown: settings.shutdown,
    }
}

/// Format the outcome for stdout. Nothing is printed when no archive was
/// found, unless JSON was requested.
pub fn render(extracted: &ResultMap, args: &ExtractArgs) -> Result<Option<String>> {
    if args.json {
        let json = serde_json::to_string_pretty(extracted)
            .context("Failed to serialize extraction results")?;
        return Ok(Some(json));
    }
    if extracted.is_empty() {
        return Ok(None);
    }
    let noun = if extracted.len() == 1 {
        "archive"
    } else {
        "archives"
    };
    Ok(Some(format!(
        "Extracted {} {} into {}",
        extracted.len(),
        noun,
        args.dst.display()
    )))
}
