//! unzipall Library
//!
//! Finds every archive below a source directory and extracts each one into a
//! destination tree that mirrors the archive's relative location, using a
//! fixed pool of workers that stops at the first failure.
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use unzipall::{ExtractOptions, Pipeline, ToolKind};
//!
//! let extractor = Arc::from(ToolKind::Unzip.create_extractor(None, Vec::new()));
//! let pipeline = Pipeline::new(ExtractOptions::default(), extractor);
//! let extracted = pipeline.extract_all(Path::new("downloads"), Path::new("out"))?;
//! for (archive, target) in &extracted {
//!     println!("{} -> {}", archive.display(), target.display());
//! }
//! # Ok::<(), unzipall::ExtractError>(())
//! ```

pub mod cli;
pub mod config;
pub mod extractor;
pub mod pipeline;

pub use config::Config;
pub use extractor::{
    command_exists, DirectoryCreator, Extractor, ExtractorError, FsDirectoryCreator, ToolKind,
};
pub use pipeline::{
    extraction_target, ExtractError, ExtractOptions, Pipeline, ResultMap, ShutdownPolicy,
    WalkOptions,
};
