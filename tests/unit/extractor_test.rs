//! Unit tests for the command-line extractors

use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

use unzipall::{ExtractorError, ToolKind};

#[test]
fn unzip_reports_corrupt_archive_as_exit_code() {
    if !unzipall::command_exists("unzip") {
        return;
    }
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("broken.zip");
    fs::write(&archive, "garbage").unwrap();

    let extractor = ToolKind::Unzip.create_extractor(Some(Duration::from_secs(30)), Vec::new());
    let err = extractor
        .extract(&archive, &temp.path().join("out"))
        .unwrap_err();
    assert!(matches!(err, ExtractorError::ExitCode { .. }), "got {:?}", err);
}

#[test]
fn missing_archive_is_an_error() {
    if !unzipall::command_exists("unzip") {
        return;
    }
    let temp = TempDir::new().unwrap();
    let extractor = ToolKind::Unzip.create_extractor(None, Vec::new());
    assert!(extractor
        .extract(Path::new("/definitely/not/here.zip"), temp.path())
        .is_err());
}
