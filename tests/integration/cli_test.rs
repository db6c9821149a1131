//! Tests of the unzipall binary
//!
//! HOME points at a temp dir so the user's real config never leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use unzipall::command_exists;

use super::helpers::write_zip;

/// Put an `unzip` that always succeeds first on PATH, so runs that never
/// reach a real extraction do not depend on the host.
#[cfg(unix)]
fn with_stub_unzip(cmd: &mut Command, home: &TempDir) {
    use std::os::unix::fs::PermissionsExt;

    let bin = home.path().join("bin");
    fs::create_dir_all(&bin).unwrap();
    let stub = bin.join("unzip");
    fs::write(&stub, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

    let path = std::env::var_os("PATH").unwrap_or_default();
    let mut dirs = vec![bin];
    dirs.extend(std::env::split_paths(&path));
    cmd.env("PATH", std::env::join_paths(dirs).unwrap());
}

fn unzipall(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("unzipall").expect("binary is built");
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help, version, completions
// ============================================================================

#[test]
fn help_lists_extract_options() {
    let home = TempDir::new().unwrap();
    unzipall(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--src"))
        .stdout(predicate::str::contains("--dst"))
        .stdout(predicate::str::contains("--workers"));
}

#[test]
fn version_starts_with_package_version() {
    let home = TempDir::new().unwrap();
    unzipall(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "unzipall {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn completions_are_generated_for_bash() {
    let home = TempDir::new().unwrap();
    unzipall(&home)
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_unzipall"));
}

// ============================================================================
// Config subcommands
// ============================================================================

#[test]
fn config_path_lives_under_home() {
    let home = TempDir::new().unwrap();
    let expected = home.path().join(".config/unzipall/config.toml");
    unzipall(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy().to_string()));
}

#[test]
fn config_init_then_show_prints_defaults() {
    let home = TempDir::new().unwrap();
    unzipall(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(home.path().join(".config/unzipall/config.toml").exists());

    unzipall(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[extract]"))
        .stdout(predicate::str::contains("workers = 20"))
        .stdout(predicate::str::contains("shutdown = \"detach\""));
}

#[test]
fn invalid_config_file_is_reported() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config/unzipall");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "[extract]\nworkers = 500\n").unwrap();

    unzipall(&home)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

// ============================================================================
// Argument validation
// ============================================================================

#[test]
fn zero_workers_is_rejected() {
    let home = TempDir::new().unwrap();
    unzipall(&home)
        .args(["--workers", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("extract.workers must be > 0"));
}

#[test]
fn unknown_tool_is_rejected() {
    let home = TempDir::new().unwrap();
    unzipall(&home)
        .args(["--tool", "winrar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown tool 'winrar'"))
        .stderr(predicate::str::contains("unzip, 7z, bsdtar"));
}

#[test]
fn extract_flags_cannot_precede_subcommands() {
    let home = TempDir::new().unwrap();
    unzipall(&home)
        .args(["--src", "x", "config", "show"])
        .assert()
        .failure();
}

// ============================================================================
// Real extraction (needs `unzip` on PATH)
// ============================================================================

#[test]
fn extracts_real_archives_into_mirrored_tree() {
    if !command_exists("unzip") {
        eprintln!("skipping: unzip not installed");
        return;
    }
    let home = TempDir::new().unwrap();
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    write_zip(&src.path().join("foo.zip"), &[("hello.txt", "hello")]);
    write_zip(
        &src.path().join("bar/baz.zip"),
        &[("nested/deep.txt", "deep"), ("top.txt", "top")],
    );

    let output = unzipall(&home)
        .arg("--src")
        .arg(src.path())
        .arg("--dst")
        .arg(dst.path())
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let map: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(map.as_object().unwrap().len(), 2);
    assert_eq!(
        fs::read_to_string(dst.path().join("foo/hello.txt")).unwrap(),
        "hello"
    );
    assert_eq!(
        fs::read_to_string(dst.path().join("bar/baz/nested/deep.txt")).unwrap(),
        "deep"
    );
    assert_eq!(
        fs::read_to_string(dst.path().join("bar/baz/top.txt")).unwrap(),
        "top"
    );
    // Per-archive notices go to stderr
    assert!(String::from_utf8_lossy(&output.stderr).contains("Extracting"));
}

#[test]
fn existing_files_are_overwritten() {
    if !command_exists("unzip") {
        eprintln!("skipping: unzip not installed");
        return;
    }
    let home = TempDir::new().unwrap();
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    write_zip(&src.path().join("a.zip"), &[("file.txt", "new")]);
    fs::create_dir_all(dst.path().join("a")).unwrap();
    fs::write(dst.path().join("a/file.txt"), "old").unwrap();

    unzipall(&home)
        .arg("--src")
        .arg(src.path())
        .arg("--dst")
        .arg(dst.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted 1 archive"));

    assert_eq!(fs::read_to_string(dst.path().join("a/file.txt")).unwrap(), "new");
}

#[test]
fn corrupt_archive_fails_the_run() {
    if !command_exists("unzip") {
        eprintln!("skipping: unzip not installed");
        return;
    }
    let home = TempDir::new().unwrap();
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    write_zip(&src.path().join("good.zip"), &[("ok.txt", "ok")]);
    fs::write(src.path().join("broken.zip"), "this is not a zip file").unwrap();

    unzipall(&home)
        .arg("--src")
        .arg(src.path())
        .arg("--dst")
        .arg(dst.path())
        .arg("--drain")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("broken.zip"));
}

// ============================================================================
// Runs that need no real extraction tool
// ============================================================================

#[cfg(unix)]
#[test]
fn empty_tree_succeeds_quietly() {
    let home = TempDir::new().unwrap();
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    fs::write(src.path().join("notes.txt"), "not an archive").unwrap();

    let mut cmd = unzipall(&home);
    with_stub_unzip(&mut cmd, &home);
    cmd.arg("--src")
        .arg(src.path())
        .arg("--dst")
        .arg(dst.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No archive files found"));
}

#[cfg(unix)]
#[test]
fn unwritable_destination_still_names_the_task() {
    let home = TempDir::new().unwrap();
    let src = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();
    fs::write(src.path().join("a.zip"), "PK").unwrap();
    // A plain file where the destination directory should be
    let dst = scratch.path().join("blocked");
    fs::write(&dst, "not a directory").unwrap();

    let mut cmd = unzipall(&home);
    with_stub_unzip(&mut cmd, &home);
    cmd.arg("--src")
        .arg(src.path())
        .arg("--dst")
        .arg(&dst)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Extracting"))
        .stderr(predicate::str::contains("a.zip"))
        .stderr(predicate::str::contains("Failed to create"));
}
