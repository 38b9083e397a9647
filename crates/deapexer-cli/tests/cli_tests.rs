//! Integration tests for deapexer-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use deapexer_core::test_utils::create_test_zip;
use deapexer_core::test_utils::write_test_apex;
use predicates::prelude::*;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

fn deapexer_cmd() -> Command {
    cargo_bin_cmd!("deapexer")
}

/// Test workspace holding a sample APEX, a fake host output directory and a
/// private temp directory for the extraction.
struct Workspace {
    temp: TempDir,
    apex: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().expect("failed to create temp dir");
        let apex = write_test_apex(temp.path(), b"ext4 image");
        std::fs::create_dir_all(temp.path().join("tmp")).unwrap();
        #[cfg(unix)]
        deapexer_core::test_utils::write_fake_debugfs(&temp.path().join("host"));
        Self { temp, apex }
    }

    fn host_out(&self) -> PathBuf {
        self.temp.path().join("host")
    }

    fn tmp(&self) -> PathBuf {
        self.temp.path().join("tmp")
    }

    fn write_allowlist(&self, text: &str) -> PathBuf {
        let path = self.temp.path().join("allowlist.txt");
        std::fs::write(&path, text).unwrap();
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = deapexer_cmd();
        cmd.env("ANDROID_HOST_OUT", self.host_out())
            .env("TMPDIR", self.tmp())
            .env_remove("RUST_LOG");
        cmd
    }
}

fn is_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path).unwrap().next().is_none()
}

#[test]
fn test_version_flag() {
    deapexer_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("deapexer"));
}

#[test]
fn test_help_flag() {
    deapexer_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("APEX"))
        .stdout(predicate::str::contains("ALLOWLIST"));
}

#[test]
fn test_missing_apex_argument() {
    deapexer_cmd().assert().failure();
}

#[test]
fn test_missing_host_out_env() {
    let ws = Workspace::new();

    deapexer_cmd()
        .env_remove("ANDROID_HOST_OUT")
        .arg(&ws.apex)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ANDROID_HOST_OUT"));
}

#[test]
fn test_nonexistent_apex() {
    let ws = Workspace::new();

    ws.cmd()
        .arg(ws.temp.path().join("nonexistent.apex"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_apex_without_payload() {
    let ws = Workspace::new();
    let apk = ws.temp.path().join("app.apk");
    std::fs::write(&apk, create_test_zip(&[("classes.dex", b"dex".as_slice())])).unwrap();

    ws.cmd()
        .arg(&apk)
        .assert()
        .failure()
        .stderr(predicate::str::contains("apex_payload.img"));
}

#[test]
fn test_flattened_apex_rejected() {
    let ws = Workspace::new();

    ws.cmd()
        .arg(ws.temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("flattened"));
}

#[test]
fn test_debugfs_not_found() {
    let ws = Workspace::new();

    ws.cmd()
        .env("ANDROID_HOST_OUT", ws.temp.path().join("no-host"))
        .arg(&ws.apex)
        .assert()
        .failure()
        .stderr(predicate::str::contains("debugfs"));
}

#[cfg(unix)]
#[test]
fn test_list_prints_regular_files() {
    let ws = Workspace::new();

    ws.cmd()
        .arg(&ws.apex)
        .assert()
        .success()
        .stdout("./a\n./sub/b\n");
}

#[cfg(unix)]
#[test]
fn test_list_removes_extracted_payload() {
    let ws = Workspace::new();

    ws.cmd().arg(&ws.apex).assert().success();

    assert!(is_empty_dir(&ws.tmp()));
}

#[cfg(unix)]
#[test]
fn test_diff_exact_allowlist_succeeds_silently() {
    let ws = Workspace::new();
    let allowlist = ws.write_allowlist("./sub/b\n./a\n./a\n");

    ws.cmd()
        .arg(&ws.apex)
        .arg(&allowlist)
        .assert()
        .success()
        .stdout("");
}

#[cfg(unix)]
#[test]
fn test_diff_reports_unexpected_entries() {
    let ws = Workspace::new();
    let allowlist = ws.write_allowlist("./a\n");
    let expected = format!(
        "{} contains following unexpected entries:\n./sub/b\n",
        ws.apex.display()
    );

    ws.cmd()
        .arg(&ws.apex)
        .arg(&allowlist)
        .assert()
        .code(1)
        .stdout(predicate::str::diff(expected));

    assert!(is_empty_dir(&ws.tmp()));
}

#[cfg(unix)]
#[test]
fn test_diff_empty_allowlist_reports_everything() {
    let ws = Workspace::new();
    let allowlist = ws.write_allowlist("");

    ws.cmd()
        .arg(&ws.apex)
        .arg(&allowlist)
        .assert()
        .failure()
        .stdout(predicate::str::contains("./a\n./sub/b\n"));
}

#[cfg(unix)]
#[test]
fn test_diff_missing_allowlist_file() {
    let ws = Workspace::new();

    ws.cmd()
        .arg(&ws.apex)
        .arg(ws.temp.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("allow-list"))
        .stdout("");
}
