//! Integration tests for deapexer-core.
//!
//! These tests open real zip containers on disk and, on unix, run a
//! `debugfs` stand-in script as an external process.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use deapexer_core::Allowlist;
use deapexer_core::ApexImage;
use deapexer_core::DeapexError;
use deapexer_core::collect_contents;
use deapexer_core::diff_contents;
use deapexer_core::test_utils::sample_listing_tool;
use deapexer_core::test_utils::write_test_apex;
use tempfile::TempDir;

#[test]
fn test_sample_image_contents() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let apex = write_test_apex(temp.path(), b"ext4 image");

    let image = ApexImage::open(&apex, sample_listing_tool()).unwrap();
    let contents = collect_contents(&image.root().unwrap()).unwrap();
    assert_eq!(contents, ["./a", "./sub/b"]);
}

#[test]
fn test_sample_image_diff_against_partial_allowlist() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let apex = write_test_apex(temp.path(), b"ext4 image");
    let allowlist_path = temp.path().join("allowlist.txt");
    std::fs::write(&allowlist_path, "./a\n").unwrap();

    let image = ApexImage::open(&apex, sample_listing_tool()).unwrap();
    let contents = collect_contents(&image.root().unwrap()).unwrap();
    let allowlist = Allowlist::read(&allowlist_path).unwrap();
    assert_eq!(diff_contents(&contents, &allowlist), ["./sub/b"]);
}

#[test]
fn test_workdir_cleaned_up_after_error() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let apex = write_test_apex(temp.path(), b"ext4 image");

    let workdir;
    {
        let image = ApexImage::open(&apex, sample_listing_tool().failing_on("./sub")).unwrap();
        workdir = image.workdir().to_path_buf();
        let err = collect_contents(&image.root().unwrap()).unwrap_err();
        assert!(matches!(err, DeapexError::ExternalTool { .. }));
    }
    assert!(!workdir.exists());
}

#[cfg(unix)]
#[test]
fn test_external_debugfs_process() {
    use deapexer_core::Debugfs;
    use deapexer_core::test_utils::write_fake_debugfs;

    let temp = TempDir::new().expect("failed to create temp dir");
    let apex = write_test_apex(temp.path(), b"ext4 image");
    let script = write_fake_debugfs(&temp.path().join("host"));

    let image = ApexImage::open(&apex, Debugfs::new(script)).unwrap();
    let root = image.root().unwrap();
    let rendered: Vec<String> = root.entries().iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        ["drwxr-xr-x .", "drwxr-xr-x ..", "-rw-r--r-- a", "drwxr-xr-x sub"]
    );
    assert_eq!(collect_contents(&root).unwrap(), ["./a", "./sub/b"]);
}
