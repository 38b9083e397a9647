//! Test utilities for building APEX containers and faking the listing tool.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::HashSet;
use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;

use crate::DeapexError;
use crate::Result;
use crate::image::PAYLOAD_MEMBER;
use crate::tool::ListingTool;

/// Root listing of the sample image: file `a` (0644) and directory `sub`.
pub const SAMPLE_ROOT_LISTING: &str = "\
/2/040755/0/0/.//
/2/040755/0/0/..//
/12/100644/0/0/a/5/
/13/040755/0/0/sub//
";

/// Listing of `./sub` in the sample image: file `b` (0600).
pub const SAMPLE_SUB_LISTING: &str = "\
/13/040755/0/0/.//
/2/040755/0/0/..//
/14/100600/0/0/b/3/
";

/// Creates an in-memory ZIP archive from a list of entries.
///
/// Each entry is a tuple of (path, content). Files are stored uncompressed.
///
/// # Examples
///
/// ```
/// use deapexer_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(&[("apex_payload.img", b"img".as_slice())]);
/// ```
#[must_use]
pub fn create_test_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use zip::write::SimpleFileOptions;
    use zip::write::ZipWriter;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .unix_permissions(0o644);

    for (path, data) in entries {
        zip.start_file(*path, options).unwrap();
        zip.write_all(data).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Writes `dir/test.apex` holding a manifest and `payload` as the payload
/// image, and returns its path.
pub fn write_test_apex(dir: &Path, payload: &[u8]) -> PathBuf {
    let path = dir.join("test.apex");
    let data = create_test_zip(&[
        ("apex_manifest.pb", b"manifest".as_slice()),
        (PAYLOAD_MEMBER, payload),
    ]);
    std::fs::write(&path, data).unwrap();
    path
}

/// In-process stand-in for `debugfs` serving canned listings per path.
///
/// Paths without a listing produce empty output. Every request is recorded
/// and can be inspected through [`FakeDebugfs::calls`].
#[derive(Debug, Default)]
pub struct FakeDebugfs {
    listings: HashMap<String, String>,
    failing: HashSet<String>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl FakeDebugfs {
    /// Creates a tool with no listings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `text` when `dir` is listed.
    #[must_use]
    pub fn with_listing(mut self, dir: &str, text: &str) -> Self {
        self.listings.insert(dir.to_owned(), text.to_owned());
        self
    }

    /// Fails to launch when `dir` is listed.
    #[must_use]
    pub fn failing_on(mut self, dir: &str) -> Self {
        self.failing.insert(dir.to_owned());
        self
    }

    /// Shared log of the listed paths, in request order.
    #[must_use]
    pub fn calls(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.calls)
    }
}

impl ListingTool for FakeDebugfs {
    fn list(&self, _image: &Path, dir: &str) -> Result<String> {
        self.calls.borrow_mut().push(dir.to_owned());
        if self.failing.contains(dir) {
            return Err(DeapexError::ExternalTool {
                tool: PathBuf::from("fake-debugfs"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "simulated failure"),
            });
        }
        Ok(self.listings.get(dir).cloned().unwrap_or_default())
    }
}

/// Fake tool serving the sample image (`./a`, `./sub/b`).
#[must_use]
pub fn sample_listing_tool() -> FakeDebugfs {
    FakeDebugfs::new()
        .with_listing(".", SAMPLE_ROOT_LISTING)
        .with_listing("./sub", SAMPLE_SUB_LISTING)
}

/// Installs a `bin/debugfs` shell script under `host_out` that serves the
/// sample image listings, and returns the script path.
///
/// The script fails when the payload image argument does not exist, and
/// prints a version banner on stderr like the real tool.
#[cfg(unix)]
pub fn write_fake_debugfs(host_out: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let bin = host_out.join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    let script = bin.join("debugfs");
    let body = format!(
        "#!/bin/sh\n\
         echo 'debugfs 1.47.0 (5-Feb-2023)' >&2\n\
         [ \"$1\" = \"-R\" ] || exit 1\n\
         [ -f \"$3\" ] || exit 1\n\
         case \"$2\" in\n\
         \"ls -l -p .\") printf '%s' '{SAMPLE_ROOT_LISTING}' ;;\n\
         \"ls -l -p ./sub\") printf '%s' '{SAMPLE_SUB_LISTING}' ;;\n\
         esac\n"
    );
    std::fs::write(&script, body).unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}
