//! Content collection and allow-list diffing.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::DeapexError;
use crate::Result;
use crate::directory::ImageDirectory;

/// Expected set of regular-file paths, one per line in a text file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allowlist {
    paths: HashSet<String>,
}

impl Allowlist {
    /// Reads an allow-list file. Trailing whitespace is stripped from every
    /// line; duplicates collapse.
    ///
    /// # Errors
    ///
    /// Returns [`DeapexError::AllowlistRead`] if the file cannot be read.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DeapexError::AllowlistRead {
            path: path.to_path_buf(),
            source,
        })?;
        let allowlist = Self::from_lines(text.lines());
        debug!(path = %path.display(), entries = allowlist.len(), "read allow-list");
        Ok(allowlist)
    }

    /// Builds an allow-list from individual lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use deapexer_core::Allowlist;
    ///
    /// let allowlist = Allowlist::from_lines(["./a  ", "./a", "./sub/b"]);
    /// assert_eq!(allowlist.len(), 2);
    /// assert!(allowlist.contains("./a"));
    /// ```
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            paths: lines
                .into_iter()
                .map(|line| line.as_ref().trim_end().to_owned())
                .collect(),
        }
    }

    /// Returns `true` if `path` is expected.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Number of distinct paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if the allow-list has no paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Collects the full paths of all regular files under `root`, in walk order.
///
/// Directories and symlinks are left out.
///
/// # Errors
///
/// Returns the first listing error met during the walk.
pub fn collect_contents(root: &ImageDirectory<'_>) -> Result<Vec<String>> {
    let mut contents = Vec::new();
    for entry in root.list(true) {
        let entry = entry?;
        if entry.is_regular_file() {
            contents.push(entry.full_path());
        }
    }
    Ok(contents)
}

/// Returns the paths of `contents` missing from `allowlist`, keeping their
/// order.
///
/// # Examples
///
/// ```
/// use deapexer_core::Allowlist;
/// use deapexer_core::diff_contents;
///
/// let contents = vec!["./a".to_string(), "./sub/b".to_string()];
/// let allowlist = Allowlist::from_lines(["./a"]);
/// assert_eq!(diff_contents(&contents, &allowlist), ["./sub/b"]);
/// ```
#[must_use]
pub fn diff_contents(contents: &[String], allowlist: &Allowlist) -> Vec<String> {
    contents
        .iter()
        .filter(|path| !allowlist.contains(path))
        .cloned()
        .collect()
}
