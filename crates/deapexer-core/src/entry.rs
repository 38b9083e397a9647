//! Directory entries reported for a payload image.

use std::fmt;

/// Kind of an entry in a payload image.
///
/// # Examples
///
/// ```
/// use deapexer_core::EntryKind;
///
/// assert_eq!(EntryKind::from_mode_type('4'), EntryKind::Directory);
/// assert_eq!(EntryKind::from_mode_type('2'), EntryKind::Symlink);
/// assert_eq!(EntryKind::from_mode_type('0'), EntryKind::File);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file (anything that is neither a directory nor a symlink).
    File,

    /// Directory entry.
    Directory,

    /// Symbolic link entry.
    Symlink,
}

impl EntryKind {
    /// Maps the type digit of an octal inode mode to an entry kind.
    ///
    /// The digit is the second character of a six-digit mode such as
    /// `040755`: `'4'` is a directory, `'2'` a symlink, anything else is
    /// treated as a regular file.
    #[must_use]
    pub const fn from_mode_type(c: char) -> Self {
        match c {
            '4' => Self::Directory,
            '2' => Self::Symlink,
            _ => Self::File,
        }
    }

    /// Type character used in `ls -l` style mode strings.
    #[must_use]
    pub const fn type_char(self) -> char {
        match self {
            Self::Directory => 'd',
            Self::Symlink => 'l',
            Self::File => '-',
        }
    }
}

/// One row of a directory listing inside a payload image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    name: String,
    parent: String,
    permissions: u32,
    kind: EntryKind,
}

impl ImageEntry {
    /// Creates an entry. Permission bits outside `0o777` are dropped.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        parent: impl Into<String>,
        permissions: u32,
        kind: EntryKind,
    ) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
            permissions: permissions & 0o777,
            kind,
        }
    }

    /// Entry name (a single path segment).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the directory holding this entry.
    #[must_use]
    pub fn parent(&self) -> &str {
        &self.parent
    }

    /// `parent + "/" + name`, e.g. `./bin/foo`.
    #[must_use]
    pub fn full_path(&self) -> String {
        format!("{}/{}", self.parent, self.name)
    }

    /// Nine permission bits (owner, group, other).
    #[must_use]
    pub const fn permissions(&self) -> u32 {
        self.permissions
    }

    /// Entry kind.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    /// Returns `true` for symlinks.
    #[must_use]
    pub const fn is_symlink(&self) -> bool {
        matches!(self.kind, EntryKind::Symlink)
    }

    /// Returns `true` for anything that is neither a directory nor a symlink.
    #[must_use]
    pub const fn is_regular_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }

    /// Returns `true` for the `.` and `..` pseudo entries.
    #[must_use]
    pub fn is_dot_entry(&self) -> bool {
        self.name == "." || self.name == ".."
    }

    /// Ten-character mode string such as `drwxr-xr-x`.
    #[must_use]
    pub fn mode_string(&self) -> String {
        let mut out = String::with_capacity(10);
        out.push(self.kind.type_char());
        for shift in [6, 3, 0] {
            let mask = (self.permissions >> shift) & 0o7;
            out.push(if mask & 4 != 0 { 'r' } else { '-' });
            out.push(if mask & 2 != 0 { 'w' } else { '-' });
            out.push(if mask & 1 != 0 { 'x' } else { '-' });
        }
        out
    }
}

impl fmt::Display for ImageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.mode_string(), self.name)
    }
}
