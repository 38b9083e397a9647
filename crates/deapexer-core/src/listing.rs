//! Parser for `debugfs` long listings with path prefixes (`ls -l -p`).
//!
//! Each record is printed as `/inode/mode/uid/gid/name/size/`, directories
//! leaving the size empty, so a well-formed line splits into exactly eight
//! `/`-separated fields with the name at index 5 and the octal mode at
//! index 2.

use tracing::trace;

use crate::entry::EntryKind;
use crate::entry::ImageEntry;

const FIELD_COUNT: usize = 8;
const MODE_FIELD: usize = 2;
const NAME_FIELD: usize = 5;

/// Parses listing output into entries whose parent is `parent`.
///
/// Lines that do not look like records are skipped without error.
///
/// # Examples
///
/// ```
/// use deapexer_core::parse_listing;
///
/// let text = "/2/040755/0/0/.//\n/12/100644/0/0/a/5/\n";
/// let entries = parse_listing(".", text);
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[1].full_path(), "./a");
/// ```
pub fn parse_listing(parent: &str, text: &str) -> Vec<ImageEntry> {
    text.lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let entry = parse_line(parent, line);
            if entry.is_none() {
                trace!(parent, line, "skipping unrecognized listing line");
            }
            entry
        })
        .collect()
}

fn parse_line(parent: &str, line: &str) -> Option<ImageEntry> {
    let fields: Vec<&str> = line.split('/').collect();
    if fields.len() != FIELD_COUNT {
        return None;
    }

    let name = fields[NAME_FIELD];
    if name.is_empty() {
        return None;
    }

    let (kind, permissions) = parse_mode(fields[MODE_FIELD])?;
    Some(ImageEntry::new(name, parent, permissions, kind))
}

/// Splits a six-digit octal mode such as `100644` into the entry kind and
/// the permission bits taken from the digits after index 3.
fn parse_mode(mode: &str) -> Option<(EntryKind, u32)> {
    let kind = EntryKind::from_mode_type(mode.chars().nth(1)?);
    let bits = mode.get(3..).filter(|bits| !bits.is_empty())?;
    let permissions = u32::from_str_radix(bits, 8).ok()?;
    Some((kind, permissions))
}
