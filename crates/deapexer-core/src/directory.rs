//! Directory listings and the depth-first walk over a payload image.

use std::fmt;
use std::rc::Rc;

use crate::Result;
use crate::entry::ImageEntry;
use crate::image::ApexImage;

/// Sorted listing of one directory inside an [`ApexImage`].
///
/// Entries are ordered by name (byte order) and include the `.` and `..`
/// pseudo entries reported by the listing tool.
#[derive(Clone)]
pub struct ImageDirectory<'img> {
    image: &'img ApexImage,
    path: String,
    entries: Rc<[ImageEntry]>,
}

impl<'img> ImageDirectory<'img> {
    pub(crate) fn new(image: &'img ApexImage, path: &str, entries: Rc<[ImageEntry]>) -> Self {
        Self {
            image,
            path: path.to_owned(),
            entries,
        }
    }

    /// Path of this directory, e.g. `.` or `./lib`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Entries directly inside this directory.
    #[must_use]
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// Walks the entries of this directory.
    ///
    /// With `recursive`, every subdirectory other than `.` and `..` is
    /// listed right after its own entry, depth first. The walk is lazy:
    /// subdirectories are only listed when the iterator reaches them.
    ///
    /// A listing failure is yielded once and ends the walk.
    #[must_use]
    pub fn list(&self, recursive: bool) -> Walk<'img> {
        Walk {
            recursive,
            stack: vec![Frame {
                dir: self.clone(),
                next: 0,
            }],
            descend: None,
        }
    }

    /// Returns the listing of the subdirectory named by `entry`.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing tool cannot be run.
    pub fn enter_subdir(&self, entry: &ImageEntry) -> Result<ImageDirectory<'img>> {
        self.image.list_directory(&format!("{}/{}", self.path, entry.name()))
    }
}

impl fmt::Debug for ImageDirectory<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageDirectory")
            .field("path", &self.path)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

struct Frame<'img> {
    dir: ImageDirectory<'img>,
    next: usize,
}

/// Depth-first iterator returned by [`ImageDirectory::list`].
pub struct Walk<'img> {
    recursive: bool,
    stack: Vec<Frame<'img>>,
    // Directory entry yielded last, to be entered on the next step.
    descend: Option<ImageEntry>,
}

impl Iterator for Walk<'_> {
    type Item = Result<ImageEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(entry) = self.descend.take() {
            let parent = &self.stack.last()?.dir;
            match parent.enter_subdir(&entry) {
                Ok(dir) => self.stack.push(Frame { dir, next: 0 }),
                Err(err) => {
                    self.stack.clear();
                    return Some(Err(err));
                }
            }
        }

        loop {
            let frame = self.stack.last_mut()?;
            let Some(entry) = frame.dir.entries.get(frame.next).cloned() else {
                self.stack.pop();
                continue;
            };
            frame.next += 1;

            if self.recursive && entry.is_directory() && !entry.is_dot_entry() {
                self.descend = Some(entry.clone());
            }
            return Some(Ok(entry));
        }
    }
}
