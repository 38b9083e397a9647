//! APEX container handling: payload extraction and cached directory listings.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;

use tempfile::TempDir;
use tracing::debug;
use tracing::trace;
use zip::result::ZipError;

use crate::DeapexError;
use crate::Result;
use crate::directory::ImageDirectory;
use crate::entry::ImageEntry;
use crate::listing::parse_listing;
use crate::tool::ListingTool;

/// Name of the zip member holding the raw filesystem image.
pub const PAYLOAD_MEMBER: &str = "apex_payload.img";

/// Path of the image root as understood by the listing tool.
pub const ROOT_PATH: &str = ".";

/// An opened APEX container.
///
/// The payload image is extracted into a private temporary directory when
/// the container is opened. That directory and everything in it is removed
/// when the `ApexImage` is dropped, whichever way its scope is left.
///
/// Directory listings are produced by a [`ListingTool`] and cached per path
/// for the lifetime of the image.
///
/// # Examples
///
/// ```no_run
/// use deapexer_core::ApexImage;
/// use deapexer_core::Debugfs;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let image = ApexImage::open("com.android.foo.apex", Debugfs::from_env()?)?;
/// for entry in image.root()?.list(true) {
///     println!("{}", entry?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ApexImage {
    container: PathBuf,
    payload: PathBuf,
    tool: Box<dyn ListingTool>,
    cache: RefCell<HashMap<String, Rc<[ImageEntry]>>>,
    workdir: TempDir,
}

impl ApexImage {
    /// Opens `container` and extracts its payload image.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `container` is a directory (flattened APEX)
    /// - the file cannot be opened or is not a zip archive
    /// - the archive has no `apex_payload.img` member
    /// - the payload cannot be written to the temporary directory
    pub fn open<P, T>(container: P, tool: T) -> Result<Self>
    where
        P: AsRef<Path>,
        T: ListingTool + 'static,
    {
        let container = container.as_ref();
        if container.is_dir() {
            return Err(DeapexError::FlattenedApex {
                path: container.to_path_buf(),
            });
        }

        let workdir = tempfile::Builder::new().prefix("deapexer").tempdir()?;
        let payload = extract_payload(container, workdir.path())?;

        Ok(Self {
            container: container.to_path_buf(),
            payload,
            tool: Box::new(tool),
            cache: RefCell::new(HashMap::new()),
            workdir,
        })
    }

    /// Path of the container this image was opened from.
    #[must_use]
    pub fn container(&self) -> &Path {
        &self.container
    }

    /// Path of the extracted payload image.
    #[must_use]
    pub fn payload_path(&self) -> &Path {
        &self.payload
    }

    /// Temporary directory holding the extracted payload.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        self.workdir.path()
    }

    /// Returns the root directory of the image.
    pub fn root(&self) -> Result<ImageDirectory<'_>> {
        self.list_directory(ROOT_PATH)
    }

    /// Returns the listing of `path`, running the listing tool only the first
    /// time a path is requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing tool cannot be run.
    pub fn list_directory(&self, path: &str) -> Result<ImageDirectory<'_>> {
        let cached = self.cache.borrow().get(path).cloned();
        if let Some(entries) = cached {
            trace!(path, "directory listing cache hit");
            return Ok(ImageDirectory::new(self, path, entries));
        }

        let text = self.tool.list(&self.payload, path)?;
        let mut entries = parse_listing(path, &text);
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        debug!(path, entries = entries.len(), "listed directory");

        let entries: Rc<[ImageEntry]> = entries.into();
        self.cache
            .borrow_mut()
            .insert(path.to_owned(), Rc::clone(&entries));
        Ok(ImageDirectory::new(self, path, entries))
    }
}

impl fmt::Debug for ApexImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApexImage")
            .field("container", &self.container)
            .field("payload", &self.payload)
            .field("cached_paths", &self.cache.borrow().len())
            .finish_non_exhaustive()
    }
}

/// Copies the payload member of `container` into `dest`.
fn extract_payload(container: &Path, dest: &Path) -> Result<PathBuf> {
    let file = File::open(container)?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| DeapexError::InvalidContainer(format!("failed to open zip archive: {e}")))?;

    let mut member = match archive.by_name(PAYLOAD_MEMBER) {
        Ok(member) => member,
        Err(ZipError::FileNotFound) => {
            return Err(DeapexError::MissingPayload {
                member: PAYLOAD_MEMBER.to_string(),
            });
        }
        Err(e) => {
            return Err(DeapexError::InvalidContainer(format!(
                "failed to read {PAYLOAD_MEMBER}: {e}"
            )));
        }
    };

    let payload = dest.join(PAYLOAD_MEMBER);
    let mut writer = BufWriter::new(File::create(&payload)?);
    let bytes = std::io::copy(&mut member, &mut writer)?;
    writer.flush()?;

    debug!(
        container = %container.display(),
        payload = %payload.display(),
        bytes,
        "extracted payload image"
    );
    Ok(payload)
}
