//! Inspection of APEX payload images.
//!
//! `deapexer-core` extracts the raw filesystem image from an APEX container,
//! lists its directories through `debugfs`, and compares the regular files
//! it holds with an expected allow-list.
//!
//! # Examples
//!
//! ```no_run
//! use deapexer_core::Allowlist;
//! use deapexer_core::ApexImage;
//! use deapexer_core::Debugfs;
//! use deapexer_core::collect_contents;
//! use deapexer_core::diff_contents;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = ApexImage::open("com.android.foo.apex", Debugfs::from_env()?)?;
//! let contents = collect_contents(&image.root()?)?;
//!
//! let allowlist = Allowlist::read("com.android.foo_allowlist.txt")?;
//! for path in diff_contents(&contents, &allowlist) {
//!     println!("unexpected: {path}");
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod diff;
pub mod directory;
pub mod entry;
pub mod error;
pub mod image;
pub mod listing;
#[doc(hidden)]
pub mod test_utils;
pub mod tool;

pub use diff::Allowlist;
pub use diff::collect_contents;
pub use diff::diff_contents;
pub use directory::ImageDirectory;
pub use directory::Walk;
pub use entry::EntryKind;
pub use entry::ImageEntry;
pub use error::DeapexError;
pub use error::Result;
pub use image::ApexImage;
pub use image::PAYLOAD_MEMBER;
pub use listing::parse_listing;
pub use tool::Debugfs;
pub use tool::HOST_OUT_ENV;
pub use tool::ListingTool;
