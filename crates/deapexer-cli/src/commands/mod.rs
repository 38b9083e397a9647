//! List and diff command implementations.

pub mod diff;
pub mod list;

use std::path::Path;

use anyhow::Result;
use deapexer_core::ApexImage;
use deapexer_core::Debugfs;
use deapexer_core::collect_contents;

use crate::error::add_apex_context;

/// Opens `apex` and collects the full paths of its regular files.
///
/// The extracted payload is removed before this returns.
fn apex_contents(apex: &Path) -> Result<Vec<String>> {
    let tool = add_apex_context(Debugfs::from_env(), apex)?;
    let image = add_apex_context(ApexImage::open(apex, tool), apex)?;
    let root = add_apex_context(image.root(), apex)?;
    add_apex_context(collect_contents(&root), apex)
}
