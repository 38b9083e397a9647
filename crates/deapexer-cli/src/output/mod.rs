//! Output formatting module.

mod human;

use std::path::Path;

use anyhow::Result;

use human::HumanFormatter;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the regular-file listing of an APEX
    fn format_contents(&self, contents: &[String]) -> Result<()>;

    /// Format the paths missing from the allow-list
    fn format_unexpected(&self, apex: &Path, unexpected: &[String]) -> Result<()>;
}

/// Creates the stdout formatter
pub fn create_formatter() -> Box<dyn OutputFormatter> {
    Box::new(HumanFormatter::new())
}
