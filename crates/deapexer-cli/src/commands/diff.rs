//! Diff command implementation

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use deapexer_core::Allowlist;
use deapexer_core::diff_contents;

use crate::error::add_apex_context;
use crate::output::OutputFormatter;

pub fn execute(apex: &Path, allowlist: &Path, formatter: &dyn OutputFormatter) -> Result<ExitCode> {
    let contents = super::apex_contents(apex)?;
    let allowlist = add_apex_context(Allowlist::read(allowlist), apex)?;

    let unexpected = diff_contents(&contents, &allowlist);
    if unexpected.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }

    formatter.format_unexpected(apex, &unexpected)?;

    // Exit non-zero without an error message
    Ok(ExitCode::FAILURE)
}
