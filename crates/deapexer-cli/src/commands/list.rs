//! List command implementation

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use crate::output::OutputFormatter;

pub fn execute(apex: &Path, formatter: &dyn OutputFormatter) -> Result<ExitCode> {
    let contents = super::apex_contents(apex)?;

    formatter.format_contents(&contents)?;

    Ok(ExitCode::SUCCESS)
}
