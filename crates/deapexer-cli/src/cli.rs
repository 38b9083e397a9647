//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deapexer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the APEX container
    #[arg(value_name = "APEX")]
    pub apex: PathBuf,

    /// Expected regular-file paths, one per line (enables diff mode)
    #[arg(value_name = "ALLOWLIST")]
    pub allowlist: Option<PathBuf>,
}
