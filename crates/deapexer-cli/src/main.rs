//! Deapexer CLI - prints the contents of an APEX payload image or diffs them
//! against an allow-list.

mod cli;
mod commands;
mod error;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let formatter = output::create_formatter();

    match &cli.allowlist {
        Some(allowlist) => commands::diff::execute(&cli.apex, allowlist, &*formatter),
        None => commands::list::execute(&cli.apex, &*formatter),
    }
}
