//! Error conversion utilities for CLI.
//!
//! Converts deapexer-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use deapexer_core::DeapexError;
use deapexer_core::HOST_OUT_ENV;
use deapexer_core::PAYLOAD_MEMBER;
use std::path::Path;

/// Converts `DeapexError` to user-friendly anyhow error with context
pub fn convert_deapex_error(err: DeapexError, apex: &Path) -> anyhow::Error {
    match err {
        DeapexError::MissingEnv { var } => {
            anyhow!(
                "Cannot locate debugfs for '{}': {var} is not set\n\
                 HINT: Set {HOST_OUT_ENV} to the host output directory containing bin/debugfs \
                 (e.g. run `lunch` in an Android tree).",
                apex.display()
            )
        }
        DeapexError::ExternalTool { tool, source } => {
            anyhow!(
                "Failed to run '{}' while listing '{}': {source}\n\
                 HINT: Build the host debugfs binary (`m debugfs_static`) or check {HOST_OUT_ENV}.",
                tool.display(),
                apex.display()
            )
        }
        DeapexError::MissingPayload { member } => {
            anyhow!(
                "'{}' does not contain '{member}'\n\
                 HINT: Make sure the file is an APEX and not an APK or a compressed APEX.",
                apex.display()
            )
        }
        DeapexError::InvalidContainer(reason) => {
            anyhow!(
                "Invalid APEX '{}': {reason}\n\
                 HINT: The container may be corrupted or not a zip archive.",
                apex.display()
            )
        }
        DeapexError::FlattenedApex { path } => {
            anyhow!(
                "'{}' is a directory; flattened APEXes are not supported\n\
                 HINT: Pass the packaged .apex file that contains {PAYLOAD_MEMBER}.",
                path.display()
            )
        }
        DeapexError::AllowlistRead { path, source } => {
            anyhow!(
                "Cannot read allow-list '{}' for '{}': {source}",
                path.display(),
                apex.display()
            )
        }
        DeapexError::Io(io_err) => {
            anyhow!("I/O error while processing '{}': {io_err}", apex.display())
        }
    }
}

/// Adds APEX context to a core result
pub fn add_apex_context<T>(result: Result<T, DeapexError>, apex: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_deapex_error(e, apex))
}
