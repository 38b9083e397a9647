//! Error types for APEX inspection.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `DeapexError`.
pub type Result<T> = std::result::Result<T, DeapexError>;

/// Errors that can occur while opening, listing, or diffing an APEX.
#[derive(Error, Debug)]
pub enum DeapexError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Container could not be read as a zip archive.
    #[error("invalid APEX container: {0}")]
    InvalidContainer(String),

    /// Container does not hold the payload image member.
    #[error("payload member '{member}' not found in container")]
    MissingPayload {
        /// Name of the member that was looked up.
        member: String,
    },

    /// Input is a flattened (directory) APEX, which is not supported.
    #[error("flattened APEX directories are not supported: {path}")]
    FlattenedApex {
        /// The directory that was passed as a container.
        path: PathBuf,
    },

    /// Required environment variable is not set.
    #[error("environment variable {var} is not set")]
    MissingEnv {
        /// Name of the variable.
        var: &'static str,
    },

    /// External listing tool could not be launched.
    #[error("failed to run {}: {source}", tool.display())]
    ExternalTool {
        /// Path of the tool binary.
        tool: PathBuf,
        /// Underlying launch error.
        #[source]
        source: std::io::Error,
    },

    /// Allow-list file could not be read.
    #[error("failed to read allow-list {}: {source}", path.display())]
    AllowlistRead {
        /// Path of the allow-list file.
        path: PathBuf,
        /// Underlying read error.
        #[source]
        source: std::io::Error,
    },
}

impl DeapexError {
    /// Returns `true` if this error originates from the APEX container
    /// itself rather than from the environment or the allow-list.
    ///
    /// # Examples
    ///
    /// ```
    /// use deapexer_core::DeapexError;
    ///
    /// let err = DeapexError::MissingPayload {
    ///     member: "apex_payload.img".to_string(),
    /// };
    /// assert!(err.is_container_error());
    ///
    /// let err = DeapexError::MissingEnv { var: "ANDROID_HOST_OUT" };
    /// assert!(!err.is_container_error());
    /// ```
    #[must_use]
    pub const fn is_container_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidContainer(_) | Self::MissingPayload { .. } | Self::FlattenedApex { .. }
        )
    }
}
