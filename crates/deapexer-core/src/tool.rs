//! External listing tool used to read directories of a payload image.

use std::env;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;
use tracing::warn;

use crate::DeapexError;
use crate::Result;

/// Environment variable naming the host output directory holding
/// `bin/debugfs`.
pub const HOST_OUT_ENV: &str = "ANDROID_HOST_OUT";

/// Produces the raw single-level listing of one directory of an image.
///
/// The returned text must follow the `debugfs -R "ls -l -p <dir>"` format
/// understood by [`parse_listing`](crate::parse_listing).
pub trait ListingTool {
    /// Lists `dir` inside the filesystem image at `image`.
    fn list(&self, image: &Path, dir: &str) -> Result<String>;
}

/// `debugfs` from e2fsprogs, invoked once per listed directory.
#[derive(Debug, Clone)]
pub struct Debugfs {
    binary: PathBuf,
}

impl Debugfs {
    /// Uses the `debugfs` binary at `binary`.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Resolves `$ANDROID_HOST_OUT/bin/debugfs`.
    ///
    /// # Errors
    ///
    /// Returns [`DeapexError::MissingEnv`] when the variable is unset.
    pub fn from_env() -> Result<Self> {
        let host_out =
            env::var_os(HOST_OUT_ENV).ok_or(DeapexError::MissingEnv { var: HOST_OUT_ENV })?;
        Ok(Self::new(PathBuf::from(host_out).join("bin").join("debugfs")))
    }

    /// Path of the binary that will be run.
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl ListingTool for Debugfs {
    fn list(&self, image: &Path, dir: &str) -> Result<String> {
        let request = format!("ls -l -p {dir}");
        debug!(tool = %self.binary.display(), %request, "running listing tool");

        let output = Command::new(&self.binary)
            .arg("-R")
            .arg(&request)
            .arg(image)
            .output()
            .map_err(|source| DeapexError::ExternalTool {
                tool: self.binary.clone(),
                source,
            })?;

        // Only stdout is trusted; a failing exit status does not abort the
        // listing.
        if !output.status.success() {
            warn!(
                tool = %self.binary.display(),
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                "listing tool exited unsuccessfully"
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_external_tool_error() {
        let tool = Debugfs::new("/nonexistent/deapexer/bin/debugfs");
        let err = tool
            .list(Path::new("payload.img"), ".")
            .expect_err("launch should fail");
        assert!(matches!(err, DeapexError::ExternalTool { .. }));
    }

    #[test]
    fn test_binary_path() {
        let tool = Debugfs::new("/out/host/linux-x86/bin/debugfs");
        assert_eq!(tool.binary(), Path::new("/out/host/linux-x86/bin/debugfs"));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_still_returns_stdout() {
        let tool = Debugfs::new("sh");
        // `sh -R ...` is rejected by the shell with a non-zero status and no
        // stdout; the call itself must still succeed.
        let text = tool.list(Path::new("payload.img"), ".").expect("sh should launch");
        assert!(text.is_empty());
    }
}
