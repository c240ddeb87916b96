//! Execution of the gh command-line tool.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::instrument;

use crate::errors::GhError;

/// Runs the `gh` binary and captures its output.
#[derive(Debug, Clone)]
pub struct GhExec {
    gh_path: PathBuf,
}

impl GhExec {
    /// Create a new executor using the `gh` found in PATH.
    ///
    /// # Errors
    ///
    /// Returns [`GhError::NotFound`] if gh is not installed.
    pub fn new() -> Result<Self, GhError> {
        let gh_path = which::which("gh").map_err(|_| GhError::NotFound)?;

        Ok(Self { gh_path })
    }

    /// Run gh with the given arguments and return its stdout bytes.
    ///
    /// # Errors
    ///
    /// Returns [`GhError::CommandFailed`] with the captured stderr text on a
    /// non-zero exit, or [`GhError::Io`] if the process cannot be spawned.
    #[instrument(skip(self), fields(args = ?args))]
    pub async fn run(&self, args: &[String]) -> Result<Vec<u8>, GhError> {
        let mut cmd = Command::new(&self.gh_path);
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GhError::CommandFailed {
                message: stderr.trim().to_string(),
                exit_code: output.status.code(),
            });
        }

        Ok(output.stdout)
    }
}
