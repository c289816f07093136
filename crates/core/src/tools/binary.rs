//! Binary executable executor.
//!
//! Runs a pre-compiled tool directly (not through a shell). Validates that
//! the file exists and has execute permissions before spawning.

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use super::executor::{ToolError, ToolExecutor, ToolInput, ToolOutput};
use super::subprocess;

/// Executor for the pre-built SHETRAN binaries.
pub struct BinaryExecutor;

impl ToolExecutor for BinaryExecutor {
    async fn execute(&self, program: &Path, input: ToolInput) -> Result<ToolOutput, ToolError> {
        let display = program.display().to_string();

        let metadata = tokio::fs::metadata(program)
            .await
            .map_err(|_| ToolError::NotFound(display.clone()))?;

        let mode = metadata.permissions().mode();
        if !metadata.is_file() || mode & 0o111 == 0 {
            return Err(ToolError::PermissionDenied(format!(
                "{display} is not executable (mode {mode:#o})"
            )));
        }

        let mut cmd = tokio::process::Command::new(program);
        subprocess::run_command(&mut cmd, input).await
    }
}
