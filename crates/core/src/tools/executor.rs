//! Unified external tool execution interface and shared types.
//!
//! Defines [`ToolExecutor`], the seam between the pipeline and the SHETRAN
//! executables, along with [`ToolInput`], [`ToolOutput`], and [`ToolError`].

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

/// Arguments and process settings for one tool invocation.
#[derive(Debug, Clone, Default)]
pub struct ToolInput {
    /// Command-line arguments, in order.
    pub args: Vec<OsString>,
    /// Additional environment variables set for the child process.
    pub env_vars: Vec<(String, String)>,
    /// Working directory for the child process (inherits ours if `None`).
    pub working_directory: Option<PathBuf>,
    /// Maximum wall-clock time before the process is killed. `None` waits
    /// for as long as the tool runs.
    pub timeout: Option<Duration>,
}

impl ToolInput {
    pub fn with_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Captured output from a tool run.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    /// Process exit code (`-1` if killed by signal).
    pub exit_code: i32,
    pub duration_ms: u64,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Errors that prevent a tool from running to completion.
///
/// A tool that runs and exits non-zero is *not* an error here; the exit
/// code is reported in [`ToolOutput`] and it is up to the caller to decide.
#[derive(Debug)]
pub enum ToolError {
    /// The executable was not found at the specified path.
    NotFound(String),
    /// The file exists but lacks execute permissions.
    PermissionDenied(String),
    /// The tool exceeded its configured timeout and was killed.
    Timeout {
        program: String,
        elapsed_ms: u64,
    },
    /// An I/O error occurred while spawning or waiting on the process.
    IoError(std::io::Error),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "Tool not found: {path}"),
            Self::PermissionDenied(path) => write!(f, "Permission denied: {path}"),
            Self::Timeout {
                program,
                elapsed_ms,
            } => {
                write!(f, "{program} timed out after {elapsed_ms}ms")
            }
            Self::IoError(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            _ => None,
        }
    }
}

/// Anything that can run an external tool on behalf of the pipeline.
///
/// The production implementation is [`super::binary::BinaryExecutor`];
/// tests substitute executors that fake the tools' side effects.
pub trait ToolExecutor: Send + Sync {
    /// Run `program` with `input` and wait for it to exit.
    fn execute(
        &self,
        program: &Path,
        input: ToolInput,
    ) -> impl std::future::Future<Output = Result<ToolOutput, ToolError>> + Send;
}
