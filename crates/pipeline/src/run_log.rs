//! Plain-text run log (`outputs/logfile.txt`).
//!
//! This is the artifact users download after a run, so it stays free of
//! timestamps and levels: one line per step, diagnostic `CHECK - ` lines,
//! and `FAIL` followed by the error on failure. Every line is also emitted
//! as a `tracing` event for the process log.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::{PipelineError, PipelineResult};

/// Header written when the log is created.
pub const LOG_HEADER: &str = "LOG FILE";

/// Marker line written before the error description of a failed run.
pub const FAIL_MARKER: &str = "FAIL";

#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    /// Create (or truncate) the log file and write the header.
    pub async fn create(path: &Path) -> PipelineResult<Self> {
        tokio::fs::write(path, format!("{LOG_HEADER}\n"))
            .await
            .map_err(PipelineError::io("create", path))?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line.
    ///
    /// A failed write is reported through `tracing` and otherwise ignored;
    /// losing a log line must not abort the simulation.
    pub async fn line(&self, text: impl AsRef<str>) {
        let text = text.as_ref();
        tracing::info!("{text}");

        if let Err(e) = self.append(text).await {
            tracing::warn!(error = %e, path = %self.path.display(), "Failed to append to run log");
        }
    }

    /// Record a failed run: the `FAIL` marker, then the error text.
    pub async fn fail(&self, error: &impl Display) {
        tracing::error!(error = %error, "Run failed");
        self.line(FAIL_MARKER).await;
        self.line(error.to_string()).await;
    }

    async fn append(&self, text: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path).await?;
        file.write_all(format!("{text}\n").as_bytes()).await?;
        file.flush().await
    }
}

/// Render names as a bracketed, single-quoted list: `['a', 'b']`.
pub fn quoted_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| format!("'{}'", item.as_ref()))
        .collect();
    format!("[{}]", quoted.join(", "))
}
