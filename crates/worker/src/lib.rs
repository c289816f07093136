//! Process entry logic for `shetran-worker`.
//!
//! Kept out of `main.rs` so the exit-status mapping can be tested without
//! spawning the binary.

use shetran_core::config::{self, RunConfig};
use shetran_core::error::CoreError;
use shetran_core::tools::BinaryExecutor;
use shetran_pipeline::{PipelineError, RunSummary};

/// Exit status for a run that failed after configuration succeeded.
pub const EXIT_RUN_FAILED: u8 = 1;

/// Exit status for unusable configuration.
pub const EXIT_CONFIG_INVALID: u8 = 2;

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Invalid configuration: {0}")]
    Config(#[source] CoreError),

    #[error(transparent)]
    Run(#[from] PipelineError),
}

impl WorkerError {
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Config(_) => EXIT_CONFIG_INVALID,
            Self::Run(_) => EXIT_RUN_FAILED,
        }
    }
}

/// Resolve configuration from the environment and execute one run with the
/// real SHETRAN binaries.
pub async fn run_from_env() -> Result<RunSummary, WorkerError> {
    run_with_lookup(|key| std::env::var(key).ok()).await
}

/// Same as [`run_from_env`] but reading variables through `lookup`.
///
/// The output tree and run log are set up from `DATA_PATH` before anything
/// else is validated, so a configuration error still ends the log with
/// `FAIL` and leaves no stale results behind.
pub async fn run_with_lookup<F>(lookup: F) -> Result<RunSummary, WorkerError>
where
    F: Fn(&str) -> Option<String>,
{
    let data_path = config::data_path_from_lookup(&lookup);
    let (layout, log) = shetran_pipeline::start_run(&data_path).await?;

    let config = match RunConfig::from_lookup(&lookup) {
        Ok(config) => config,
        Err(e) => {
            log.fail(&e).await;
            return Err(WorkerError::Config(e));
        }
    };

    log_config(&config);
    Ok(shetran_pipeline::run_started(&config, layout, &log, &BinaryExecutor).await?)
}

/// Execute one run with the real SHETRAN binaries.
pub async fn run(config: &RunConfig) -> Result<RunSummary, WorkerError> {
    log_config(config);
    Ok(shetran_pipeline::run(config, &BinaryExecutor).await?)
}

fn log_config(config: &RunConfig) {
    tracing::info!(
        data_path = %config.data_path.display(),
        tools_dir = %config.tools_dir.display(),
        "Loaded run configuration",
    );
}
