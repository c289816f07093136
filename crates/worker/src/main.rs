//! `shetran-worker` -- runs one SHETRAN/UDM simulation for a catchment.
//!
//! Stages the catchment's inputs from `{DATA_PATH}/inputs`, runs the
//! land-cover converter, SHETRAN prepare and SHETRAN, and writes
//! `{DATA_PATH}/outputs/metadata.json`. A plain-text run log is written to
//! `{DATA_PATH}/outputs/logfile.txt`.
//!
//! # Environment variables
//!
//! | Variable              | Required | Default          | Description                              |
//! |-----------------------|----------|------------------|------------------------------------------|
//! | `DATA_PATH`           | no       | `/data`          | Root of `inputs/` and `outputs/`         |
//! | `CATCHMENT_NAME`      | yes      | --               | Numeric catchment code                   |
//! | `NFM_SCENARIO`        | no       | none             | `max` or `balanced`                      |
//! | `UDM_SCENARIO`        | no       | `Baseline`       | Land-cover variant                       |
//! | `CLIMATE_SCENARIO`    | yes      | --               | Climate archive selector, e.g. `rcp85`   |
//! | `TITLE`               | no       | `SHETRAN output` | Title written into `metadata.json`       |
//! | `TOOLS_DIR`           | no       | `.`              | Directory holding the SHETRAN binaries   |
//! | `CONVERTER_THRESHOLD` | no       | `200000`         | First catchment code using CEH2Types     |
//! | `TOOL_TIMEOUT_SECS`   | no       | --               | Kill a tool after this many seconds      |
//!
//! Exit status is `0` on success, `1` if the run failed and `2` if the
//! configuration is invalid.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shetran_worker=info,shetran_pipeline=info,shetran_core=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match shetran_worker::run_from_env().await {
        Ok(summary) => {
            tracing::info!(
                converter = summary.converter.binary_name(),
                rundata = %summary.rundata_file.display(),
                "Run finished",
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            ExitCode::from(e.exit_status())
        }
    }
}
