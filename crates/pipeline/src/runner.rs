//! Pipeline orchestration.
//!
//! [`run`] executes one complete run in order: prepare the output tree,
//! stage inputs, convert land cover, prepare and run SHETRAN, then write the
//! metadata document. Each step is awaited before the next starts.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use shetran_core::config::RunConfig;
use shetran_core::error::CoreError;
use shetran_core::metadata::RunMetadata;
use shetran_core::tools::{Tool, ToolExecutor, ToolInput, ToolOutput};

use crate::artifacts;
use crate::error::{PipelineError, PipelineResult};
use crate::layout::RunLayout;
use crate::run_log::{quoted_list, RunLog};
use crate::staging::{self, StagingReport};

/// Number of trailing stdout/stderr lines traced per tool run.
const OUTPUT_TAIL_LINES: usize = 20;

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub layout: RunLayout,
    pub staging: StagingReport,
    pub converter: Tool,
    pub library_file: PathBuf,
    pub rundata_file: PathBuf,
    pub metadata: RunMetadata,
}

/// Recreate `outputs/` under `data_path` and open a fresh run log.
///
/// Needs nothing but the data path, so it can run before the rest of the
/// configuration is validated and a bad configuration still leaves a
/// `FAIL` log behind.
pub async fn start_run(data_path: &Path) -> PipelineResult<(RunLayout, RunLog)> {
    let layout = RunLayout::new(data_path);
    layout.recreate_outputs().await?;
    let log = RunLog::create(&layout.log_file).await?;
    Ok((layout, log))
}

/// Execute one full run for `config`, invoking tools through `executor`.
///
/// The previous `outputs/` tree is removed first. Once the run log exists,
/// any failure is recorded in it (`FAIL` + description) before the error
/// is returned.
pub async fn run<E: ToolExecutor>(config: &RunConfig, executor: &E) -> PipelineResult<RunSummary> {
    let (layout, log) = start_run(&config.data_path).await?;
    run_started(config, layout, &log, executor).await
}

/// Execute the run steps in an output tree prepared by [`start_run`].
pub async fn run_started<E: ToolExecutor>(
    config: &RunConfig,
    layout: RunLayout,
    log: &RunLog,
    executor: &E,
) -> PipelineResult<RunSummary> {
    tracing::info!(
        catchment = %config.catchment,
        nfm = config.nfm.as_str(),
        udm = %config.udm,
        climate = %config.climate,
        "Starting SHETRAN run",
    );

    match run_steps(config, layout, log, executor).await {
        Ok(summary) => {
            tracing::info!(
                metadata = %summary.layout.metadata_file.display(),
                "SHETRAN run complete",
            );
            Ok(summary)
        }
        Err(e) => {
            log.fail(&e).await;
            Err(e)
        }
    }
}

async fn run_steps<E: ToolExecutor>(
    config: &RunConfig,
    layout: RunLayout,
    log: &RunLog,
    executor: &E,
) -> PipelineResult<RunSummary> {
    let staging = staging::stage_inputs(config, &layout, log).await?;

    let converter = Tool::converter_for(&config.catchment, config.converter_threshold)?;
    let converter_input = layout.run_folder.join(config.catchment.as_str());
    log.line(format!(
        "STATUS - running UDM using: {} {}",
        converter.path_in(&config.tools_dir).display(),
        converter_input.display()
    ))
    .await;
    invoke(executor, config, log, converter, vec![converter_input.into()]).await?;

    let library_file = artifacts::find_library_file(&layout.run_folder).await?;

    log.line(format!("STATUS - Preparing {}", library_file.display())).await;
    invoke(executor, config, log, Tool::Prepare, vec![library_file.clone().into()]).await?;

    log.line("STATUS - running SHETRAN simulation").await;
    let rundata_files = artifacts::find_rundata_files(&layout.run_folder).await?;
    let listed: Vec<String> = rundata_files
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    log.line(quoted_list(&listed)).await;
    let rundata_file = rundata_files
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::RunDataMissing {
            run_folder: layout.run_folder.clone(),
        })?;
    invoke(
        executor,
        config,
        log,
        Tool::Simulation,
        vec![OsString::from("-f"), rundata_file.clone().into()],
    )
    .await?;

    let metadata = RunMetadata::now(&config.title);
    let json = metadata.to_json_pretty()?;
    tokio::fs::write(&layout.metadata_file, json)
        .await
        .map_err(PipelineError::io("write", &layout.metadata_file))?;
    log.line(format!("STATUS - Wrote {}", layout.metadata_file.display())).await;

    Ok(RunSummary {
        layout,
        staging,
        converter,
        library_file,
        rundata_file,
        metadata,
    })
}

/// Run one tool and wait for it.
///
/// A non-zero exit status is logged but does not fail the step: the tools
/// are judged by the files they leave behind, which the next step looks up.
async fn invoke<E: ToolExecutor>(
    executor: &E,
    config: &RunConfig,
    log: &RunLog,
    tool: Tool,
    args: Vec<OsString>,
) -> PipelineResult<ToolOutput> {
    let program = tool.path_in(&config.tools_dir);
    let input = ToolInput::with_args(args).timeout(config.tool_timeout);

    let output = executor
        .execute(&program, input)
        .await
        .map_err(CoreError::from)?;

    tracing::debug!(
        tool = tool.binary_name(),
        stdout = %tail(&output.stdout, OUTPUT_TAIL_LINES),
        stderr = %tail(&output.stderr, OUTPUT_TAIL_LINES),
        "Tool output",
    );

    if output.success() {
        tracing::info!(
            tool = tool.binary_name(),
            duration_ms = output.duration_ms,
            "Tool finished",
        );
    } else {
        tracing::warn!(
            tool = tool.binary_name(),
            exit_code = output.exit_code,
            duration_ms = output.duration_ms,
            "Tool exited with non-zero status",
        );
        log.line(format!(
            "WARNING - {} exited with code {}",
            tool.binary_name(),
            output.exit_code
        ))
        .await;
    }

    Ok(output)
}

/// Last `n` lines of `text`.
fn tail(text: &str, n: usize) -> &str {
    let trimmed = text.trim_end();
    match trimmed.rmatch_indices('\n').nth(n.saturating_sub(1)) {
        Some((idx, _)) if n > 0 => &trimmed[idx + 1..],
        _ if n == 0 => "",
        _ => trimmed,
    }
}
