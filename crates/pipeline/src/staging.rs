//! Input staging: copy the catchment's inputs into the run folder.
//!
//! Rules, applied to every input whose name contains the catchment code:
//!
//! - NFM rasters for the selected scenario are copied with the scenario
//!   qualifier removed from their names.
//! - The UDM land-cover raster for the selected scenario is copied under
//!   the name the converter expects. A missing raster is reported in
//!   [`UdmCopy`] and the run carries on.
//! - The climate archive for the selected scenario is extracted in full.
//! - The autocalibrated library file and results table are copied under
//!   short names; a missing library aborts the run.
//! - Everything else that carries no scenario token is copied verbatim.
//!
//! Staging is not transactional: a failure part-way leaves whatever was
//! already copied in place.

use std::path::{Path, PathBuf};

use shetran_core::config::RunConfig;
use shetran_core::naming;
use shetran_core::scenario::NfmScenario;

use crate::archive;
use crate::artifacts;
use crate::error::{PipelineError, PipelineResult};
use crate::layout::RunLayout;
use crate::run_log::{quoted_list, RunLog};

/// Outcome of staging the UDM land-cover raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UdmCopy {
    Copied { source: PathBuf, target: PathBuf },
    /// The scenario's raster does not exist in the inputs.
    NotFound { source: PathBuf },
    /// The raster exists but copying it failed.
    Failed { source: PathBuf, reason: String },
}

impl UdmCopy {
    pub fn is_copied(&self) -> bool {
        matches!(self, Self::Copied { .. })
    }
}

/// What staging put into the run folder.
#[derive(Debug, Clone)]
pub struct StagingReport {
    /// `(input name, staged name)` for every NFM raster.
    pub nfm_files: Vec<(String, String)>,
    pub udm: UdmCopy,
    /// Paths of the extracted climate files, relative to the run folder.
    pub climate_files: Vec<PathBuf>,
    /// Input name of the autocalibrated library file.
    pub autocal_library: String,
    /// Inputs copied unchanged.
    pub verbatim_files: Vec<String>,
}

/// Stage every input the run needs. See the module docs for the rules.
pub async fn stage_inputs(
    config: &RunConfig,
    layout: &RunLayout,
    log: &RunLog,
) -> PipelineResult<StagingReport> {
    let catchment = &config.catchment;
    let catchment_files: Vec<String> = artifacts::list_file_names(&layout.inputs)
        .await?
        .into_iter()
        .filter(|name| naming::belongs_to_catchment(name, catchment))
        .collect();

    log.line(format!("CATCHMENT: {catchment}")).await;
    tracing::debug!(count = catchment_files.len(), "Catchment inputs selected");

    let nfm_files = stage_nfm(config.nfm, &catchment_files, layout, log).await?;
    let udm = stage_udm(config, layout, log).await;
    let climate_files = stage_climate(config, layout, log).await?;
    let autocal_library = stage_autocalibration(config, &catchment_files, layout, log).await?;

    let verbatim_files: Vec<String> = catchment_files
        .iter()
        .filter(|name| naming::is_verbatim_input(name))
        .cloned()
        .collect();
    for name in &verbatim_files {
        copy(&layout.inputs.join(name), &layout.run_folder.join(name)).await?;
    }
    log.line("STATUS - Copied files to run folder.").await;

    Ok(StagingReport {
        nfm_files,
        udm,
        climate_files,
        autocal_library,
        verbatim_files,
    })
}

/// Inputs tagged with the scenario's NFM token, paired with their staged
/// names. No scenario selects nothing.
pub fn select_nfm_files(scenario: NfmScenario, catchment_files: &[String]) -> Vec<(String, String)> {
    let Some(token) = scenario.file_token() else {
        return Vec::new();
    };
    catchment_files
        .iter()
        .filter(|name| name.contains(token))
        .map(|name| (name.clone(), naming::nfm_staged_name(name)))
        .collect()
}

async fn stage_nfm(
    scenario: NfmScenario,
    catchment_files: &[String],
    layout: &RunLayout,
    log: &RunLog,
) -> PipelineResult<Vec<(String, String)>> {
    let selected = select_nfm_files(scenario, catchment_files);
    let names: Vec<&str> = selected.iter().map(|(from, _)| from.as_str()).collect();
    log.line(format!("NFM DATA: {}", quoted_list(&names))).await;

    for (from, to) in &selected {
        copy(&layout.inputs.join(from), &layout.run_folder.join(to)).await?;
    }
    Ok(selected)
}

/// Copy the land-cover raster for the UDM scenario. Never fails the run.
async fn stage_udm(config: &RunConfig, layout: &RunLayout, log: &RunLog) -> UdmCopy {
    let source = layout
        .inputs
        .join(naming::udm_source_name(&config.catchment, &config.udm));
    let target = layout.run_folder.join(naming::udm_staged_name(&config.catchment));

    let source_exists = tokio::fs::try_exists(&source).await.unwrap_or(false);
    let run_folder_exists = tokio::fs::try_exists(&layout.run_folder).await.unwrap_or(false);

    log.line(format!("UDM SCENARIO: {}", config.udm)).await;
    log.line(format!("CHECK - UDM file name: {}", source.display())).await;
    log.line(format!("CHECK - UDM file exists: {source_exists}")).await;
    log.line(format!("CHECK - run_folder exists: {run_folder_exists}")).await;

    let outcome = if !source_exists {
        UdmCopy::NotFound { source }
    } else {
        match tokio::fs::copy(&source, &target).await {
            Ok(_) => UdmCopy::Copied { source, target },
            Err(e) => UdmCopy::Failed {
                source,
                reason: e.to_string(),
            },
        }
    };

    match &outcome {
        UdmCopy::Copied { target, .. } => {
            tracing::debug!(staged = %target.display(), "UDM land cover staged");
        }
        UdmCopy::NotFound { source } => {
            tracing::warn!(source = %source.display(), "UDM land cover not found, continuing");
            log.line(format!("WARNING - UDM file not found: {}", source.display())).await;
        }
        UdmCopy::Failed { source, reason } => {
            tracing::warn!(source = %source.display(), %reason, "UDM land cover copy failed, continuing");
            log.line(format!("WARNING - UDM file copy failed: {reason}")).await;
        }
    }
    outcome
}

async fn stage_climate(
    config: &RunConfig,
    layout: &RunLayout,
    log: &RunLog,
) -> PipelineResult<Vec<PathBuf>> {
    let archive_path = layout
        .inputs
        .join(naming::climate_archive_name(&config.catchment, &config.climate));
    let extracted = archive::extract_zip(&archive_path, &layout.run_folder).await?;
    log.line(format!(
        "STATUS - Extracted {} climate files from {}",
        extracted.len(),
        archive_path.display()
    ))
    .await;
    Ok(extracted)
}

/// Copy the autocalibrated library and results table. Returns the library's
/// input name.
async fn stage_autocalibration(
    config: &RunConfig,
    catchment_files: &[String],
    layout: &RunLayout,
    log: &RunLog,
) -> PipelineResult<String> {
    let catchment = &config.catchment;
    let library = catchment_files
        .iter()
        .find(|name| name.contains(naming::AUTOCAL_LIBRARY_TOKEN))
        .ok_or_else(|| PipelineError::AutocalLibraryMissing {
            catchment: catchment.to_string(),
        })?;

    let library_source = layout.inputs.join(library);
    log.line(format!(
        "CHECK - autocalibration library file exists: {}",
        tokio::fs::try_exists(&library_source).await.unwrap_or(false)
    ))
    .await;
    copy(
        &library_source,
        &layout
            .run_folder
            .join(naming::autocal_staged_name(library, catchment)),
    )
    .await?;

    copy(
        &layout.inputs.join(naming::results_source_name(catchment)),
        &layout.run_folder.join(naming::RESULTS_STAGED_NAME),
    )
    .await?;

    Ok(library.clone())
}

async fn copy(from: &Path, to: &Path) -> PipelineResult<()> {
    tokio::fs::copy(from, to)
        .await
        .map_err(PipelineError::io("copy", from))?;
    Ok(())
}
