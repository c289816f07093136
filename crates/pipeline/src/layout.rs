//! Filesystem layout of a run under `DATA_PATH`.
//!
//! ```text
//! {DATA_PATH}/
//!   inputs/                  read-only source data for every catchment
//!   outputs/                 recreated on every run
//!     logfile.txt
//!     metadata.json
//!     run_folder/            staged inputs + tool artifacts
//! ```

use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};

pub const INPUTS_DIR: &str = "inputs";
pub const OUTPUTS_DIR: &str = "outputs";
pub const RUN_FOLDER: &str = "run_folder";
pub const LOG_FILE: &str = "logfile.txt";
pub const METADATA_FILE: &str = "metadata.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLayout {
    pub inputs: PathBuf,
    pub outputs: PathBuf,
    pub run_folder: PathBuf,
    pub log_file: PathBuf,
    pub metadata_file: PathBuf,
}

impl RunLayout {
    pub fn new(data_path: &Path) -> Self {
        let outputs = data_path.join(OUTPUTS_DIR);
        Self {
            inputs: data_path.join(INPUTS_DIR),
            run_folder: outputs.join(RUN_FOLDER),
            log_file: outputs.join(LOG_FILE),
            metadata_file: outputs.join(METADATA_FILE),
            outputs,
        }
    }

    /// Remove any previous `outputs/` tree and create an empty one with its
    /// run folder.
    ///
    /// Destructive: results of an earlier run for the same data path are
    /// lost.
    pub async fn recreate_outputs(&self) -> PipelineResult<()> {
        if tokio::fs::try_exists(&self.outputs)
            .await
            .map_err(PipelineError::io("inspect", &self.outputs))?
        {
            tracing::warn!(outputs = %self.outputs.display(), "Removing previous outputs");
            tokio::fs::remove_dir_all(&self.outputs)
                .await
                .map_err(PipelineError::io("remove", &self.outputs))?;
        }

        tokio::fs::create_dir_all(&self.outputs)
            .await
            .map_err(PipelineError::io("create", &self.outputs))?;
        tokio::fs::create_dir(&self.run_folder)
            .await
            .map_err(PipelineError::io("create", &self.run_folder))?;
        Ok(())
    }
}
