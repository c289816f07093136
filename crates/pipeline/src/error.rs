use std::path::{Path, PathBuf};

use shetran_core::error::CoreError;

/// Errors that abort a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A configuration or tool error from `shetran_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read climate archive {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Climate archive {} contains an unsafe entry path: {entry}", archive.display())]
    UnsafeArchiveEntry { archive: PathBuf, entry: String },

    #[error("No *_autocal_Library* input found for catchment {catchment}")]
    AutocalLibraryMissing { catchment: String },

    #[error("*_LibraryFile_UDM.xml file missing in {}", run_folder.display())]
    LibraryFileMissing { run_folder: PathBuf },

    #[error("rundata_* file missing in {}", run_folder.display())]
    RunDataMissing { run_folder: PathBuf },

    #[error("Failed to serialize run metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl PipelineError {
    /// Adapter for `map_err` that attaches the failed action and path.
    pub fn io(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| Self::Io {
            action,
            path,
            source,
        }
    }
}

/// Convenience type alias for pipeline results.
pub type PipelineResult<T> = Result<T, PipelineError>;
