//! Climate archive extraction.

use std::fs::File;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::{PipelineError, PipelineResult};

/// Extract every entry of the zip at `archive` into `dest`.
///
/// Returns the relative paths of the files written. Entries whose names
/// would resolve outside `dest` abort the extraction.
pub async fn extract_zip(archive: &Path, dest: &Path) -> PipelineResult<Vec<PathBuf>> {
    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || extract_zip_blocking(&archive, &dest))
        .await
        .map_err(|e| PipelineError::Task(format!("Archive extraction task failed: {e}")))?
}

fn extract_zip_blocking(archive_path: &Path, dest: &Path) -> PipelineResult<Vec<PathBuf>> {
    let file = File::open(archive_path).map_err(PipelineError::io("open", archive_path))?;
    let mut archive = ZipArchive::new(file).map_err(|source| PipelineError::Archive {
        path: archive_path.to_path_buf(),
        source,
    })?;

    let mut extracted = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|source| PipelineError::Archive {
                path: archive_path.to_path_buf(),
                source,
            })?;

        let relative = entry
            .enclosed_name()
            .ok_or_else(|| PipelineError::UnsafeArchiveEntry {
                archive: archive_path.to_path_buf(),
                entry: entry.name().to_string(),
            })?;
        let target = dest.join(&relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&target).map_err(PipelineError::io("create", &target))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(PipelineError::io("create", parent))?;
        }
        let mut out = File::create(&target).map_err(PipelineError::io("create", &target))?;
        std::io::copy(&mut entry, &mut out).map_err(PipelineError::io("extract", &target))?;

        extracted.push(relative);
    }

    Ok(extracted)
}
