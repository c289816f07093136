//! Lookup of files in a directory by name pattern.
//!
//! The external tools communicate only through files they leave in the run
//! folder. Listings are sorted by name so "the first match" is stable
//! across filesystems.

use std::path::{Path, PathBuf};

use shetran_core::naming;

use crate::error::{PipelineError, PipelineResult};

/// Names of the non-directory entries directly inside `dir`, sorted.
pub async fn list_file_names(dir: &Path) -> PipelineResult<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(PipelineError::io("list", dir))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(PipelineError::io("list", dir))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(PipelineError::io("inspect", &entry.path()))?;
        if file_type.is_dir() {
            continue;
        }
        // Non-UTF-8 names cannot carry a catchment code; skip them.
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// All files in `dir` whose name satisfies `pattern`, sorted by name.
pub async fn find_matching(
    dir: &Path,
    pattern: impl Fn(&str) -> bool,
) -> PipelineResult<Vec<PathBuf>> {
    Ok(list_file_names(dir)
        .await?
        .into_iter()
        .filter(|name| pattern(name.as_str()))
        .map(|name| dir.join(name))
        .collect())
}

/// The `*_LibraryFile_UDM.xml` written by the land-cover converter.
pub async fn find_library_file(run_folder: &Path) -> PipelineResult<PathBuf> {
    find_matching(run_folder, naming::is_library_file)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::LibraryFileMissing {
            run_folder: run_folder.to_path_buf(),
        })
}

/// Every `rundata_*` file written by SHETRAN prepare.
pub async fn find_rundata_files(run_folder: &Path) -> PipelineResult<Vec<PathBuf>> {
    find_matching(run_folder, naming::is_rundata_file).await
}
