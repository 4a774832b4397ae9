//! Log file discovery on the SD card directory

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// List the log files in `dir` with the given extension, sorted by name
///
/// The extension match is case-insensitive. A missing directory is not an
/// error (the card may simply not be inserted) and yields an empty list.
pub fn list_log_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        log::warn!("Log directory not found: {:?}", dir);
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list log directory: {:?}", dir))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list log directory: {:?}", dir))?;
        let path = entry.path();
        if path.is_file() && has_extension(&path, extension) {
            files.push(path);
        }
    }

    files.sort();
    log::debug!("Found {} log file(s) in {:?}", files.len(), dir);
    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
