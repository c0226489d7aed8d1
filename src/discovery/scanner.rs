//! File discovery and scanning

use crate::error::{IntroscanError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// List the recordings in `input` with the given extension, sorted by path
///
/// Pairing depends on this order, so it must be stable across runs.
pub fn scan(input: &Path, extension: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    if !input.exists() {
        return Err(IntroscanError::InputNotFound(input.to_path_buf()));
    }
    if !input.is_dir() {
        return Err(IntroscanError::ConfigError(format!(
            "Input must be a directory: {}",
            input.display()
        )));
    }

    let walker = if recursive {
        WalkDir::new(input)
    } else {
        WalkDir::new(input).max_depth(1)
    };

    let mut files = Vec::new();
    for entry in walker.sort_by_file_name().into_iter() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && has_extension(path, extension) {
            debug!("Discovered: {}", path.display());
            files.push(path.to_path_buf());
        }
    }

    files.sort();

    info!("Discovered {} .{} files", files.len(), extension);

    if files.len() < 2 {
        warn!(
            "Need at least two .{} files in {} to compare anything",
            extension,
            input.display()
        );
    }

    Ok(files)
}

/// Case-insensitive extension check
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
