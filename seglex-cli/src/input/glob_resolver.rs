//! File pattern resolution using glob

use crate::error::CliError;
use anyhow::Result;
use glob::glob;
use std::path::PathBuf;

/// Resolve input arguments to a sorted, deduplicated list of files.
///
/// Each argument is expanded as a glob pattern; a plain path simply matches
/// itself when it exists.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern).map_err(|e| CliError::InvalidPattern(format!("{pattern}: {e}")))?;

        let before = files.len();
        for path in paths.flatten() {
            if path.is_file() {
                files.push(path);
            }
        }
        if files.len() == before {
            log::warn!("No files match '{pattern}'");
        }
    }

    if files.is_empty() {
        return Err(CliError::FileNotFound(
            "No files found matching the provided patterns".to_string(),
        )
        .into());
    }

    files.sort();
    files.dedup();
    log::debug!("Resolved {} input file(s)", files.len());

    Ok(files)
}
