// ABOUTME: Utility functions for the remarker application
// ABOUTME: Path validation and resolution helpers shared by the CLI and watch mode

use crate::errors::{RemarkerError, Result};
use std::path::{Path, PathBuf};

/// Validate that a path exists, file or directory
pub fn validate_path_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(RemarkerError::PathNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent_directory_exists(file_path: &Path) -> Result<()> {
    let Some(parent) = file_path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    if !parent.exists() {
        std::fs::create_dir_all(parent).map_err(|e| RemarkerError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    } else if !parent.is_dir() {
        return Err(RemarkerError::Validation(format!(
            "Path exists but is not a directory: {:?}",
            parent
        )));
    }
    Ok(())
}

/// Get the absolute path
pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path).map_err(|e| {
        RemarkerError::Validation(format!("Failed to get absolute path for {:?}: {}", path, e))
    })
}
