//! Utility functions for error handling
//!
//! This module provides helpers that turn filesystem failures into pipeline errors
//! carrying the path that was involved.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{PipelineError, Result};

/// Open a source table file, mapping a missing file to [`PipelineError::MissingTable`]
///
/// # Arguments
/// * `path` - The path to the table file
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        log::error!("Cannot open {purpose}: {} does not exist", path.display());
        return Err(PipelineError::MissingTable {
            path: path.to_path_buf(),
        });
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "Permission denied - check file permissions",
            io::ErrorKind::NotFound => "File not found - it may have been deleted during operation",
            _ => "Failed to open file",
        };
        PipelineError::Io(io::Error::new(
            e.kind(),
            format!("{context} ({purpose}): {}: {e}", path.display()),
        ))
    })
}

/// Create a file for writing, creating missing parent directories first
///
/// Existing files are truncated.
pub fn create_file_with_parents(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to create directory {}: {e}", parent.display()),
            ))
        })?;
    }

    fs::File::create(path).map_err(|e| {
        PipelineError::Io(io::Error::new(
            e.kind(),
            format!("Failed to create file {}: {e}", path.display()),
        ))
    })
}

/// Read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::NotFound => "File not found",
            io::ErrorKind::InvalidData => "File contains invalid UTF-8 data - cannot read as text",
            _ => "Failed to read file content",
        };
        PipelineError::Io(io::Error::new(
            e.kind(),
            format!("{context} ({purpose}): {}", path.display()),
        ))
    })
}
