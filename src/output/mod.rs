//! Output writers for compiled programs and parsed traces.
//!
//! This module handles writing data to disk in various formats:
//! - Solidity test contracts
//! - JSON dumps of parsed events
//!
//! Every write goes through a temporary file in the destination directory
//! followed by a rename, so a failed run never leaves a truncated file.

pub mod json;
pub mod solidity;

// Re-export main functions
pub use json::write_trace_json;
pub use solidity::emit;

use crate::utils::error::OutputError;
use log::debug;
use std::fs::Permissions;
use std::io::Write;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Replace the file at `output_path` with `contents`, all or nothing
///
/// **Private** - shared by the writers in this module
fn write_atomic(output_path: &Path, contents: &[u8]) -> Result<(), OutputError> {
    validate_path(output_path)?;

    let parent = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Create parent directories if needed
    if !parent.exists() {
        debug!("Creating parent directories: {}", parent.display());
        std::fs::create_dir_all(parent).map_err(|e| {
            OutputError::InvalidPath(format!(
                "Cannot create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let existing = std::fs::metadata(output_path)
        .ok()
        .map(|metadata| metadata.permissions());

    let mut builder = tempfile::Builder::new();
    if let Some(permissions) = new_file_permissions() {
        builder.permissions(permissions);
    }

    let mut temp = builder.tempfile_in(parent)?;
    temp.write_all(contents)?;

    // A replaced file keeps its mode
    if let Some(permissions) = existing {
        temp.as_file().set_permissions(permissions)?;
    }
    temp.as_file().sync_all()?;

    temp.persist(output_path)
        .map_err(|e| OutputError::WriteFailed(e.error))?;

    Ok(())
}

/// Creation mode of a new output file, before the umask
///
/// Matches `File::create` instead of the private mode of a temp file.
#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}
