//! Utility functions for error handling
//!
//! Filesystem helpers that turn bare `io::Error`s into messages naming the path
//! and the purpose of the access.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
///
/// # Returns
/// * `Result<fs::File>` - The opened file or a detailed error
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("File not found: {} (needed for: {purpose})", path.display()),
        )));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "Permission denied - check file permissions",
            _ => "Failed to open file",
        };
        Error::Io(io::Error::new(
            e.kind(),
            format!("{context}: {} (needed for: {purpose}): {e}", path.display()),
        ))
    })
}

/// Check that a directory exists and is readable
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.is_dir() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!(
                "Directory not found: {} (needed for: {purpose})",
                path.display()
            ),
        )));
    }

    fs::read_dir(path).map(|_| ()).map_err(|e| {
        Error::Io(io::Error::new(
            e.kind(),
            format!(
                "Failed to access directory {} for {purpose}: {e}",
                path.display()
            ),
        ))
    })
}

/// Create a directory (and parents) unless it already exists
///
/// Fails with a configuration error when the path exists but is not a
/// directory, since that can only come from a misconfigured target.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(Error::Configuration(format!(
            "Target {} exists and is not a directory",
            path.display()
        )));
    }
    fs::create_dir_all(path)?;
    Ok(())
}
