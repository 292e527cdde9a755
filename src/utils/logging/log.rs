//! Logging helpers for pipeline stages and per-year computation
//!
//! Stage lines are keyed by the artifact a stage writes; per-year lines by the
//! sub-index and survey year.

use std::path::Path;
use std::time::Duration;

use crate::error::Error;

/// Log the start of a stage
///
/// # Arguments
/// * `stage` - Stage being run
/// * `artifact` - Name of the artifact the stage writes
pub fn log_stage_start(stage: &str, artifact: &str) {
    log::info!("Computing {stage} index into {artifact}");
}

/// Log a completed stage
///
/// # Arguments
/// * `artifact` - Name of the artifact that was written
/// * `years` - Number of years in the artifact
/// * `elapsed` - Time spent on the stage
pub fn log_stage_complete(artifact: &str, years: usize, elapsed: Duration) {
    log::info!("Successfully computed {years} years of {artifact} in {elapsed:?}");
}

/// Log a stage skipped because its artifact is already stored
pub fn log_stage_reused(artifact: &str) {
    log::info!("Reusing stored {artifact} artifact");
}

/// Log a year left out of a sub-index
///
/// # Arguments
/// * `index` - Sub-index being computed
/// * `error` - Per-year failure; its year is used when attached
pub fn log_year_skipped(index: &str, error: &Error) {
    match error.year() {
        Some(year) => log::warn!("Skipping {index} index for year {year}: {error}"),
        None => log::warn!("Skipping {index} index: {error}"),
    }
}

/// Log a table read from disk
pub fn log_table_read(path: &Path, rows: usize, elapsed: Duration) {
    log::info!("Read {rows} rows from {} in {elapsed:?}", path.display());
}

/// Log a warning, optionally tied to a path
///
/// # Arguments
/// * `message` - Warning message
/// * `path` - Optional path related to the warning
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}
