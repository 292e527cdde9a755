//! Survey year utilities for microdata files
//!
//! Yearly microdata batches are addressed by file name: a domain prefix, the
//! survey year, and an optional suffix (`data_ppr_2016.parquet`,
//! `data_hpr_2016_raw.csv`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::utils::io::table::TableFormat;
use crate::utils::logging::log_warning;

static YEAR_IN_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[_-]?(\d{4})(?:[_-]|$)").expect("year pattern is valid")
});

/// Extract the survey year from a file name carrying the given prefix
///
/// # Arguments
/// * `filename` - File name, with or without extension
/// * `prefix` - Domain prefix the name must start with (case-insensitive)
///
/// # Returns
/// The year directly following the prefix, or `None` when the name does not match
#[must_use]
pub fn extract_survey_year(filename: &str, prefix: &str) -> Option<i32> {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(filename);

    let head = stem.as_bytes().get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix.as_bytes()) {
        return None;
    }

    // A prefix match on ASCII bytes ends on a char boundary
    let rest = stem.get(prefix.len()..)?;
    let caps = YEAR_IN_FILENAME.captures(rest)?;
    caps.get(1)?.as_str().parse::<i32>().ok()
}

/// Find all table files in a directory whose names carry a survey year
///
/// When the same year exists in several formats, Parquet wins over CSV.
///
/// # Arguments
/// * `dir` - Directory to scan (a missing directory yields an empty map)
/// * `prefix` - Domain prefix of the file names
///
/// # Returns
/// Year-ordered map of survey year to file path
pub fn find_survey_year_files(dir: &Path, prefix: &str) -> Result<BTreeMap<i32, PathBuf>> {
    let mut result: BTreeMap<i32, PathBuf> = BTreeMap::new();

    if !dir.is_dir() {
        log_warning("Microdata directory not found", Some(dir));
        return Ok(result);
    }

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(format) = TableFormat::from_path(&path) else {
            continue;
        };
        let Some(year) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| extract_survey_year(name, prefix))
        else {
            continue;
        };

        let replace = result
            .get(&year)
            .and_then(|existing| TableFormat::from_path(existing))
            .is_none_or(|existing| existing == TableFormat::Csv && format == TableFormat::Parquet);
        if replace {
            result.insert(year, path);
        }
    }

    Ok(result)
}
