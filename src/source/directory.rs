//! Data source reading fetched files from a data directory
//!
//! Layout under the data directory:
//! - `raw/data_ppr_<YEAR>[_suffix].{parquet,csv}`: person microdata
//! - `raw/data_hpr_<YEAR>[_suffix].{parquet,csv}`: household microdata
//! - `raw/indicators.{parquet,csv}`: long table `country, code, year, value`
//! - `external/<name>.{parquet,csv}`: reference series with `year` and
//!   `value` (or `<name>`) columns

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;

use crate::error::util::validate_directory;
use crate::error::{Error, Result};
use crate::models::{IndicatorSeries, MicrodataBatch, SurveyDomain};
use crate::source::DataSource;
use crate::utils::arrow::{extract_f64_column, extract_i64_column, extract_string_column, find_column};
use crate::utils::io::{find_survey_year_files, find_table_files, read_table};
use crate::utils::logging::log_warning;

/// Subdirectory holding microdata and the indicator table
pub const RAW_DIR: &str = "raw";
/// Subdirectory holding reference series
pub const EXTERNAL_DIR: &str = "external";
/// File stem of the long indicator table
pub const INDICATORS_STEM: &str = "indicators";

const COUNTRY_COLUMN: &str = "country";
const CODE_COLUMN: &str = "code";
const YEAR_COLUMN: &str = "year";
const VALUE_COLUMN: &str = "value";

/// Data source over a local data directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    data_dir: PathBuf,
}

impl DirectorySource {
    /// Create a source over an existing data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        validate_directory(&data_dir, "reading input data")?;
        Ok(Self { data_dir })
    }

    /// Directory holding microdata and the indicator table
    #[must_use]
    pub fn raw_dir(&self) -> PathBuf {
        self.data_dir.join(RAW_DIR)
    }

    /// Directory holding reference series
    #[must_use]
    pub fn external_dir(&self) -> PathBuf {
        self.data_dir.join(EXTERNAL_DIR)
    }

    fn year_files(&self, domain: SurveyDomain) -> Result<BTreeMap<i32, PathBuf>> {
        find_survey_year_files(&self.raw_dir(), domain.file_prefix())
    }

    /// First existing table named `stem` in `dir`, Parquet preferred
    fn table_path(dir: &Path, stem: &str) -> Result<PathBuf> {
        find_table_files(dir, stem).into_iter().next().ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "No {stem}.parquet or {stem}.csv found in {}",
                    dir.display()
                ),
            ))
        })
    }
}

/// Rows of a long indicator table matching a country and code
fn select_indicator(
    batches: &[RecordBatch],
    code: &str,
    country: &str,
) -> Result<IndicatorSeries> {
    let mut series = IndicatorSeries::new(code);
    for batch in batches {
        let countries = extract_string_column(batch, COUNTRY_COLUMN, true)?.unwrap_or_default();
        let codes = extract_string_column(batch, CODE_COLUMN, true)?.unwrap_or_default();
        let years = extract_i64_column(batch, YEAR_COLUMN, true)?.unwrap_or_default();
        let values = extract_f64_column(batch, VALUE_COLUMN, true)?.unwrap_or_default();

        let rows = countries.into_iter().zip(codes).zip(years).zip(values);
        for (((row_country, row_code), year), value) in rows {
            let matches = row_country.is_some_and(|c| c.eq_ignore_ascii_case(country))
                && row_code.is_some_and(|c| c == code);
            if !matches {
                continue;
            }
            let Some(year) = year.and_then(|y| i32::try_from(y).ok()) else {
                return Err(Error::Schema(format!(
                    "Indicator '{code}' for {country} has a row without a valid year"
                )));
            };
            series.insert(year, value.filter(|v| v.is_finite()))?;
        }
    }
    Ok(series)
}

impl DataSource for DirectorySource {
    fn describe(&self) -> String {
        format!("data directory {}", self.data_dir.display())
    }

    fn available_years(&self, domain: SurveyDomain) -> Result<Vec<i32>> {
        Ok(self.year_files(domain)?.into_keys().collect())
    }

    fn microdata(&self, domain: SurveyDomain, year: i32) -> Result<Option<MicrodataBatch>> {
        let Some(path) = self.year_files(domain)?.remove(&year) else {
            return Ok(None);
        };
        let batches = read_table(&path)?;
        MicrodataBatch::from_record_batches(domain, year, &batches).map(Some)
    }

    fn indicator_series(&self, code: &str, country: &str) -> Result<IndicatorSeries> {
        let path = Self::table_path(&self.raw_dir(), INDICATORS_STEM)?;
        let series = select_indicator(&read_table(&path)?, code, country)?;
        if series.is_empty() {
            log_warning(
                &format!("No values for indicator {code} ({country})"),
                Some(&path),
            );
        }
        Ok(series)
    }

    fn reference_series(&self, name: &str) -> Result<IndicatorSeries> {
        let path = Self::table_path(&self.external_dir(), name)?;
        let batches = read_table(&path)?;
        let value_column = match batches.first() {
            Some(batch) if find_column(batch, VALUE_COLUMN).is_none() => name,
            _ => VALUE_COLUMN,
        };
        IndicatorSeries::from_record_batches(name, &batches, YEAR_COLUMN, value_column)
    }
}
