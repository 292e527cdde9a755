//! Configuration for the index pipeline.
//!
//! Only the data locations, indicator identifiers and execution knobs are
//! configurable. Normalization bounds, category maps and trimming thresholds are
//! constants of the index itself and live next to the calculators.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Datelike;
use serde::Deserialize;

use crate::error::util::safe_open_file;
use crate::error::{Error, Result};

/// Backend used to persist artifacts between stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// One Parquet file per artifact
    Parquet,
    /// One CSV file per artifact
    Csv,
    /// Artifacts kept in process memory
    Memory,
}

impl FromStr for StoreBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parquet" => Ok(Self::Parquet),
            "csv" => Ok(Self::Csv),
            "memory" => Ok(Self::Memory),
            other => Err(Error::Configuration(format!(
                "Unsupported artifact store backend '{other}' (expected parquet, csv or memory)"
            ))),
        }
    }
}

/// Artifact store configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend name: `parquet`, `csv` or `memory`
    pub backend: String,
    /// Directory artifacts are written to (ignored by the memory backend)
    pub directory: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "parquet".to_string(),
            directory: PathBuf::from("data/processed"),
        }
    }
}

impl StoreConfig {
    /// Parse the configured backend
    pub fn backend(&self) -> Result<StoreBackend> {
        self.backend.parse()
    }
}

/// Configuration for the index pipeline
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Base directory holding `raw/` microdata and `external/` reference tables
    pub data_dir: PathBuf,
    /// Country code used to select indicator series
    pub country: String,
    /// Indicator code of life expectancy at birth
    pub life_expectancy_code: String,
    /// Indicator code of GNI per capita at current prices
    pub gni_capita_code: String,
    /// Indicator code of GNI per capita at PPP-constant prices
    pub gni_constant_code: String,
    /// Name of the national-accounts reference series
    pub reference_series: String,
    /// First survey year considered
    pub start_year: i32,
    /// Last survey year considered (inclusive)
    pub end_year: i32,
    /// Artifact persistence
    pub store: StoreConfig,
    /// Skip stages whose artifact already exists in the store
    pub reuse_artifacts: bool,
    /// Number of worker threads for per-year computation
    pub workers: usize,
    /// Show a progress bar over the pipeline stages
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            country: "PR".to_string(),
            life_expectancy_code: "SP.DYN.LE00.IN".to_string(),
            gni_capita_code: "NY.GNP.PCAP.PP.CD".to_string(),
            gni_constant_code: "NY.GNP.PCAP.PP.KD".to_string(),
            reference_series: "pnb".to_string(),
            start_year: 2012,
            end_year: chrono::Local::now().year(),
            store: StoreConfig::default(),
            reuse_artifacts: false,
            workers: num_cpus::get(),
            show_progress: true,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "loading pipeline configuration")?;
        let config: Self = serde_json::from_reader(file)?;
        Ok(config)
    }

    /// Apply `HDI_*` environment variable overrides
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    ///
    /// Recognised keys: `HDI_DATA_DIR`, `HDI_STORE_BACKEND`, `HDI_STORE_DIR`,
    /// `HDI_COUNTRY`, `HDI_WORKERS`. Unparseable worker counts are ignored with a
    /// warning.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("HDI_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup("HDI_STORE_BACKEND") {
            self.store.backend = backend;
        }
        if let Some(dir) = lookup("HDI_STORE_DIR") {
            self.store.directory = PathBuf::from(dir);
        }
        if let Some(country) = lookup("HDI_COUNTRY") {
            self.country = country;
        }
        if let Some(workers) = lookup("HDI_WORKERS") {
            match workers.parse::<usize>() {
                Ok(n) => self.workers = n,
                Err(_) => log::warn!("Ignoring invalid HDI_WORKERS value '{workers}'"),
            }
        }
        self
    }

    /// Reject configurations that cannot run, before any computation starts
    pub fn validate(&self) -> Result<()> {
        self.store.backend()?;

        let identifiers = [
            ("country", &self.country),
            ("life_expectancy_code", &self.life_expectancy_code),
            ("gni_capita_code", &self.gni_capita_code),
            ("gni_constant_code", &self.gni_constant_code),
            ("reference_series", &self.reference_series),
        ];
        if let Some((name, _)) = identifiers.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(Error::Configuration(format!("'{name}' must not be empty")));
        }

        if self.start_year > self.end_year {
            return Err(Error::Configuration(format!(
                "start_year {} is after end_year {}",
                self.start_year, self.end_year
            )));
        }
        if self.workers == 0 {
            return Err(Error::Configuration(
                "workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a survey year falls inside the configured range
    #[must_use]
    pub fn includes_year(&self, year: i32) -> bool {
        (self.start_year..=self.end_year).contains(&year)
    }
}
