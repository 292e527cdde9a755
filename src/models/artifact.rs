//! Year-indexed index artifacts
//!
//! Artifacts are the persisted outputs of the pipeline stages: one
//! `SubIndexArtifact` per domain and a single `CompositeArtifact`. Rows are kept
//! sorted by year and a year appears at most once.

use std::fmt;

use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::traits::ArrowSchema;

/// Artifact name of the composite index
pub const COMPOSITE_ARTIFACT: &str = "idh_index";

/// Sub-index domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexDomain {
    /// Life expectancy
    Health,
    /// Gross national income
    Income,
    /// Schooling
    Education,
}

impl IndexDomain {
    /// Name under which the domain's artifact is stored
    #[must_use]
    pub const fn artifact_name(self) -> &'static str {
        match self {
            Self::Health => "health_index",
            Self::Income => "income_index",
            Self::Education => "edu_index",
        }
    }
}

impl fmt::Display for IndexDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Health => write!(f, "health"),
            Self::Income => write!(f, "income"),
            Self::Education => write!(f, "education"),
        }
    }
}

/// One year of a sub-index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubIndexRow {
    pub year: i32,
    pub index: f64,
    pub index_adjusted: Option<f64>,
    pub inequality_coefficient: Option<f64>,
    pub atkinson_coefficient: Option<f64>,
    pub growth_rate_pct: Option<f64>,
    pub growth_rate_adjusted_pct: Option<f64>,
    /// Life expectancy (health) or reference value (income)
    pub raw_value: Option<f64>,
    /// PPP-constant over current GNI per capita (income)
    pub income_ratio: Option<f64>,
    /// Mean years of schooling of adults (education)
    pub mean_schooling: Option<f64>,
    /// Expected years of schooling of youth (education)
    pub expected_schooling: Option<f64>,
}

impl SubIndexRow {
    /// Row with only the year and index set
    #[must_use]
    pub fn new(year: i32, index: f64) -> Self {
        Self {
            year,
            index,
            ..Self::default()
        }
    }
}

impl ArrowSchema for SubIndexRow {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("year", DataType::Int32, false),
            Field::new("index", DataType::Float64, false),
            Field::new("index_adjusted", DataType::Float64, true),
            Field::new("inequality_coefficient", DataType::Float64, true),
            Field::new("atkinson_coefficient", DataType::Float64, true),
            Field::new("growth_rate_pct", DataType::Float64, true),
            Field::new("growth_rate_adjusted_pct", DataType::Float64, true),
            Field::new("raw_value", DataType::Float64, true),
            Field::new("income_ratio", DataType::Float64, true),
            Field::new("mean_schooling", DataType::Float64, true),
            Field::new("expected_schooling", DataType::Float64, true),
        ])
    }
}

/// One year of the composite index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeRow {
    pub year: i32,
    pub health_index: f64,
    pub health_index_adjusted: f64,
    pub income_index: f64,
    pub income_index_adjusted: f64,
    pub edu_index: f64,
    pub edu_index_adjusted: f64,
    pub index: f64,
    pub index_adjusted: f64,
    pub growth_rate_pct: Option<f64>,
    pub growth_rate_adjusted_pct: Option<f64>,
}

impl ArrowSchema for CompositeRow {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("year", DataType::Int32, false),
            Field::new("health_index", DataType::Float64, false),
            Field::new("health_index_adjusted", DataType::Float64, false),
            Field::new("income_index", DataType::Float64, false),
            Field::new("income_index_adjusted", DataType::Float64, false),
            Field::new("edu_index", DataType::Float64, false),
            Field::new("edu_index_adjusted", DataType::Float64, false),
            Field::new("index", DataType::Float64, false),
            Field::new("index_adjusted", DataType::Float64, false),
            Field::new("growth_rate_pct", DataType::Float64, true),
            Field::new("growth_rate_adjusted_pct", DataType::Float64, true),
        ])
    }
}

/// Sort rows by year and reject duplicate years
fn sorted_unique<R>(mut rows: Vec<R>, year: impl Fn(&R) -> i32, artifact: &str) -> Result<Vec<R>> {
    rows.sort_by_key(|r| year(r));
    if let Some(pair) = rows.windows(2).find(|w| year(&w[0]) == year(&w[1])) {
        return Err(Error::Schema(format!(
            "Artifact '{artifact}' has duplicate rows for year {}",
            year(&pair[0])
        )));
    }
    Ok(rows)
}

fn warn_if_out_of_range(artifact: &str, column: &str, year: i32, value: Option<f64>) {
    if let Some(v) = value {
        if !(0.0..=1.0).contains(&v) {
            log::warn!("{artifact}: {column} for year {year} is outside [0, 1]: {v:.6}");
        }
    }
}

/// Year-ordered sub-index table for one domain
#[derive(Debug, Clone, PartialEq)]
pub struct SubIndexArtifact {
    /// Domain of the sub-index
    pub domain: IndexDomain,
    rows: Vec<SubIndexRow>,
}

impl SubIndexArtifact {
    /// Create an artifact, sorting rows by year
    ///
    /// # Errors
    /// Returns a schema error if a year appears more than once.
    pub fn new(domain: IndexDomain, rows: Vec<SubIndexRow>) -> Result<Self> {
        let rows = sorted_unique(rows, |r| r.year, domain.artifact_name())?;
        Ok(Self { domain, rows })
    }

    /// Rows in year order
    #[must_use]
    pub fn rows(&self) -> &[SubIndexRow] {
        &self.rows
    }

    /// Row for a year
    #[must_use]
    pub fn get(&self, year: i32) -> Option<&SubIndexRow> {
        self.rows
            .binary_search_by_key(&year, |r| r.year)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    /// Years present in the artifact
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.rows.iter().map(|r| r.year).collect()
    }

    /// Number of years
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the artifact has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Log a data-quality warning for every index value outside [0, 1]
    pub fn warn_out_of_range(&self) {
        let name = self.domain.artifact_name();
        for row in &self.rows {
            warn_if_out_of_range(name, "index", row.year, Some(row.index));
            warn_if_out_of_range(name, "index_adjusted", row.year, row.index_adjusted);
        }
    }

    /// Convert to a record batch for persistence
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        SubIndexRow::to_record_batch(&self.rows)
    }

    /// Rebuild an artifact from persisted record batches
    pub fn from_record_batches(domain: IndexDomain, batches: &[RecordBatch]) -> Result<Self> {
        Self::new(domain, SubIndexRow::from_record_batches(batches)?)
    }
}

/// Year-ordered composite index table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositeArtifact {
    rows: Vec<CompositeRow>,
}

impl CompositeArtifact {
    /// Create an artifact, sorting rows by year
    ///
    /// # Errors
    /// Returns a schema error if a year appears more than once.
    pub fn new(rows: Vec<CompositeRow>) -> Result<Self> {
        let rows = sorted_unique(rows, |r| r.year, COMPOSITE_ARTIFACT)?;
        Ok(Self { rows })
    }

    /// Rows in year order
    #[must_use]
    pub fn rows(&self) -> &[CompositeRow] {
        &self.rows
    }

    /// Row for a year
    #[must_use]
    pub fn get(&self, year: i32) -> Option<&CompositeRow> {
        self.rows
            .binary_search_by_key(&year, |r| r.year)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    /// Years present in the artifact
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.rows.iter().map(|r| r.year).collect()
    }

    /// Number of years
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the artifact has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Log a data-quality warning for every index value outside [0, 1]
    pub fn warn_out_of_range(&self) {
        for row in &self.rows {
            warn_if_out_of_range(COMPOSITE_ARTIFACT, "index", row.year, Some(row.index));
            warn_if_out_of_range(
                COMPOSITE_ARTIFACT,
                "index_adjusted",
                row.year,
                Some(row.index_adjusted),
            );
        }
    }

    /// Convert to a record batch for persistence
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        CompositeRow::to_record_batch(&self.rows)
    }

    /// Rebuild an artifact from persisted record batches
    pub fn from_record_batches(batches: &[RecordBatch]) -> Result<Self> {
        Self::new(CompositeRow::from_record_batches(batches)?)
    }
}

impl fmt::Display for CompositeArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>6} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>9} {:>9}",
            "year", "health", "health_a", "income", "income_a", "edu", "edu_a", "idh", "idh_a",
            "growth%", "growth_a%"
        )?;
        for row in &self.rows {
            let growth = |g: Option<f64>| g.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"));
            writeln!(
                f,
                "{:>6} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>9} {:>9}",
                row.year,
                row.health_index,
                row.health_index_adjusted,
                row.income_index,
                row.income_index_adjusted,
                row.edu_index,
                row.edu_index_adjusted,
                row.index,
                row.index_adjusted,
                growth(row.growth_rate_pct),
                growth(row.growth_rate_adjusted_pct),
            )?;
        }
        Ok(())
    }
}
