//! Education sub-index from person microdata
//!
//! Each survey year is computed independently from its own extract:
//! mean years of schooling of adults, expected years of schooling from youth
//! enrollment rates by age, and an inequality adjustment over adult schooling.

use std::collections::BTreeMap;

use log::debug;
use rayon::prelude::*;

use crate::algorithm::category::years_of_schooling;
use crate::algorithm::growth::apply_growth_rates;
use crate::algorithm::inequality::{InequalityAdjustment, adjust};
use crate::algorithm::skip_failed_years;
use crate::error::{Error, Result};
use crate::models::{IndexDomain, MicrodataBatch, SubIndexArtifact, SubIndexRow};

/// Age from which a person counts as an adult
pub const ADULT_AGE: i64 = 25;
/// Youngest age whose enrollment rate counts towards expected schooling
pub const SCHOOL_ENTRY_AGE: i64 = 5;
/// Fewest distinct youth ages needed for an expected-schooling estimate
pub const MIN_YOUTH_AGES: usize = 5;
/// Mean years of schooling mapped to 1
pub const MEAN_SCHOOLING_MAX: f64 = 15.0;
/// Expected years of schooling mapped to 1
pub const EXPECTED_SCHOOLING_MAX: f64 = 18.0;

/// Intermediate results of one education year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EducationYear {
    pub year: i32,
    pub mean_schooling: f64,
    pub expected_schooling: f64,
    pub adjustment: InequalityAdjustment,
}

impl EducationYear {
    /// Unadjusted education index
    #[must_use]
    pub fn index(&self) -> f64 {
        (self.mean_schooling / MEAN_SCHOOLING_MAX
            + self.expected_schooling / EXPECTED_SCHOOLING_MAX)
            / 2.0
    }

    fn into_row(self) -> SubIndexRow {
        let index = self.index();
        SubIndexRow {
            index_adjusted: Some(self.adjustment.apply(index)),
            inequality_coefficient: Some(self.adjustment.coefficient),
            atkinson_coefficient: Some(self.adjustment.atkinson),
            mean_schooling: Some(self.mean_schooling),
            expected_schooling: Some(self.expected_schooling),
            ..SubIndexRow::new(self.year, index)
        }
    }
}

/// Sum of per-age enrollment rates over youth ages from school entry
///
/// # Errors
/// Returns an insufficient-data error when fewer than [`MIN_YOUTH_AGES`]
/// distinct youth ages are observed.
fn expected_schooling(batch: &MicrodataBatch) -> Result<f64> {
    // age -> (count, enrolled)
    let mut by_age: BTreeMap<i64, (usize, usize)> = BTreeMap::new();
    for record in &batch.records {
        let Some(age) = record.age.filter(|age| *age < ADULT_AGE) else {
            continue;
        };
        let entry = by_age.entry(age).or_default();
        entry.0 += 1;
        if record.is_enrolled() {
            entry.1 += 1;
        }
    }

    if by_age.len() < MIN_YOUTH_AGES {
        return Err(Error::insufficient_data(
            Some(batch.year),
            format!(
                "{} distinct youth ages observed, at least {MIN_YOUTH_AGES} required",
                by_age.len()
            ),
        ));
    }

    Ok(by_age
        .range(SCHOOL_ENTRY_AGE..)
        .map(|(_, &(count, enrolled))| enrolled as f64 / count as f64)
        .sum())
}

/// Compute one year of the education index
///
/// Records without an age are ignored.
///
/// # Errors
/// * `InsufficientData` when the youth ages are too few or no adult has any schooling
/// * `Domain` when the inequality adjustment cannot be computed
pub fn compute_education_year(batch: &MicrodataBatch) -> Result<EducationYear> {
    let schooling: Vec<f64> = batch
        .records
        .iter()
        .filter(|r| r.age.is_some_and(|age| age >= ADULT_AGE))
        .filter_map(|r| r.attainment_code)
        .map(years_of_schooling)
        .collect();

    if !schooling.iter().any(|&years| years != 0.0) {
        return Err(Error::insufficient_data(
            Some(batch.year),
            format!("no adult with schooling among {} adults", schooling.len()),
        ));
    }
    let mean_schooling = schooling.iter().sum::<f64>() / schooling.len() as f64;

    let shifted: Vec<f64> = schooling.iter().map(|years| 1.0 + years).collect();
    let adjustment = adjust(&shifted).map_err(|e| e.for_year(batch.year))?;

    let expected_schooling = expected_schooling(batch)?;

    debug!(
        "education {}: mean schooling {mean_schooling:.3}, expected schooling {expected_schooling:.3}, coefficient {:.4}",
        batch.year, adjustment.coefficient
    );
    Ok(EducationYear {
        year: batch.year,
        mean_schooling,
        expected_schooling,
        adjustment,
    })
}

/// Compute the education sub-index over every available year
///
/// Years are computed in parallel on the current rayon pool. A year that fails
/// on its own data is logged and left out of the artifact.
///
/// # Arguments
/// * `batches` - Person microdata, one batch per survey year
///
/// # Returns
/// One row per successfully computed year
///
/// # Errors
/// Any failure other than a per-year one aborts the computation.
pub fn compute_education_index(batches: &[MicrodataBatch]) -> Result<SubIndexArtifact> {
    let results: Vec<Result<EducationYear>> =
        batches.par_iter().map(compute_education_year).collect();
    let mut rows: Vec<SubIndexRow> = skip_failed_years("education", results)?
        .into_iter()
        .map(EducationYear::into_row)
        .collect();
    rows.sort_by_key(|r| r.year);
    apply_growth_rates(&mut rows);

    let artifact = SubIndexArtifact::new(IndexDomain::Education, rows)?;
    artifact.warn_out_of_range();
    Ok(artifact)
}
