//! Income sub-index from gross national income
//!
//! The index itself comes from the national-accounts reference series; the
//! household income microdata of each year only supplies the inequality
//! adjustment. A year without usable household data keeps its index but has no
//! adjusted value.

use std::collections::BTreeMap;

use log::{debug, warn};
use rayon::prelude::*;

use crate::algorithm::growth::apply_growth_rates;
use crate::algorithm::inequality::{InequalityAdjustment, adjust};
use crate::algorithm::skip_failed_years;
use crate::algorithm::trim::trim_distribution;
use crate::error::{Error, Result};
use crate::models::{IndexDomain, IndicatorSeries, MicrodataBatch, SubIndexArtifact, SubIndexRow};
use crate::utils::logging::log_year_skipped;

/// Income mapped to an index of 0
pub const INCOME_MIN: f64 = 100.0;
/// Income mapped to an index of 1
pub const INCOME_MAX: f64 = 75_000.0;

/// Normalize an income on a log scale
///
/// # Errors
/// Returns a domain error for a non-positive or non-finite income.
pub fn income_index(income: f64) -> Result<f64> {
    if !income.is_finite() || income <= 0.0 {
        return Err(Error::domain(
            None,
            format!("income must be positive to take its logarithm, found {income}"),
        ));
    }
    Ok((income.ln() - INCOME_MIN.ln()) / (INCOME_MAX.ln() - INCOME_MIN.ln()))
}

/// Inequality adjustment of one year of household incomes
///
/// The sample is trimmed before adjusting.
pub fn household_adjustment(batch: &MicrodataBatch) -> Result<InequalityAdjustment> {
    let sample = trim_distribution(batch.household_incomes());
    debug!(
        "income {}: {} of {} household incomes kept after trimming",
        batch.year,
        sample.len(),
        batch.len()
    );
    adjust(&sample).map_err(|e| e.for_year(batch.year))
}

/// Inequality adjustments of every household batch, computed in parallel
///
/// Years whose adjustment fails on their own data are logged and left out. A
/// year must appear in one batch only; for a repeated year the first batch wins.
///
/// # Errors
/// Any failure other than a per-year one aborts the computation.
pub fn household_adjustments(
    batches: &[MicrodataBatch],
) -> Result<BTreeMap<i32, InequalityAdjustment>> {
    let results: Vec<Result<(i32, InequalityAdjustment)>> = batches
        .par_iter()
        .map(|batch| household_adjustment(batch).map(|adjustment| (batch.year, adjustment)))
        .collect();

    let mut adjustments = BTreeMap::new();
    for (year, adjustment) in skip_failed_years("income adjustment", results)? {
        if adjustments.contains_key(&year) {
            warn!("income {year}: duplicate household batch ignored");
            continue;
        }
        adjustments.insert(year, adjustment);
    }
    Ok(adjustments)
}

/// Compute the income sub-index
///
/// # Arguments
/// * `capita` - GNI per capita at current prices
/// * `constant` - GNI per capita at PPP-constant prices
/// * `reference` - National-accounts reference series the index is built on
/// * `households` - Household income microdata, one batch per available year
///
/// # Returns
/// One row per year present in all three series
pub fn compute_income_index(
    capita: &IndicatorSeries,
    constant: &IndicatorSeries,
    reference: &IndicatorSeries,
    households: &[MicrodataBatch],
) -> Result<SubIndexArtifact> {
    let adjustments = household_adjustments(households)?;

    let mut rows = Vec::new();
    for (year, capita_value, constant_value) in capita.inner_join(constant) {
        let Some(raw) = reference.get(year) else {
            debug!("income {year}: no reference value, year dropped");
            continue;
        };
        let index = match income_index(raw) {
            Ok(index) => index,
            Err(e) => {
                log_year_skipped("income", &e.for_year(year));
                continue;
            }
        };
        let income_ratio = (capita_value != 0.0).then(|| constant_value / capita_value);
        let adjustment = adjustments.get(&year);
        if adjustment.is_none() {
            debug!("income {year}: no household adjustment available");
        }

        rows.push(SubIndexRow {
            index_adjusted: adjustment.map(|a| a.apply(index)),
            inequality_coefficient: adjustment.map(|a| a.coefficient),
            atkinson_coefficient: adjustment.map(|a| a.atkinson),
            raw_value: Some(raw),
            income_ratio,
            ..SubIndexRow::new(year, index)
        });
    }
    apply_growth_rates(&mut rows);

    let artifact = SubIndexArtifact::new(IndexDomain::Income, rows)?;
    artifact.warn_out_of_range();
    Ok(artifact)
}
