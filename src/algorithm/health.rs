//! Health sub-index from life expectancy at birth

use log::debug;

use crate::algorithm::growth::apply_growth_rates;
use crate::algorithm::inequality::InequalityAdjustment;
use crate::error::Result;
use crate::models::{IndexDomain, IndicatorSeries, SubIndexArtifact, SubIndexRow};

/// Life expectancy mapped to an index of 0
pub const LIFE_EXPECTANCY_MIN: f64 = 20.0;
/// Life expectancy mapped to an index of 1
pub const LIFE_EXPECTANCY_MAX: f64 = 85.0;
/// Atkinson coefficient applied to every year of the health index
pub const HEALTH_ATKINSON: f64 = 0.08;

/// Normalize a life expectancy to the health index
#[must_use]
pub fn health_index(life_expectancy: f64) -> f64 {
    (life_expectancy - LIFE_EXPECTANCY_MIN) / (LIFE_EXPECTANCY_MAX - LIFE_EXPECTANCY_MIN)
}

/// Compute the health sub-index
///
/// Gaps in the series are forward-filled from the most recent published year
/// before normalizing. The inequality adjustment is the fixed
/// [`HEALTH_ATKINSON`] discount.
///
/// # Arguments
/// * `life_expectancy` - Life expectancy at birth by year
///
/// # Returns
/// One row per year from the first published value to the last entry
pub fn compute_health_index(life_expectancy: &IndicatorSeries) -> Result<SubIndexArtifact> {
    let adjustment = InequalityAdjustment::from_atkinson(HEALTH_ATKINSON);

    let mut rows: Vec<SubIndexRow> = life_expectancy
        .forward_filled()
        .iter()
        .map(|(year, le)| {
            let index = health_index(le);
            debug!("health {year}: life expectancy {le:.3} -> index {index:.6}");
            SubIndexRow {
                index_adjusted: Some(adjustment.apply(index)),
                inequality_coefficient: Some(adjustment.coefficient),
                atkinson_coefficient: Some(adjustment.atkinson),
                raw_value: Some(le),
                ..SubIndexRow::new(year, index)
            }
        })
        .collect();
    apply_growth_rates(&mut rows);

    let artifact = SubIndexArtifact::new(IndexDomain::Health, rows)?;
    artifact.warn_out_of_range();
    Ok(artifact)
}
