//! Composite index from the three sub-indices

use log::{debug, warn};

use crate::algorithm::growth::apply_growth_rates;
use crate::error::Result;
use crate::models::{CompositeArtifact, CompositeRow, SubIndexArtifact};

/// Geometric mean of three values
#[must_use]
pub fn geometric_mean3(a: f64, b: f64, c: f64) -> f64 {
    (a * b * c).powf(1.0 / 3.0)
}

/// Combine the health, income and education sub-indices
///
/// Only years present in all three artifacts with every index and adjusted
/// index available are kept. A year whose composite is not a finite number
/// (a negative component makes the cube root undefined) is dropped as well.
/// Growth rates are computed over the kept rows.
pub fn compute_composite_index(
    health: &SubIndexArtifact,
    income: &SubIndexArtifact,
    education: &SubIndexArtifact,
) -> Result<CompositeArtifact> {
    let mut rows: Vec<CompositeRow> = health
        .rows()
        .iter()
        .filter_map(|h| {
            let i = income.get(h.year)?;
            let e = education.get(h.year)?;
            let (Some(ha), Some(ia), Some(ea)) = (h.index_adjusted, i.index_adjusted, e.index_adjusted)
            else {
                debug!("composite {}: missing adjusted component, year dropped", h.year);
                return None;
            };
            let index = geometric_mean3(h.index, i.index, e.index);
            let index_adjusted = geometric_mean3(ha, ia, ea);
            if !index.is_finite() || !index_adjusted.is_finite() {
                warn!(
                    "composite {}: undefined geometric mean (index={index}, adjusted={index_adjusted}), year dropped",
                    h.year
                );
                return None;
            }
            Some(CompositeRow {
                year: h.year,
                health_index: h.index,
                health_index_adjusted: ha,
                income_index: i.index,
                income_index_adjusted: ia,
                edu_index: e.index,
                edu_index_adjusted: ea,
                index,
                index_adjusted,
                growth_rate_pct: None,
                growth_rate_adjusted_pct: None,
            })
        })
        .collect();
    apply_growth_rates(&mut rows);

    let artifact = CompositeArtifact::new(rows)?;
    artifact.warn_out_of_range();
    Ok(artifact)
}
