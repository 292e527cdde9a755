//! Index calculators
//!
//! Per-domain calculators turning raw inputs into year-indexed sub-indices, the
//! shared inequality adjustment and trimming steps, and the composite aggregator.

pub mod category;
pub mod composite;
pub mod education;
pub mod growth;
pub mod health;
pub mod income;
pub mod inequality;
pub mod trim;

pub use category::years_of_schooling;
pub use composite::compute_composite_index;
pub use education::compute_education_index;
pub use health::compute_health_index;
pub use income::compute_income_index;
pub use inequality::{InequalityAdjustment, adjust};
pub use trim::{quantile, trim_distribution};

use crate::error::Result;
use crate::utils::logging::log_year_skipped;

/// Collect per-year results, leaving out years that failed on their own data
///
/// A per-year failure (`Domain`, `InsufficientData`) is logged and the year is
/// skipped; any other error aborts the whole sub-index.
pub(crate) fn skip_failed_years<T>(
    index: &str,
    results: impl IntoIterator<Item = Result<T>>,
) -> Result<Vec<T>> {
    let mut kept = Vec::new();
    for result in results {
        match result {
            Ok(value) => kept.push(value),
            Err(e) if e.is_per_year() => log_year_skipped(index, &e),
            Err(e) => return Err(e),
        }
    }
    Ok(kept)
}
