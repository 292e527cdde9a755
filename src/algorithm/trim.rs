//! Percentiles and tail trimming of income distributions

/// Quantile below which values are raised to the quantile
pub const FLOOR_QUANTILE: f64 = 0.005;
/// Quantile above which values are dropped
pub const CEILING_QUANTILE: f64 = 0.995;

/// Quantile of an ascending-sorted sample
///
/// Uses linear interpolation between the two closest ranks, with position
/// `h = (n - 1) * q`. Returns `None` for an empty sample.
#[must_use]
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * q;
    let lower = h.floor() as usize;
    let upper = h.ceil() as usize;
    let weight = h - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Clean a household income sample for inequality adjustment
///
/// Null and non-positive incomes are dropped, values below the 0.5th percentile
/// are raised to it, and values above the 99.5th percentile of the raised sample
/// are dropped. The result is sorted ascending.
#[must_use]
pub fn trim_distribution(values: impl IntoIterator<Item = Option<f64>>) -> Vec<f64> {
    let mut sample: Vec<f64> = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();
    sample.sort_by(f64::total_cmp);

    let Some(floor) = quantile(&sample, FLOOR_QUANTILE) else {
        return sample;
    };
    for value in &mut sample {
        if *value < floor {
            *value = floor;
        }
    }

    let Some(ceiling) = quantile(&sample, CEILING_QUANTILE) else {
        return sample;
    };
    sample.retain(|v| *v <= ceiling);
    sample
}
