//! Atkinson inequality adjustment
//!
//! The adjustment discounts an index by the inequality of the distribution it
//! summarises: `coefficient = geometric mean / arithmetic mean`, which is 1 for
//! a perfectly equal sample and approaches 0 as the sample concentrates.

use crate::error::{Error, Result};

/// Result of adjusting a sample for inequality
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InequalityAdjustment {
    /// `1 - atkinson`, the factor applied to an index
    pub coefficient: f64,
    /// Arithmetic mean of the sample, absent for fixed adjustments
    pub arithmetic_mean: Option<f64>,
    /// Geometric mean of the sample, absent for fixed adjustments
    pub geometric_mean: Option<f64>,
    /// `1 - geometric_mean / arithmetic_mean`
    pub atkinson: f64,
}

impl InequalityAdjustment {
    /// Adjustment with a fixed Atkinson coefficient and no sample behind it
    #[must_use]
    pub fn from_atkinson(atkinson: f64) -> Self {
        Self {
            coefficient: 1.0 - atkinson,
            arithmetic_mean: None,
            geometric_mean: None,
            atkinson,
        }
    }

    /// Apply the adjustment to an index value
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        self.coefficient * value
    }
}

/// Compute the inequality adjustment of a sample of strictly positive values
///
/// # Arguments
/// * `sample` - Values to summarise; order does not matter
///
/// # Returns
/// The adjustment coefficient together with both means and the Atkinson index
///
/// # Errors
/// Returns a domain error when the sample is empty or contains a value that is
/// not finite or not strictly positive, since the geometric mean is undefined.
pub fn adjust(sample: &[f64]) -> Result<InequalityAdjustment> {
    if sample.is_empty() {
        return Err(Error::domain(None, "cannot adjust an empty sample"));
    }
    if let Some(bad) = sample.iter().find(|v| !v.is_finite() || **v <= 0.0) {
        return Err(Error::domain(
            None,
            format!("sample values must be finite and positive, found {bad}"),
        ));
    }

    let n = sample.len() as f64;
    let arithmetic_mean = sample.iter().sum::<f64>() / n;

    let first = sample[0];
    let (geometric_mean, atkinson) = if sample.iter().all(|&v| v == first) {
        (first, 0.0)
    } else {
        let geometric_mean = (sample.iter().map(|v| v.ln()).sum::<f64>() / n).exp();
        let atkinson = (1.0 - geometric_mean / arithmetic_mean).clamp(0.0, 1.0);
        (geometric_mean, atkinson)
    };

    Ok(InequalityAdjustment {
        coefficient: 1.0 - atkinson,
        arithmetic_mean: Some(arithmetic_mean),
        geometric_mean: Some(geometric_mean),
        atkinson,
    })
}
