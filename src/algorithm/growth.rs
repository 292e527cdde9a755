//! Year-over-year growth rates

use crate::models::{CompositeRow, SubIndexRow};

/// Percent change from `previous` to `current`
///
/// `None` when either value is missing or the previous value is zero.
#[must_use]
pub fn percent_change(previous: Option<f64>, current: Option<f64>) -> Option<f64> {
    match (previous, current) {
        (Some(prev), Some(cur)) if prev != 0.0 => Some((cur - prev) / prev * 100.0),
        _ => None,
    }
}

/// Growth rates of a series of consecutive values; the first entry is always `None`
#[must_use]
pub fn growth_rates(values: &[Option<f64>]) -> Vec<Option<f64>> {
    std::iter::once(None)
        .chain(values.windows(2).map(|w| percent_change(w[0], w[1])))
        .take(values.len())
        .collect()
}

/// Rows carrying an index and an adjusted index with their growth rates
pub trait GrowthRow {
    /// Index and adjusted index of the row
    fn growth_inputs(&self) -> (Option<f64>, Option<f64>);

    /// Store the growth rates of the row
    fn set_growth(&mut self, growth: Option<f64>, growth_adjusted: Option<f64>);
}

impl GrowthRow for SubIndexRow {
    fn growth_inputs(&self) -> (Option<f64>, Option<f64>) {
        (Some(self.index), self.index_adjusted)
    }

    fn set_growth(&mut self, growth: Option<f64>, growth_adjusted: Option<f64>) {
        self.growth_rate_pct = growth;
        self.growth_rate_adjusted_pct = growth_adjusted;
    }
}

impl GrowthRow for CompositeRow {
    fn growth_inputs(&self) -> (Option<f64>, Option<f64>) {
        (Some(self.index), Some(self.index_adjusted))
    }

    fn set_growth(&mut self, growth: Option<f64>, growth_adjusted: Option<f64>) {
        self.growth_rate_pct = growth;
        self.growth_rate_adjusted_pct = growth_adjusted;
    }
}

/// Fill the growth columns of year-sorted rows, each against the previous row
pub fn apply_growth_rates<R: GrowthRow>(rows: &mut [R]) {
    let (index, adjusted): (Vec<_>, Vec<_>) = rows.iter().map(GrowthRow::growth_inputs).unzip();
    let growth = growth_rates(&index);
    let growth_adjusted = growth_rates(&adjusted);
    for ((row, g), ga) in rows.iter_mut().zip(growth).zip(growth_adjusted) {
        row.set_growth(g, ga);
    }
}
