//! Aggregate indicator series
//!
//! An `IndicatorSeries` is a named year→value mapping for one country-level
//! indicator. A year may be absent (never published) or present with a null
//! value (published without a figure); both are gaps for the calculators.

use std::collections::BTreeMap;

use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};
use crate::utils::arrow::{extract_f64_column, extract_i64_column};

/// Year-indexed values of a single indicator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSeries {
    /// Indicator code or series name
    pub name: String,
    values: BTreeMap<i32, Option<f64>>,
}

impl IndicatorSeries {
    /// Create an empty series
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Create a series from `(year, value)` pairs; later pairs replace earlier ones
    #[must_use]
    pub fn from_pairs(name: impl Into<String>, pairs: impl IntoIterator<Item = (i32, f64)>) -> Self {
        let mut series = Self::new(name);
        for (year, value) in pairs {
            series.values.insert(year, Some(value));
        }
        series
    }

    /// Record the value for a year
    ///
    /// # Errors
    /// Returns a schema error when the year already has an entry, since an
    /// indicator holds at most one value per year.
    pub fn insert(&mut self, year: i32, value: Option<f64>) -> Result<()> {
        if self.values.contains_key(&year) {
            return Err(Error::Schema(format!(
                "Indicator '{}' has more than one value for year {year}",
                self.name
            )));
        }
        self.values.insert(year, value);
        Ok(())
    }

    /// Value for a year, `None` for absent or null entries
    #[must_use]
    pub fn get(&self, year: i32) -> Option<f64> {
        self.values.get(&year).copied().flatten()
    }

    /// Iterate over years with a non-null value, in year order
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.values
            .iter()
            .filter_map(|(&year, value)| value.map(|v| (year, v)))
    }

    /// Years with a non-null value
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.iter().map(|(year, _)| year).collect()
    }

    /// Number of years with a non-null value
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the series has no non-null value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill every year from the first non-null value to the last entry with the
    /// most recent prior value
    ///
    /// Years before the first non-null value stay absent. This is a stale-data
    /// policy, not interpolation.
    #[must_use]
    pub fn forward_filled(&self) -> Self {
        let mut filled = Self::new(self.name.clone());
        let (Some((first, _)), Some(&last)) = (self.iter().next(), self.values.keys().next_back())
        else {
            return filled;
        };

        let mut carried = None;
        for year in first..=last {
            if let Some(value) = self.get(year) {
                carried = Some(value);
            }
            filled.values.insert(year, carried);
        }
        filled
    }

    /// Years where both series have a non-null value, with both values
    #[must_use]
    pub fn inner_join(&self, other: &Self) -> Vec<(i32, f64, f64)> {
        self.iter()
            .filter_map(|(year, value)| other.get(year).map(|o| (year, value, o)))
            .collect()
    }

    /// Build a series from record batches with a year column and a value column
    ///
    /// # Arguments
    /// * `name` - Name given to the series
    /// * `batches` - Source table
    /// * `year_column` - Name of the year column (case-insensitive)
    /// * `value_column` - Name of the value column (case-insensitive)
    pub fn from_record_batches(
        name: impl Into<String>,
        batches: &[RecordBatch],
        year_column: &str,
        value_column: &str,
    ) -> Result<Self> {
        let mut series = Self::new(name);
        for batch in batches {
            let years = extract_i64_column(batch, year_column, true)?.unwrap_or_default();
            let values = extract_f64_column(batch, value_column, true)?.unwrap_or_default();
            for (year, value) in years.into_iter().zip(values) {
                let Some(year) = year.and_then(|y| i32::try_from(y).ok()) else {
                    return Err(Error::Schema(format!(
                        "Indicator '{}' has a row without a valid year",
                        series.name
                    )));
                };
                series.insert(year, value.filter(|v| v.is_finite()))?;
            }
        }
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_fill_extends_through_gaps_and_nulls() {
        let mut series = IndicatorSeries::new("SP.DYN.LE00.IN");
        series.insert(2010, None).unwrap();
        series.insert(2011, Some(78.0)).unwrap();
        series.insert(2013, Some(79.0)).unwrap();
        series.insert(2015, None).unwrap();

        let filled = series.forward_filled();
        assert_eq!(filled.get(2010), None);
        assert_eq!(filled.get(2011), Some(78.0));
        assert_eq!(filled.get(2012), Some(78.0));
        assert_eq!(filled.get(2013), Some(79.0));
        assert_eq!(filled.get(2014), Some(79.0));
        assert_eq!(filled.get(2015), Some(79.0));
        assert_eq!(filled.years(), vec![2011, 2012, 2013, 2014, 2015]);
    }

    #[test]
    fn test_duplicate_year_rejected() {
        let mut series = IndicatorSeries::new("pnb");
        series.insert(2015, Some(1.0)).unwrap();
        assert!(series.insert(2015, Some(2.0)).is_err());
    }

    #[test]
    fn test_inner_join_skips_gaps() {
        let a = IndicatorSeries::from_pairs("a", [(2014, 1.0), (2015, 2.0), (2016, 3.0)]);
        let mut b = IndicatorSeries::from_pairs("b", [(2015, 20.0), (2017, 40.0)]);
        b.insert(2016, None).unwrap();

        assert_eq!(a.inner_join(&b), vec![(2015, 2.0, 20.0)]);
    }
}
