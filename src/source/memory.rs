//! In-memory data source

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::models::{IndicatorSeries, MicrodataBatch, SurveyDomain};
use crate::source::DataSource;

/// Data source holding all inputs in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    microdata: BTreeMap<(SurveyDomain, i32), MicrodataBatch>,
    indicators: FxHashMap<(String, String), IndicatorSeries>,
    references: FxHashMap<String, IndicatorSeries>,
}

impl InMemorySource {
    /// Create an empty source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a microdata batch, replacing any batch of the same domain and year
    #[must_use]
    pub fn with_microdata(mut self, batch: MicrodataBatch) -> Self {
        self.microdata.insert((batch.domain, batch.year), batch);
        self
    }

    /// Add an indicator series for a country; the series name is its code
    #[must_use]
    pub fn with_indicator(mut self, country: &str, series: IndicatorSeries) -> Self {
        self.indicators
            .insert((country.to_string(), series.name.clone()), series);
        self
    }

    /// Add a reference series; the series name is its lookup key
    #[must_use]
    pub fn with_reference(mut self, series: IndicatorSeries) -> Self {
        self.references.insert(series.name.clone(), series);
        self
    }
}

impl DataSource for InMemorySource {
    fn describe(&self) -> String {
        format!("in-memory source ({} microdata batches)", self.microdata.len())
    }

    fn available_years(&self, domain: SurveyDomain) -> Result<Vec<i32>> {
        Ok(self
            .microdata
            .keys()
            .filter(|(d, _)| *d == domain)
            .map(|(_, year)| *year)
            .collect())
    }

    fn microdata(&self, domain: SurveyDomain, year: i32) -> Result<Option<MicrodataBatch>> {
        Ok(self.microdata.get(&(domain, year)).cloned())
    }

    fn indicator_series(&self, code: &str, country: &str) -> Result<IndicatorSeries> {
        Ok(self
            .indicators
            .get(&(country.to_string(), code.to_string()))
            .cloned()
            .unwrap_or_else(|| IndicatorSeries::new(code)))
    }

    fn reference_series(&self, name: &str) -> Result<IndicatorSeries> {
        Ok(self
            .references
            .get(name)
            .cloned()
            .unwrap_or_else(|| IndicatorSeries::new(name)))
    }
}
