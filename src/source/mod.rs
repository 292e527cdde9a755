//! Input data sources
//!
//! A `DataSource` supplies yearly survey microdata and aggregate indicator
//! series to the calculators. Acquisition (downloading extracts and series) is
//! outside the engine; sources only read what has already been fetched.

pub mod directory;
pub mod memory;

use crate::error::Result;
use crate::models::{IndicatorSeries, MicrodataBatch, SurveyDomain};

pub use directory::DirectorySource;
pub use memory::InMemorySource;

/// Provider of raw inputs for the index calculators
pub trait DataSource: Send + Sync {
    /// Short description used in log lines
    fn describe(&self) -> String;

    /// Survey years with microdata available for a domain, ascending
    fn available_years(&self, domain: SurveyDomain) -> Result<Vec<i32>>;

    /// Microdata of one domain and year
    ///
    /// # Returns
    /// * `Ok(Some(batch))` - The year's extract
    /// * `Ok(None)` - No extract exists for the year
    /// * `Err(Error)` - An extract exists but cannot be read
    fn microdata(&self, domain: SurveyDomain, year: i32) -> Result<Option<MicrodataBatch>>;

    /// Indicator series of a country; an unknown code yields an empty series
    fn indicator_series(&self, code: &str, country: &str) -> Result<IndicatorSeries>;

    /// National-accounts reference series by name
    fn reference_series(&self, name: &str) -> Result<IndicatorSeries>;

    /// Load every available year of a domain accepted by `include`
    ///
    /// # Arguments
    /// * `domain` - Record level to load
    /// * `include` - Year filter, typically the configured year range
    fn microdata_batches(
        &self,
        domain: SurveyDomain,
        include: &dyn Fn(i32) -> bool,
    ) -> Result<Vec<MicrodataBatch>> {
        let mut batches = Vec::new();
        for year in self.available_years(domain)? {
            if !include(year) {
                log::debug!("Skipping {domain} microdata for {year}: outside year range");
                continue;
            }
            if let Some(batch) = self.microdata(domain, year)? {
                batches.push(batch);
            }
        }
        Ok(batches)
    }
}
