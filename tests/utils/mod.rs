use hdi_engine::{
    IndicatorSeries, InMemorySource, MicrodataBatch, MicrodataRecord, PipelineConfig, StoreConfig,
    SurveyDomain,
};

pub const COUNTRY: &str = "PR";

/// Configuration for tests: in-memory store, two workers, no progress bar
#[must_use]
pub fn test_config() -> PipelineConfig {
    PipelineConfig {
        start_year: 2010,
        end_year: 2030,
        store: StoreConfig {
            backend: "memory".to_string(),
            ..StoreConfig::default()
        },
        workers: 2,
        show_progress: false,
        ..PipelineConfig::default()
    }
}

/// Person extract with youth ages 0..=14 (half enrolled) and adults with the
/// given attainment codes
#[must_use]
pub fn person_batch(year: i32, adult_codes: &[i64]) -> MicrodataBatch {
    let mut records = Vec::new();
    for age in 0..15 {
        records.push(MicrodataRecord::person(Some(age), Some(2), None));
        records.push(MicrodataRecord::person(Some(age), Some(1), None));
    }
    for (i, code) in adult_codes.iter().enumerate() {
        records.push(MicrodataRecord::person(Some(25 + i as i64), Some(1), Some(*code)));
    }
    MicrodataBatch::new(SurveyDomain::Person, year, records)
}

/// Household extract with the given incomes
#[must_use]
pub fn household_batch(year: i32, incomes: &[f64]) -> MicrodataBatch {
    MicrodataBatch::new(
        SurveyDomain::Household,
        year,
        incomes
            .iter()
            .map(|&v| MicrodataRecord::household(Some(v)))
            .collect(),
    )
}

/// Complete in-memory inputs for 2014..=2016
///
/// Life expectancy is missing for 2015 and forward-filled; education has no
/// extract for 2015, so the composite covers 2014 and 2016 only.
#[must_use]
pub fn sample_source() -> InMemorySource {
    let config = PipelineConfig::default();

    let mut life_expectancy = IndicatorSeries::new(config.life_expectancy_code.clone());
    life_expectancy.insert(2014, Some(78.0)).unwrap();
    life_expectancy.insert(2015, None).unwrap();
    life_expectancy.insert(2016, Some(79.3)).unwrap();

    let capita = IndicatorSeries::from_pairs(
        config.gni_capita_code.clone(),
        [(2014, 24_000.0), (2015, 24_500.0), (2016, 25_000.0)],
    );
    let constant = IndicatorSeries::from_pairs(
        config.gni_constant_code.clone(),
        [(2014, 36_000.0), (2015, 36_400.0), (2016, 37_000.0)],
    );
    let reference = IndicatorSeries::from_pairs(
        config.reference_series.clone(),
        [(2014, 19_000.0), (2015, 19_300.0), (2016, 19_800.0)],
    );

    InMemorySource::new()
        .with_indicator(COUNTRY, life_expectancy)
        .with_indicator(COUNTRY, capita)
        .with_indicator(COUNTRY, constant)
        .with_reference(reference)
        .with_microdata(person_batch(2014, &[16, 19, 21, 12]))
        .with_microdata(person_batch(2016, &[16, 20, 21, 21]))
        .with_microdata(household_batch(2014, &[8_000.0, 15_000.0, 30_000.0, 60_000.0]))
        .with_microdata(household_batch(2015, &[9_000.0, 16_000.0, 31_000.0]))
        .with_microdata(household_batch(2016, &[1.0, 1.0, 2.0, 100.0, 100.0, 100.0, 100.0, 100.0]))
}
