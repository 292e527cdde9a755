use hdi_engine::algorithm::composite::geometric_mean3;
use hdi_engine::algorithm::health::{compute_health_index, health_index};
use hdi_engine::algorithm::income::household_adjustment;
use hdi_engine::algorithm::{adjust, compute_composite_index, trim_distribution, years_of_schooling};
use hdi_engine::{Error, IndexDomain, IndicatorSeries, SubIndexArtifact, SubIndexRow};
use rand::prelude::*;

use crate::utils::household_batch;

fn sub_index(domain: IndexDomain, rows: &[(i32, f64, Option<f64>)]) -> SubIndexArtifact {
    SubIndexArtifact::new(
        domain,
        rows.iter()
            .map(|&(year, index, adjusted)| SubIndexRow {
                index_adjusted: adjusted,
                ..SubIndexRow::new(year, index)
            })
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_mapping_totality() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..1000 {
        let code: i64 = rng.random();
        let years = years_of_schooling(code);
        assert!(years.is_finite());
        assert!((0.0..=18.0).contains(&years));
    }
}

#[test]
fn test_coefficient_one_iff_constant() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..100 {
        let value = rng.random_range(0.5..1000.0);
        let len = rng.random_range(1..20);
        let constant = vec![value; len];
        assert_eq!(adjust(&constant).unwrap().coefficient, 1.0);

        let mut varied = constant.clone();
        varied.push(value * 2.0);
        assert!(adjust(&varied).unwrap().coefficient < 1.0);
    }
}

#[test]
fn test_domain_guard_rejects_non_positive() {
    assert!(matches!(adjust(&[]), Err(Error::Domain { .. })));
    assert!(matches!(adjust(&[2.0, 0.0, 3.0]), Err(Error::Domain { .. })));
}

#[test]
fn test_health_bounds() {
    assert_eq!(health_index(20.0), 0.0);
    assert_eq!(health_index(85.0), 1.0);
    assert_eq!(health_index(52.5), 0.5);
}

#[test]
fn test_composite_is_geometric_mean() {
    let health = sub_index(IndexDomain::Health, &[(2015, 0.9, Some(0.828))]);
    let income = sub_index(IndexDomain::Income, &[(2015, 0.7, Some(0.5))]);
    let education = sub_index(IndexDomain::Education, &[(2015, 0.6, Some(0.45))]);

    let composite = compute_composite_index(&health, &income, &education).unwrap();
    let row = composite.get(2015).unwrap();
    assert!((row.index - (0.9f64 * 0.7 * 0.6).cbrt()).abs() < 1e-12);
    assert!((row.index_adjusted - geometric_mean3(0.828, 0.5, 0.45)).abs() < 1e-12);
    assert_eq!(row.growth_rate_pct, None);
}

#[test]
fn test_join_gap_removes_year() {
    let health = sub_index(IndexDomain::Health, &[(2014, 0.9, Some(0.8)), (2015, 0.9, Some(0.8))]);
    let income = sub_index(IndexDomain::Income, &[(2014, 0.7, Some(0.5)), (2015, 0.7, Some(0.5))]);
    let education = sub_index(IndexDomain::Education, &[(2015, 0.6, Some(0.4))]);

    let composite = compute_composite_index(&health, &income, &education).unwrap();
    assert_eq!(composite.years(), vec![2015]);
}

#[test]
fn test_health_growth_rate_edges() {
    let life_expectancy = IndicatorSeries::from_pairs("le", [(2014, 52.5), (2015, 52.5), (2016, 85.0)]);
    let artifact = compute_health_index(&life_expectancy).unwrap();
    assert_eq!(artifact.get(2014).unwrap().growth_rate_pct, None);
    assert_eq!(artifact.get(2015).unwrap().growth_rate_pct, Some(0.0));
    assert!((artifact.get(2016).unwrap().growth_rate_pct.unwrap() - 100.0).abs() < 1e-9);
}

#[test]
fn test_composite_growth_rate_edges() {
    let health = sub_index(
        IndexDomain::Health,
        &[(2014, 0.5, Some(0.4)), (2015, 0.5, Some(0.4)), (2016, 0.55, Some(0.44))],
    );
    let composite = compute_composite_index(&health, &health, &health).unwrap();
    assert_eq!(composite.rows()[0].growth_rate_pct, None);
    assert_eq!(composite.rows()[1].growth_rate_pct, Some(0.0));
    assert!((composite.rows()[2].growth_rate_pct.unwrap() - 10.0).abs() < 1e-9);
    assert!((composite.rows()[2].growth_rate_adjusted_pct.unwrap() - 10.0).abs() < 1e-9);
}

#[test]
fn test_trimming_idempotent_on_repeated_extremes() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let low = rng.random_range(1.0..100.0);
        let high = rng.random_range(1000.0..5000.0);
        let mut sample = vec![low; 3];
        sample.extend((0..20).map(|_| rng.random_range(low..high)));
        sample.extend(vec![high; 3]);

        let once = trim_distribution(sample.iter().copied().map(Some));
        let twice = trim_distribution(once.iter().copied().map(Some));
        assert_eq!(once, twice);
        assert_eq!(once.len(), sample.len());
    }
}

#[test]
fn test_end_to_end_trimming_scenario() {
    let batch = household_batch(2016, &[1.0, 1.0, 2.0, 100.0, 100.0, 100.0, 100.0, 100.0]);
    let adjustment = household_adjustment(&batch).unwrap();

    let expected = (2f64 * 100f64.powi(5)).powf(1.0 / 8.0) / 63.0;
    assert!((adjustment.coefficient - expected).abs() < 1e-12);
    assert!((adjustment.coefficient - 0.30781).abs() < 1e-4);
    assert!((adjustment.arithmetic_mean.unwrap() - 63.0).abs() < 1e-12);
}
