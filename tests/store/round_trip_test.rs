use std::sync::Arc;

use arrow::array::{Float64Array, Int32Array};
use arrow::datatypes::{DataType, Field, Schema};
use hdi_engine::store::{read_sub_index, write_sub_index};
use hdi_engine::{
    ArtifactStore, Error, FileStore, IndexDomain, MemoryStore, RecordBatch, SubIndexArtifact,
    SubIndexRow,
};
use hdi_engine::utils::io::TableFormat;

fn sample_artifact() -> SubIndexArtifact {
    let rows = vec![
        SubIndexRow {
            index_adjusted: Some(0.552),
            inequality_coefficient: Some(0.92),
            atkinson_coefficient: Some(0.08),
            raw_value: Some(59.0),
            ..SubIndexRow::new(2015, 0.6)
        },
        SubIndexRow {
            index_adjusted: None,
            growth_rate_pct: Some(2.5),
            raw_value: Some(60.0),
            ..SubIndexRow::new(2016, 0.615)
        },
    ];
    SubIndexArtifact::new(IndexDomain::Health, rows).unwrap()
}

fn assert_same(actual: &SubIndexArtifact, expected: &SubIndexArtifact) {
    assert_eq!(actual.years(), expected.years());
    for (a, e) in actual.rows().iter().zip(expected.rows()) {
        assert!((a.index - e.index).abs() < 1e-12);
        assert_eq!(a.index_adjusted.is_some(), e.index_adjusted.is_some());
        if let (Some(a), Some(e)) = (a.index_adjusted, e.index_adjusted) {
            assert!((a - e).abs() < 1e-12);
        }
        assert_eq!(a.growth_rate_pct, e.growth_rate_pct);
        assert_eq!(a.raw_value, e.raw_value);
        assert_eq!(a.mean_schooling, None);
    }
}

fn round_trip(store: &dyn ArtifactStore) {
    let artifact = sample_artifact();
    assert!(!store.contains("health_index").unwrap());
    write_sub_index(store, &artifact).unwrap();
    assert!(store.contains("health_index").unwrap());

    let back = read_sub_index(store, IndexDomain::Health).unwrap();
    assert_same(&back, &artifact);
}

#[test]
fn test_parquet_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    round_trip(&FileStore::new(dir.path(), TableFormat::Parquet).unwrap());
    assert!(dir.path().join("health_index.parquet").is_file());
}

#[test]
fn test_csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    round_trip(&FileStore::new(dir.path(), TableFormat::Csv).unwrap());
    assert!(dir.path().join("health_index.csv").is_file());
}

#[test]
fn test_memory_round_trip() {
    round_trip(&MemoryStore::new());
}

#[test]
fn test_missing_artifact_is_missing_prerequisite() {
    let store = MemoryStore::new();
    let err = read_sub_index(&store, IndexDomain::Education).unwrap_err();
    assert!(matches!(err, Error::MissingPrerequisite { ref artifact } if artifact == "edu_index"));
}

#[test]
fn test_malformed_artifact_rejected() {
    let store = MemoryStore::new();

    let schema = Schema::new(vec![
        Field::new("year", DataType::Int32, false),
        Field::new("value", DataType::Float64, true),
    ]);
    let batch = RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(Int32Array::from(vec![2015])),
            Arc::new(Float64Array::from(vec![Some(0.5)])),
        ],
    )
    .unwrap();
    store.write_artifact("income_index", &batch).unwrap();

    assert!(matches!(
        read_sub_index(&store, IndexDomain::Income),
        Err(Error::Schema(_))
    ));
}

#[test]
fn test_duplicate_years_rejected_on_read() {
    let store = MemoryStore::new();
    let rows = vec![SubIndexRow::new(2015, 0.5), SubIndexRow::new(2015, 0.6)];
    let batch = <SubIndexRow as hdi_engine::ArrowSchema>::to_record_batch(&rows).unwrap();
    store.write_artifact("health_index", &batch).unwrap();

    assert!(matches!(
        read_sub_index(&store, IndexDomain::Health),
        Err(Error::Schema(_))
    ));
}
