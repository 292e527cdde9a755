use std::fs;

use hdi_engine::algorithm::composite::geometric_mean3;
use hdi_engine::store::{read_composite, read_sub_index, write_sub_index};
use hdi_engine::{
    DirectorySource, Error, IndexDomain, MemoryStore, Pipeline, PipelineConfig, Stage,
    StoreConfig, SubIndexArtifact, SubIndexRow, open_store,
};

use crate::utils::{sample_source, test_config};

fn pipeline(config: PipelineConfig) -> Pipeline {
    Pipeline::new(config, Box::new(sample_source()), Box::new(MemoryStore::new())).unwrap()
}

#[test]
fn test_full_run_over_memory_source() {
    let pipeline = pipeline(test_config());
    let composite = pipeline.run().unwrap();

    // Education has no 2015 extract, so 2015 drops out of the join
    assert_eq!(composite.years(), vec![2014, 2016]);
    assert_eq!(composite.rows()[0].growth_rate_pct, None);
    assert!(composite.rows()[1].growth_rate_pct.is_some());

    let store = pipeline.store();
    for stage in Stage::ALL {
        assert!(store.contains(stage.artifact_name()).unwrap(), "{stage}");
    }

    let health = read_sub_index(store, IndexDomain::Health).unwrap();
    let income = read_sub_index(store, IndexDomain::Income).unwrap();
    let education = read_sub_index(store, IndexDomain::Education).unwrap();
    assert_eq!(health.years(), vec![2014, 2015, 2016]);
    assert_eq!(health.get(2015).unwrap().raw_value, Some(78.0));
    assert_eq!(education.years(), vec![2014, 2016]);

    let income_2016 = income.get(2016).unwrap();
    assert!((income_2016.inequality_coefficient.unwrap() - 0.30781).abs() < 1e-4);
    assert!((income_2016.income_ratio.unwrap() - 37_000.0 / 25_000.0).abs() < 1e-12);

    for row in composite.rows() {
        let (h, i, e) = (
            health.get(row.year).unwrap(),
            income.get(row.year).unwrap(),
            education.get(row.year).unwrap(),
        );
        assert!((row.index - geometric_mean3(h.index, i.index, e.index)).abs() < 1e-12);
        assert!(
            (row.index_adjusted
                - geometric_mean3(
                    h.index_adjusted.unwrap(),
                    i.index_adjusted.unwrap(),
                    e.index_adjusted.unwrap()
                ))
            .abs()
                < 1e-12
        );
    }
}

#[test]
fn test_composite_requires_sub_indices() {
    let pipeline = pipeline(test_config());
    pipeline.run_stage(Stage::Health).unwrap();

    let err = pipeline.run_stage(Stage::Composite).unwrap_err();
    assert!(matches!(err, Error::MissingPrerequisite { ref artifact } if artifact == "income_index"));
}

#[test]
fn test_reused_artifacts_are_not_recomputed() {
    let config = PipelineConfig {
        reuse_artifacts: true,
        ..test_config()
    };
    let pipeline = pipeline(config);

    let cached = SubIndexArtifact::new(
        IndexDomain::Health,
        vec![
            SubIndexRow {
                index_adjusted: Some(0.25),
                ..SubIndexRow::new(2014, 0.5)
            },
            SubIndexRow {
                index_adjusted: Some(0.25),
                ..SubIndexRow::new(2016, 0.5)
            },
        ],
    )
    .unwrap();
    write_sub_index(pipeline.store(), &cached).unwrap();

    let composite = pipeline.run().unwrap();
    assert_eq!(composite.get(2014).unwrap().health_index, 0.5);
    assert_eq!(read_sub_index(pipeline.store(), IndexDomain::Health).unwrap(), cached);
}

#[test]
fn test_reused_run_rebuilds_composite_from_latest_sub_indices() {
    let config = PipelineConfig {
        reuse_artifacts: true,
        ..test_config()
    };
    let pipeline = pipeline(config);
    let first = pipeline.run().unwrap();
    assert_ne!(first.get(2014).unwrap().health_index, 0.1);

    let revised = SubIndexArtifact::new(
        IndexDomain::Health,
        [2014, 2016]
            .into_iter()
            .map(|year| SubIndexRow {
                index_adjusted: Some(0.1),
                ..SubIndexRow::new(year, 0.1)
            })
            .collect(),
    )
    .unwrap();
    write_sub_index(pipeline.store(), &revised).unwrap();

    let second = pipeline.run().unwrap();
    let income = read_sub_index(pipeline.store(), IndexDomain::Income).unwrap();
    let education = read_sub_index(pipeline.store(), IndexDomain::Education).unwrap();
    for row in second.rows() {
        assert_eq!(row.health_index, 0.1);
        let expected = geometric_mean3(
            0.1,
            income.get(row.year).unwrap().index,
            education.get(row.year).unwrap().index,
        );
        assert!((row.index - expected).abs() < 1e-12);
    }
    assert_eq!(read_composite(pipeline.store()).unwrap(), second);
}

#[test]
fn test_invalid_configuration_rejected_before_work() {
    let config = PipelineConfig {
        workers: 0,
        ..test_config()
    };
    let result = Pipeline::new(config, Box::new(sample_source()), Box::new(MemoryStore::new()));
    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[test]
fn test_run_over_data_directory_with_csv_store() {
    let data = tempfile::tempdir().unwrap();
    let raw = data.path().join("raw");
    let external = data.path().join("external");
    fs::create_dir_all(&raw).unwrap();
    fs::create_dir_all(&external).unwrap();

    fs::write(
        raw.join("indicators.csv"),
        "country,code,year,value\n\
         PR,SP.DYN.LE00.IN,2016,79.3\n\
         PR,NY.GNP.PCAP.PP.CD,2016,25000\n\
         PR,NY.GNP.PCAP.PP.KD,2016,37000\n",
    )
    .unwrap();
    fs::write(external.join("pnb.csv"), "year,pnb\n2016,19800\n").unwrap();
    fs::write(raw.join("data_hpr_2016.csv"), "HINCP\n10000\n20000\n40000\n").unwrap();

    let mut person = String::from("AGEP,SCH,SCHL\n");
    for age in 0..25 {
        person.push_str(&format!("{age},2,\n{age},1,\n"));
    }
    person.push_str("30,1,21\n45,1,16\n60,,12\n");
    fs::write(raw.join("data_ppr_2016.csv"), person).unwrap();

    let config = PipelineConfig {
        data_dir: data.path().to_path_buf(),
        store: StoreConfig {
            backend: "csv".to_string(),
            directory: data.path().join("processed"),
        },
        ..test_config()
    };
    let store = open_store(&config.store).unwrap();
    let source = DirectorySource::new(&config.data_dir).unwrap();
    let pipeline = Pipeline::new(config, Box::new(source), store).unwrap();

    let composite = pipeline.run().unwrap();
    assert_eq!(composite.years(), vec![2016]);
    let row = composite.get(2016).unwrap();
    assert!(row.index > 0.0 && row.index < 1.0);
    assert!(row.index_adjusted <= row.index);
    assert!(data.path().join("processed").join("idh_index.csv").is_file());
}
