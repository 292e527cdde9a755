use std::fs;
use std::path::Path;

use hdi_engine::{DataSource, DirectorySource, SurveyDomain};

fn write(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_year_detection_from_file_names() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "raw/data_ppr_2014_raw.csv", "AGEP,SCH,SCHL\n30,1,16\n");
    write(dir.path(), "raw/data_ppr_2016.csv", "AGEP,SCH,SCHL\n30,1,16\n");
    write(dir.path(), "raw/data_hpr_2015.csv", "HINCP\n1000\n");
    write(dir.path(), "raw/data_ppr_notes.txt", "ignored");
    write(dir.path(), "raw/data_ppr_latest.csv", "AGEP,SCH,SCHL\n");

    let source = DirectorySource::new(dir.path()).unwrap();
    assert_eq!(source.available_years(SurveyDomain::Person).unwrap(), vec![2014, 2016]);
    assert_eq!(source.available_years(SurveyDomain::Household).unwrap(), vec![2015]);
}

#[test]
fn test_missing_raw_directory_has_no_years() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirectorySource::new(dir.path()).unwrap();
    assert!(source.available_years(SurveyDomain::Person).unwrap().is_empty());
    assert!(source.microdata(SurveyDomain::Person, 2016).unwrap().is_none());
}

#[test]
fn test_microdata_missing_required_column() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "raw/data_ppr_2016.csv", "AGEP,SCH\n30,1\n");

    let source = DirectorySource::new(dir.path()).unwrap();
    assert!(source.microdata(SurveyDomain::Person, 2016).is_err());
}

#[test]
fn test_missing_indicator_table() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirectorySource::new(dir.path()).unwrap();
    assert!(source.indicator_series("SP.DYN.LE00.IN", "PR").is_err());
}

#[test]
fn test_year_range_filter() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "raw/data_hpr_2011.csv", "HINCP\n1000\n");
    write(dir.path(), "raw/data_hpr_2013.csv", "HINCP\n2000\n");

    let source = DirectorySource::new(dir.path()).unwrap();
    let batches = source
        .microdata_batches(SurveyDomain::Household, &|year| year >= 2012)
        .unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].year, 2013);
}
