//! End-to-end individual profiling tests

use health_screen::analysis::profile_individual;
use health_screen::error::ScreeningError;
use health_screen::models::{
    BmiStatus, Gender, PsaResult, PsaValue, ScreeningDataset, ScreeningRecord,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn screened_subject() -> ScreeningRecord {
    let mut record = ScreeningRecord::new("CL/2041".to_string(), Gender::Male, Some(48));
    record.name = Some("ADEBAYO O.".to_string());
    record.systolic = Some(138.0);
    record.diastolic = Some(88.0);
    record.blood_glucose = Some(96.0);
    record.cholesterol = Some(186.0);
    record.bmi = Some(24.2);
    record.urine_glucose = Some("NEGATIVE".to_string());
    record.urine_protein = Some("NEGATIVE".to_string());
    record.psa = Some(PsaValue::Numeric(2.8));
    record
}

#[test]
fn test_profile_from_dataset_lookup() {
    init_logging();
    let dataset = ScreeningDataset::from_records(vec![screened_subject()]);

    let record = dataset.find_by_enrollee_id("CL/2041").unwrap();
    let profile = profile_individual(record);

    assert_eq!(profile.bmi.as_ref().unwrap().category, BmiStatus::Normal);
    assert_eq!(profile.psa.as_ref().unwrap().result, PsaResult::Negative);
    assert!(profile.urine.is_some());
    assert!(!profile.is_empty());
}

#[test]
fn test_unknown_subject_is_a_distinguishable_error() {
    init_logging();
    let dataset = ScreeningDataset::from_records(vec![screened_subject()]);

    let err = dataset.find_by_enrollee_id("CL/0000").unwrap_err();
    assert!(matches!(err, ScreeningError::SubjectNotFound(_)));
    assert!(err.to_string().contains("CL/0000"));
}

#[test]
fn test_blank_psa_leaves_no_key_in_serialized_profile() {
    init_logging();
    let mut record = screened_subject();
    record.psa = Some(PsaValue::Qualitative(String::new()));

    let profile = profile_individual(&record);
    let json = serde_json::to_value(&profile).unwrap();

    assert!(json.get("psa").is_none());
    // Every other section is still assessed
    assert!(json.get("bmi").is_some());
    assert!(json.get("blood_pressure").is_some());
    assert!(json.get("blood_sugar").is_some());
    assert!(json.get("cholesterol").is_some());
    assert!(json.get("urine").is_some());
}

#[test]
fn test_serialized_profile_shape() {
    init_logging();
    let profile = profile_individual(&screened_subject());
    let json = serde_json::to_value(&profile).unwrap();

    assert_eq!(json["bmi"]["value"], 24.2);
    assert_eq!(json["bmi"]["category"], "NORMAL");
    assert_eq!(json["bmi"]["systolic"], 138.0);
    assert_eq!(json["blood_pressure"]["category"], "NORMAL");
    assert_eq!(json["psa"]["value"], 2.8);
    assert_eq!(json["psa"]["result"], "NEGATIVE");
    assert_eq!(json["psa"]["gender"], "MALE");
    assert_eq!(json["urine"]["glucose"], "NEGATIVE");
}

#[test]
fn test_unassessed_subject_serializes_to_empty_mapping() {
    init_logging();
    let record = ScreeningRecord::new("CL/9".to_string(), Gender::Female, None);
    let profile = profile_individual(&record);

    assert!(profile.is_empty());
    let json = serde_json::to_value(&profile).unwrap();
    assert_eq!(json, serde_json::json!({}));
}

#[test]
fn test_bmi_boundary_differs_from_population_table() {
    init_logging();
    let mut record = screened_subject();
    record.bmi = Some(25.0);

    let profile = profile_individual(&record);
    assert_eq!(profile.bmi.unwrap().category, BmiStatus::Overweight);
    // The population table keeps the same value in its normal band
    assert_eq!(
        health_screen::classify_bmi(25.0),
        health_screen::models::BmiCategory::Normal
    );
}
