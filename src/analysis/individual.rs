//! Individual risk profiling
//!
//! Applies the per-metric classifiers to a single subject's record and
//! packages each derived category with the subject's other available
//! raw values, so the per-subject report can narrate one metric in the
//! context of the rest. A metric whose required fields are missing or
//! invalid is omitted entirely: an absent section means "not assessed"
//! and renderers must not default it.

use log::warn;
use serde::Serialize;

use crate::classify::{
    classify_blood_pressure, classify_bmi_individual, classify_cholesterol, classify_glucose,
    classify_urine, resolve_psa,
};
use crate::models::{
    BmiStatus, BpCategory, CholesterolCategory, Gender, GlucoseCategory, PsaResult, PsaValue,
    ScreeningRecord, UrineResult,
};

/// BMI assessment with cross-referenced vitals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiInsight {
    /// The subject's BMI
    pub value: f64,
    /// Individual-profile BMI status
    pub category: BmiStatus,
    /// Cross-reference: systolic pressure, when screened
    pub systolic: Option<f64>,
    /// Cross-reference: diastolic pressure, when screened
    pub diastolic: Option<f64>,
    /// Cross-reference: blood glucose, when screened
    pub blood_glucose: Option<f64>,
    /// Cross-reference: cholesterol, when screened
    pub cholesterol: Option<f64>,
}

/// Blood pressure assessment with cross-referenced vitals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BloodPressureInsight {
    /// Systolic reading in mmHg
    pub systolic: f64,
    /// Diastolic reading in mmHg
    pub diastolic: f64,
    /// Blood pressure category
    pub category: BpCategory,
    /// Cross-reference: BMI, when screened
    pub bmi: Option<f64>,
    /// Cross-reference: blood glucose, when screened
    pub blood_glucose: Option<f64>,
    /// Cross-reference: cholesterol, when screened
    pub cholesterol: Option<f64>,
}

/// Blood glucose assessment with cross-referenced vitals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BloodSugarInsight {
    /// Blood glucose in mg/dL
    pub value: f64,
    /// Glucose category
    pub category: GlucoseCategory,
    /// Cross-reference: BMI, when screened
    pub bmi: Option<f64>,
    /// Cross-reference: systolic pressure, when screened
    pub systolic: Option<f64>,
    /// Cross-reference: diastolic pressure, when screened
    pub diastolic: Option<f64>,
    /// Cross-reference: cholesterol, when screened
    pub cholesterol: Option<f64>,
}

/// Cholesterol assessment with cross-referenced vitals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CholesterolInsight {
    /// Total cholesterol in mg/dL
    pub value: f64,
    /// Cholesterol category
    pub category: CholesterolCategory,
    /// Cross-reference: BMI, when screened
    pub bmi: Option<f64>,
    /// Cross-reference: systolic pressure, when screened
    pub systolic: Option<f64>,
    /// Cross-reference: diastolic pressure, when screened
    pub diastolic: Option<f64>,
    /// Cross-reference: blood glucose, when screened
    pub blood_glucose: Option<f64>,
}

/// Urine panel assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UrineInsight {
    /// Urine glucose result
    pub glucose: UrineResult,
    /// Urine protein result
    pub protein: UrineResult,
}

/// PSA assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PsaInsight {
    /// Raw PSA value as reported
    pub value: PsaValue,
    /// Resolved qualitative outcome
    pub result: PsaResult,
    /// Cross-reference: subject age
    pub age: Option<u32>,
    /// Cross-reference: subject gender
    pub gender: Gender,
}

/// Multi-metric risk profile for one subject
///
/// Each section is present only when the record carries valid data for
/// it; a `None` section serializes as an absent key.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IndividualProfile {
    /// BMI assessment, when the record carries a BMI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<BmiInsight>,
    /// Blood pressure assessment, when both readings are present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<BloodPressureInsight>,
    /// Blood glucose assessment, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_sugar: Option<BloodSugarInsight>,
    /// Cholesterol assessment, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<CholesterolInsight>,
    /// Urine panel, when both sub-tests are present and valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urine: Option<UrineInsight>,
    /// PSA assessment, only when the value resolves to a valid outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psa: Option<PsaInsight>,
}

impl IndividualProfile {
    /// Whether no metric could be assessed for this subject
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bmi.is_none()
            && self.blood_pressure.is_none()
            && self.blood_sugar.is_none()
            && self.cholesterol.is_none()
            && self.urine.is_none()
            && self.psa.is_none()
    }
}

/// Build the multi-metric profile for one subject's record
#[must_use]
pub fn profile_individual(record: &ScreeningRecord) -> IndividualProfile {
    let bmi = record.bmi.map(|value| BmiInsight {
        value,
        category: classify_bmi_individual(value),
        systolic: record.systolic,
        diastolic: record.diastolic,
        blood_glucose: record.blood_glucose,
        cholesterol: record.cholesterol,
    });

    let blood_pressure = match (record.systolic, record.diastolic) {
        (Some(systolic), Some(diastolic)) => Some(BloodPressureInsight {
            systolic,
            diastolic,
            category: classify_blood_pressure(systolic, diastolic),
            bmi: record.bmi,
            blood_glucose: record.blood_glucose,
            cholesterol: record.cholesterol,
        }),
        _ => None,
    };

    let blood_sugar = record.blood_glucose.map(|value| BloodSugarInsight {
        value,
        category: classify_glucose(value),
        bmi: record.bmi,
        systolic: record.systolic,
        diastolic: record.diastolic,
        cholesterol: record.cholesterol,
    });

    let cholesterol = record.cholesterol.map(|value| CholesterolInsight {
        value,
        category: classify_cholesterol(value),
        bmi: record.bmi,
        systolic: record.systolic,
        diastolic: record.diastolic,
        blood_glucose: record.blood_glucose,
    });

    let urine = urine_insight(record);
    let psa = psa_insight(record);

    IndividualProfile {
        bmi,
        blood_pressure,
        blood_sugar,
        cholesterol,
        urine,
        psa,
    }
}

fn urine_insight(record: &ScreeningRecord) -> Option<UrineInsight> {
    let glucose_raw = record.urine_glucose.as_deref()?;
    let protein_raw = record.urine_protein.as_deref()?;

    let glucose = classify_urine(glucose_raw);
    let protein = classify_urine(protein_raw);
    match (glucose, protein) {
        (Some(glucose), Some(protein)) => Some(UrineInsight { glucose, protein }),
        _ => {
            if !glucose_raw.trim().is_empty() || !protein_raw.trim().is_empty() {
                warn!(
                    "Urine panel for enrollee {} has an unrecognized result, skipping section",
                    record.enrollee_id
                );
            }
            None
        }
    }
}

fn psa_insight(record: &ScreeningRecord) -> Option<PsaInsight> {
    let value = record.psa.as_ref()?;
    let Some(result) = resolve_psa(value) else {
        if !matches!(value, PsaValue::Qualitative(text) if text.trim().is_empty()) {
            warn!(
                "PSA value for enrollee {} did not resolve to POSITIVE/NEGATIVE, skipping section",
                record.enrollee_id
            );
        }
        return None;
    };
    Some(PsaInsight {
        value: value.clone(),
        result,
        age: record.age,
        gender: record.gender,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> ScreeningRecord {
        let mut record = ScreeningRecord::new("CL/001".to_string(), Gender::Male, Some(52));
        record.systolic = Some(150.0);
        record.diastolic = Some(88.0);
        record.blood_glucose = Some(118.0);
        record.cholesterol = Some(210.0);
        record.bmi = Some(27.4);
        record.urine_glucose = Some("negative".to_string());
        record.urine_protein = Some("NEGATIVE".to_string());
        record.psa = Some(PsaValue::Numeric(5.2));
        record
    }

    #[test]
    fn test_full_profile_cross_references() {
        let profile = profile_individual(&full_record());

        let bmi = profile.bmi.as_ref().unwrap();
        assert_eq!(bmi.category, BmiStatus::Overweight);
        assert_eq!(bmi.systolic, Some(150.0));
        assert_eq!(bmi.cholesterol, Some(210.0));

        let bp = profile.blood_pressure.as_ref().unwrap();
        assert_eq!(bp.category, BpCategory::ModerateHigh);
        assert_eq!(bp.bmi, Some(27.4));

        let sugar = profile.blood_sugar.as_ref().unwrap();
        assert_eq!(sugar.category, GlucoseCategory::PreDiabetic);

        let chol = profile.cholesterol.as_ref().unwrap();
        assert_eq!(chol.category, CholesterolCategory::BorderlineHigh);
        assert_eq!(chol.blood_glucose, Some(118.0));

        let urine = profile.urine.unwrap();
        assert_eq!(urine.glucose, UrineResult::Negative);

        let psa = profile.psa.as_ref().unwrap();
        assert_eq!(psa.result, PsaResult::Positive);
        assert_eq!(psa.age, Some(52));
        assert_eq!(psa.gender, Gender::Male);
    }

    #[test]
    fn test_missing_fields_omit_sections() {
        let record = ScreeningRecord::new("CL/002".to_string(), Gender::Female, Some(30));
        let profile = profile_individual(&record);
        assert!(profile.is_empty());
    }

    #[test]
    fn test_bp_needs_both_readings() {
        let mut record = ScreeningRecord::new("CL/003".to_string(), Gender::Male, Some(44));
        record.systolic = Some(130.0);
        record.bmi = Some(23.0);

        let profile = profile_individual(&record);
        assert!(profile.blood_pressure.is_none());
        // The BMI section still cross-references the lone systolic value
        let bmi = profile.bmi.unwrap();
        assert_eq!(bmi.systolic, Some(130.0));
        assert_eq!(bmi.diastolic, None);
    }

    #[test]
    fn test_blank_psa_is_omitted() {
        let mut record = full_record();
        record.psa = Some(PsaValue::Qualitative("   ".to_string()));
        let profile = profile_individual(&record);
        assert!(profile.psa.is_none());
        assert!(profile.bmi.is_some());
    }

    #[test]
    fn test_qualitative_psa_passes_through() {
        let mut record = full_record();
        record.psa = Some(PsaValue::Qualitative("negative".to_string()));
        let profile = profile_individual(&record);
        assert_eq!(profile.psa.unwrap().result, PsaResult::Negative);
    }

    #[test]
    fn test_invalid_urine_drops_whole_panel() {
        let mut record = full_record();
        record.urine_protein = Some("TRACE".to_string());
        let profile = profile_individual(&record);
        assert!(profile.urine.is_none());
    }
}
