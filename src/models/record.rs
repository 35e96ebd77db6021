//! Screening record entity model
//!
//! One `ScreeningRecord` holds a single subject's screening row as
//! loaded from the source workbook: identity fields plus independently
//! nullable metric fields. Missing or unparsable cells are `None`;
//! the analysis layer decides per metric whether a record can feed it.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::{Result, ScreeningError};
use crate::models::types::{Gender, PsaValue};

/// One subject's screening data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningRecord {
    /// Enrollee identifier, unique within a dataset
    pub enrollee_id: String,
    /// Subject name
    pub name: Option<String>,
    /// Gender, `Unknown` when missing or unrecognized
    pub gender: Gender,
    /// Age in whole years
    pub age: Option<u32>,
    /// Systolic blood pressure in mmHg
    pub systolic: Option<f64>,
    /// Diastolic blood pressure in mmHg
    pub diastolic: Option<f64>,
    /// Blood glucose in mg/dL
    pub blood_glucose: Option<f64>,
    /// Total cholesterol in mg/dL
    pub cholesterol: Option<f64>,
    /// Body mass index
    pub bmi: Option<f64>,
    /// Qualitative urine glucose result, raw text
    pub urine_glucose: Option<String>,
    /// Qualitative urine protein result, raw text
    pub urine_protein: Option<String>,
    /// PSA value, numeric or qualitative
    pub psa: Option<PsaValue>,
}

impl ScreeningRecord {
    /// Create a record with identity fields only; metric fields start empty
    #[must_use]
    pub const fn new(enrollee_id: String, gender: Gender, age: Option<u32>) -> Self {
        Self {
            enrollee_id,
            name: None,
            gender,
            age,
            systolic: None,
            diastolic: None,
            blood_glucose: None,
            cholesterol: None,
            bmi: None,
            urine_glucose: None,
            urine_protein: None,
            psa: None,
        }
    }

    /// Whether both blood pressure readings are present
    #[must_use]
    pub const fn has_blood_pressure(&self) -> bool {
        self.systolic.is_some() && self.diastolic.is_some()
    }

    /// Whether both urine sub-tests carry a non-empty value
    #[must_use]
    pub fn has_urine_panel(&self) -> bool {
        fn non_empty(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.trim().is_empty())
        }
        non_empty(&self.urine_glucose) && non_empty(&self.urine_protein)
    }
}

/// An ordered collection of screening records with an enrollee-ID index
#[derive(Debug, Clone, Default)]
pub struct ScreeningDataset {
    records: Vec<ScreeningRecord>,
    by_enrollee_id: FxHashMap<String, usize>,
}

impl ScreeningDataset {
    /// Create an empty dataset
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from loaded records
    ///
    /// When two records share an enrollee ID the first one wins the
    /// index slot; both still participate in population aggregates.
    #[must_use]
    pub fn from_records(records: Vec<ScreeningRecord>) -> Self {
        let mut by_enrollee_id =
            FxHashMap::with_capacity_and_hasher(records.len(), Default::default());
        for (idx, record) in records.iter().enumerate() {
            by_enrollee_id
                .entry(record.enrollee_id.clone())
                .or_insert(idx);
        }
        Self {
            records,
            by_enrollee_id,
        }
    }

    /// Append a record to the dataset
    pub fn add(&mut self, record: ScreeningRecord) {
        let idx = self.records.len();
        self.by_enrollee_id
            .entry(record.enrollee_id.clone())
            .or_insert(idx);
        self.records.push(record);
    }

    /// All records in load order
    #[must_use]
    pub fn records(&self) -> &[ScreeningRecord] {
        &self.records
    }

    /// Number of records in the dataset
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by enrollee ID
    #[must_use]
    pub fn get(&self, enrollee_id: &str) -> Option<&ScreeningRecord> {
        self.by_enrollee_id
            .get(enrollee_id)
            .map(|idx| &self.records[*idx])
    }

    /// Fetch the record for a named subject
    ///
    /// # Errors
    /// Returns `ScreeningError::SubjectNotFound` when no record matches.
    pub fn find_by_enrollee_id(&self, enrollee_id: &str) -> Result<&ScreeningRecord> {
        self.get(enrollee_id)
            .ok_or_else(|| ScreeningError::SubjectNotFound(enrollee_id.to_string()))
    }
}

impl FromIterator<ScreeningRecord> for ScreeningDataset {
    fn from_iter<I: IntoIterator<Item = ScreeningRecord>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ScreeningRecord {
        ScreeningRecord::new(id.to_string(), Gender::Male, Some(40))
    }

    #[test]
    fn test_find_by_enrollee_id() {
        let dataset = ScreeningDataset::from_records(vec![record("CL/001"), record("CL/002")]);

        assert_eq!(
            dataset.find_by_enrollee_id("CL/002").unwrap().enrollee_id,
            "CL/002"
        );

        let err = dataset.find_by_enrollee_id("CL/999").unwrap_err();
        assert!(matches!(err, ScreeningError::SubjectNotFound(ref id) if id == "CL/999"));
        assert!(err.to_string().contains("CL/999"));
    }

    #[test]
    fn test_has_blood_pressure_requires_both_readings() {
        let mut r = record("CL/001");
        assert!(!r.has_blood_pressure());
        r.systolic = Some(120.0);
        assert!(!r.has_blood_pressure());
        r.diastolic = Some(80.0);
        assert!(r.has_blood_pressure());
    }

    #[test]
    fn test_has_urine_panel_ignores_blank_values() {
        let mut r = record("CL/001");
        r.urine_glucose = Some("NEGATIVE".to_string());
        assert!(!r.has_urine_panel());
        r.urine_protein = Some("   ".to_string());
        assert!(!r.has_urine_panel());
        r.urine_protein = Some("POSITIVE".to_string());
        assert!(r.has_urine_panel());
    }
}
