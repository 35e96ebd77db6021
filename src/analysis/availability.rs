//! Metric availability detection
//!
//! Decides, per metric, whether a dataset holds enough valid data for
//! that metric's analysis to run at all. A source column that is absent
//! from the workbook loads as `None` in every record, so whole-column
//! gaps (the common case for cholesterol) collapse into the same check.

use crate::models::ScreeningRecord;

/// Per-metric availability flags for one dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricAvailability {
    /// At least one record carries both blood pressure readings
    pub blood_pressure: bool,
    /// At least one record carries a blood glucose value
    pub blood_glucose: bool,
    /// At least one record carries a cholesterol value
    pub cholesterol: bool,
    /// At least one record carries a BMI value
    pub bmi: bool,
    /// At least one record carries both urine sub-tests
    pub urine: bool,
}

impl MetricAvailability {
    /// Inspect a record sequence and flag each analyzable metric
    #[must_use]
    pub fn detect(records: &[ScreeningRecord]) -> Self {
        Self {
            blood_pressure: records.iter().any(ScreeningRecord::has_blood_pressure),
            blood_glucose: records.iter().any(|r| r.blood_glucose.is_some()),
            cholesterol: records.iter().any(|r| r.cholesterol.is_some()),
            bmi: records.iter().any(|r| r.bmi.is_some()),
            urine: records.iter().any(ScreeningRecord::has_urine_panel),
        }
    }
}
