//! Clinical threshold classification
//!
//! Pure functions mapping one metric's raw value(s) to a category
//! label. Rules are evaluated in order, first match wins, and every
//! function is total over finite inputs. Callers are responsible for
//! checking that the raw fields are present before classifying.

use crate::models::types::{
    BmiCategory, BmiStatus, BpCategory, CholesterolCategory, GlucoseCategory, PsaResult, PsaValue,
    UrineResult,
};

/// Categorize a blood pressure reading pair
#[must_use]
pub fn classify_blood_pressure(systolic: f64, diastolic: f64) -> BpCategory {
    if systolic < 100.0 || diastolic < 60.0 {
        BpCategory::Low
    } else if systolic > 160.0 || diastolic > 99.0 {
        BpCategory::High
    } else if (141.0..=160.0).contains(&systolic) || (91.0..=99.0).contains(&diastolic) {
        BpCategory::ModerateHigh
    } else {
        BpCategory::Normal
    }
}

/// Categorize a blood glucose reading in mg/dL
#[must_use]
pub fn classify_glucose(value: f64) -> GlucoseCategory {
    if value > 125.0 {
        GlucoseCategory::Diabetic
    } else if (100.0..=125.0).contains(&value) {
        GlucoseCategory::PreDiabetic
    } else {
        GlucoseCategory::Normal
    }
}

/// Categorize a total cholesterol reading in mg/dL
#[must_use]
pub fn classify_cholesterol(value: f64) -> CholesterolCategory {
    if value > 240.0 {
        CholesterolCategory::High
    } else if (200.0..=239.0).contains(&value) {
        CholesterolCategory::BorderlineHigh
    } else {
        CholesterolCategory::Normal
    }
}

/// Categorize a BMI value for population aggregates
///
/// The normal band's upper bound is inclusive 25 here, while the
/// individual-profile table in [`classify_bmi_individual`] caps normal
/// at 24.9. The two tables are intentionally kept separate.
#[must_use]
pub fn classify_bmi(value: f64) -> BmiCategory {
    if value > 30.0 {
        BmiCategory::Obesity
    } else if (18.5..=25.0).contains(&value) {
        // 25.0 belongs to the normal band, not overweight
        BmiCategory::Normal
    } else if (25.0..=30.0).contains(&value) {
        BmiCategory::Overweight
    } else {
        BmiCategory::BelowNormal
    }
}

/// Categorize a BMI value for an individual profile
#[must_use]
pub fn classify_bmi_individual(value: f64) -> BmiStatus {
    if value < 18.5 {
        BmiStatus::Underweight
    } else if (18.5..=24.9).contains(&value) {
        BmiStatus::Normal
    } else if (25.0..=29.9).contains(&value) {
        BmiStatus::Overweight
    } else {
        BmiStatus::Obese
    }
}

/// Classify one qualitative urine sub-test
///
/// Returns `None` for the empty string and for any value that does not
/// normalize to POSITIVE or NEGATIVE; such records are excluded from
/// the urine metric rather than surfaced with a fabricated category.
#[must_use]
pub fn classify_urine(raw: &str) -> Option<UrineResult> {
    UrineResult::from_text(raw)
}

/// Resolve a polymorphic PSA value into a qualitative outcome
///
/// Numeric values use the 4.0 ng/mL threshold. Qualitative text must
/// normalize to POSITIVE or NEGATIVE; anything else is unresolvable
/// and yields `None`, which callers treat as "not tested".
#[must_use]
pub fn resolve_psa(value: &PsaValue) -> Option<PsaResult> {
    match value {
        PsaValue::Numeric(v) => {
            if *v > 4.0 {
                Some(PsaResult::Positive)
            } else {
                Some(PsaResult::Negative)
            }
        }
        PsaValue::Qualitative(text) => match text.trim().to_uppercase().as_str() {
            "POSITIVE" => Some(PsaResult::Positive),
            "NEGATIVE" => Some(PsaResult::Negative),
            _ => None,
        },
    }
}
