//! Common domain type definitions
//!
//! This module contains the enum types shared across the screening
//! domain: subject demographics, the category labels produced by the
//! metric classifiers, and the polymorphic PSA value.

use std::fmt;

use serde::Serialize;

/// Gender of a screened subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Gender {
    /// Male gender
    #[serde(rename = "MALE")]
    Male,
    /// Female gender
    #[serde(rename = "FEMALE")]
    Female,
    /// Unknown or not specified
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl From<&str> for Gender {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" | "1" => Self::Male,
            "f" | "female" | "2" => Self::Female,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{label}")
    }
}

/// Fixed age bins used for the demographic age distribution
///
/// Bins are right-closed and left-open, except the first bin which also
/// includes age 0. Ages above 70 fall outside every bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AgeGroup {
    /// Ages 0 through 20
    #[serde(rename = "0-20")]
    UpTo20,
    /// Ages 21 through 30
    #[serde(rename = "21-30")]
    From21To30,
    /// Ages 31 through 40
    #[serde(rename = "31-40")]
    From31To40,
    /// Ages 41 through 50
    #[serde(rename = "41-50")]
    From41To50,
    /// Ages 51 through 60
    #[serde(rename = "51-60")]
    From51To60,
    /// Ages 61 through 70
    #[serde(rename = "61-70")]
    From61To70,
}

impl AgeGroup {
    /// All bins in ascending order, for zero-filled distributions
    pub const ALL: [Self; 6] = [
        Self::UpTo20,
        Self::From21To30,
        Self::From31To40,
        Self::From41To50,
        Self::From51To60,
        Self::From61To70,
    ];

    /// Place an age into its bin, if any bin covers it
    #[must_use]
    pub const fn from_age(age: u32) -> Option<Self> {
        match age {
            0..=20 => Some(Self::UpTo20),
            21..=30 => Some(Self::From21To30),
            31..=40 => Some(Self::From31To40),
            41..=50 => Some(Self::From41To50),
            51..=60 => Some(Self::From51To60),
            61..=70 => Some(Self::From61To70),
            _ => None,
        }
    }

    /// Report label for this bin
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::UpTo20 => "0-20",
            Self::From21To30 => "21-30",
            Self::From31To40 => "31-40",
            Self::From41To50 => "41-50",
            Self::From51To60 => "51-60",
            Self::From61To70 => "61-70",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Blood pressure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BpCategory {
    /// Systolic below 100 or diastolic below 60
    #[serde(rename = "LOW")]
    Low,
    /// Within the normal range
    #[serde(rename = "NORMAL")]
    Normal,
    /// Systolic 141-160 or diastolic 91-99
    #[serde(rename = "MODERATE HIGH")]
    ModerateHigh,
    /// Systolic above 160 or diastolic above 99
    #[serde(rename = "HIGH")]
    High,
}

impl fmt::Display for BpCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::ModerateHigh => "MODERATE HIGH",
            Self::High => "HIGH",
        };
        write!(f, "{label}")
    }
}

/// Blood glucose category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum GlucoseCategory {
    /// Below 100 mg/dL
    #[serde(rename = "NORMAL")]
    Normal,
    /// 100-125 mg/dL
    #[serde(rename = "PRE_DIABETIC")]
    PreDiabetic,
    /// Above 125 mg/dL
    #[serde(rename = "DIABETIC")]
    Diabetic,
}

impl fmt::Display for GlucoseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Normal => "NORMAL",
            Self::PreDiabetic => "PRE_DIABETIC",
            Self::Diabetic => "DIABETIC",
        };
        write!(f, "{label}")
    }
}

/// Total cholesterol category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CholesterolCategory {
    /// Below 200 mg/dL
    #[serde(rename = "NORMAL")]
    Normal,
    /// 200-239 mg/dL
    #[serde(rename = "BORDERLINE HIGH")]
    BorderlineHigh,
    /// Above 240 mg/dL
    #[serde(rename = "HIGH")]
    High,
}

impl fmt::Display for CholesterolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Normal => "NORMAL",
            Self::BorderlineHigh => "BORDERLINE HIGH",
            Self::High => "HIGH",
        };
        write!(f, "{label}")
    }
}

/// BMI category used for population aggregates
///
/// The population and individual BMI tables use different boundary
/// semantics and are kept as two separate types; see `BmiStatus` for
/// the individual-profile variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BmiCategory {
    /// Below 18.5
    #[serde(rename = "BELOW NORMAL")]
    BelowNormal,
    /// 18.5 to 25 inclusive
    #[serde(rename = "NORMAL")]
    Normal,
    /// 25 to 30 inclusive
    #[serde(rename = "OVERWEIGHT")]
    Overweight,
    /// Above 30
    #[serde(rename = "OBESITY")]
    Obesity,
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BelowNormal => "BELOW NORMAL",
            Self::Normal => "NORMAL",
            Self::Overweight => "OVERWEIGHT",
            Self::Obesity => "OBESITY",
        };
        write!(f, "{label}")
    }
}

/// BMI status used for individual profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BmiStatus {
    /// Below 18.5
    #[serde(rename = "UNDERWEIGHT")]
    Underweight,
    /// 18.5 to 24.9
    #[serde(rename = "NORMAL")]
    Normal,
    /// 25 to 29.9
    #[serde(rename = "OVERWEIGHT")]
    Overweight,
    /// Everything above
    #[serde(rename = "OBESE")]
    Obese,
}

impl fmt::Display for BmiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Underweight => "UNDERWEIGHT",
            Self::Normal => "NORMAL",
            Self::Overweight => "OVERWEIGHT",
            Self::Obese => "OBESE",
        };
        write!(f, "{label}")
    }
}

/// Result of one qualitative urine sub-test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum UrineResult {
    /// No glucose/protein detected
    #[serde(rename = "NEGATIVE")]
    Negative,
    /// Glucose/protein detected
    #[serde(rename = "POSITIVE")]
    Positive,
}

impl UrineResult {
    /// Parse a normalized qualitative value
    ///
    /// Trims and upper-cases the input. Returns `None` for anything
    /// other than POSITIVE or NEGATIVE, including the empty string.
    #[must_use]
    pub fn from_text(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "POSITIVE" => Some(Self::Positive),
            "NEGATIVE" => Some(Self::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for UrineResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Negative => "NEGATIVE",
            Self::Positive => "POSITIVE",
        };
        write!(f, "{label}")
    }
}

/// Resolved PSA outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PsaResult {
    /// At or below the 4.0 ng/mL threshold, or reported negative
    #[serde(rename = "NEGATIVE")]
    Negative,
    /// Above the 4.0 ng/mL threshold, or reported positive
    #[serde(rename = "POSITIVE")]
    Positive,
}

impl fmt::Display for PsaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Negative => "NEGATIVE",
            Self::Positive => "POSITIVE",
        };
        write!(f, "{label}")
    }
}

/// Raw PSA value as it appears in the source data
///
/// Laboratories report PSA either as a concentration or as an already
/// qualitative outcome, so the raw value is kept as a tagged variant
/// and resolved into a `PsaResult` at classification time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PsaValue {
    /// Concentration in ng/mL
    Numeric(f64),
    /// Qualitative report text, e.g. "POSITIVE"
    Qualitative(String),
}
