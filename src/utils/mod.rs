//! Shared utility functions
//!
//! Holds the single rounding convention used for every derived
//! percentage and average, so all output surfaces agree to the digit.

pub mod arrow;

/// Round to two decimal places
///
/// Every percentage and average the library emits goes through this
/// function; components must not roll their own rounding.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of `count` over `total`, rounded to two decimals
///
/// Returns 0.0 for an empty denominator rather than dividing by zero.
#[must_use]
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

/// Arithmetic mean of the values, `None` when empty
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
