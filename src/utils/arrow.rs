//! Utilities for working with Arrow arrays.
//!
//! Thin helpers for safely extracting columns from record batches
//! during screening file conversion.

use arrow::array::{Array, ArrayRef};
use arrow::record_batch::RecordBatch;
use log::warn;

use crate::error::{Result, ScreeningError};

/// Get a column from a record batch by name
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to extract
/// * `required` - Whether the column is required (error if missing) or optional (None if missing)
///
/// # Returns
///
/// * `Ok(Some(ArrayRef))` - The column array if found
/// * `Ok(None)` - If the column is not found and `required` is false
/// * `Err(ScreeningError)` - If the column is not found and `required` is true
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    required: bool,
) -> Result<Option<ArrayRef>> {
    match batch.schema().index_of(column_name) {
        Ok(idx) => Ok(Some(batch.column(idx).clone())),
        Err(_) => {
            if required {
                return Err(ScreeningError::ColumnNotFound {
                    column: column_name.to_string(),
                });
            }
            Ok(None)
        }
    }
}

/// Downcast an array reference to a concrete array type
///
/// # Arguments
/// * `array` - The array to downcast
/// * `column_name` - The column the array came from (for error context)
/// * `expected_type_name` - Human-readable name of the expected type
///
/// # Errors
/// Returns an error if the array is not of the expected type
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array.as_any().downcast_ref::<A>().ok_or_else(|| {
        warn!("Column '{column_name}' is not a {expected_type_name} array");
        ScreeningError::InvalidDataType {
            column: column_name.to_string(),
            expected: expected_type_name.to_string(),
        }
    })
}
