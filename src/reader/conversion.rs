//! Screening workbook conversion
//!
//! Converts Arrow record batches from an exported screening workbook
//! into `ScreeningRecord`s. Numeric columns may arrive as floats,
//! integers or text depending on how the workbook was exported, so
//! each cell is coerced individually; unparsable cells become `None`
//! rather than failing the load.

use arrow::array::{Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::warn;

use crate::error::{Result, ScreeningError};
use crate::models::types::{Gender, PsaValue};
use crate::models::ScreeningRecord;
use crate::utils::arrow::{downcast_array, get_column};

/// Column names as they appear in the screening workbook export
pub const ENROLLEE_ID: &str = "ENROLLEE ID";
pub const NAME: &str = "NAME";
pub const GENDER: &str = "GENDER";
pub const AGE: &str = "AGE";
pub const SYSTOLIC: &str = "SYSTOLIC";
pub const DIASTOLIC: &str = "DIASTOLIC";
pub const BLOOD_GLUCOSE: &str = "BLOOD GLUCOSE";
pub const CHOLESTEROL: &str = "CHOLESTEROL";
pub const BMI: &str = "BMI";
pub const URINE_GLUCOSE: &str = "GLUCOSE";
pub const URINE_PROTEIN: &str = "PROTEIN";
pub const PSA: &str = "PSA";

/// Convert one row of a screening batch into a record
///
/// Returns `Ok(None)` for rows without an enrollee ID; every metric
/// cell is optional and loads as `None` when missing or unparsable.
pub fn from_screening_record(batch: &RecordBatch, row: usize) -> Result<Option<ScreeningRecord>> {
    let Some(enrollee_id) = text_value(batch, ENROLLEE_ID, row)? else {
        warn!("Skipping row {row}: no enrollee ID");
        return Ok(None);
    };

    let gender = text_value(batch, GENDER, row)?
        .map_or(Gender::Unknown, |g| Gender::from(g.as_str()));

    let age = numeric_value(batch, AGE, row)?
        .filter(|a| a.is_finite() && *a >= 0.0)
        .map(|a| a as u32);

    let mut record = ScreeningRecord::new(enrollee_id, gender, age);
    record.name = text_value(batch, NAME, row)?;
    record.systolic = numeric_value(batch, SYSTOLIC, row)?;
    record.diastolic = numeric_value(batch, DIASTOLIC, row)?;
    record.blood_glucose = numeric_value(batch, BLOOD_GLUCOSE, row)?;
    record.cholesterol = numeric_value(batch, CHOLESTEROL, row)?;
    record.bmi = numeric_value(batch, BMI, row)?;
    record.urine_glucose = text_value(batch, URINE_GLUCOSE, row)?;
    record.urine_protein = text_value(batch, URINE_PROTEIN, row)?;
    record.psa = psa_value(batch, row)?;

    Ok(Some(record))
}

/// Convert every usable row of a batch
pub fn from_screening_batch(batch: &RecordBatch) -> Result<Vec<ScreeningRecord>> {
    let mut records = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        if let Some(record) = from_screening_record(batch, row)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Read a numeric cell, coercing from the physical column type
///
/// Accepts Float64, Int64, Int32 and Utf8 columns; text that does not
/// parse as a number becomes `None`, the missing-value sentinel.
fn numeric_value(batch: &RecordBatch, column_name: &str, row: usize) -> Result<Option<f64>> {
    let Some(array) = get_column(batch, column_name, false)? else {
        return Ok(None);
    };
    if row >= array.len() || array.is_null(row) {
        return Ok(None);
    }

    let value = match array.data_type() {
        DataType::Float64 => {
            Some(downcast_array::<Float64Array>(&array, column_name, "Float64")?.value(row))
        }
        DataType::Int64 => {
            Some(downcast_array::<Int64Array>(&array, column_name, "Int64")?.value(row) as f64)
        }
        DataType::Int32 => Some(f64::from(
            downcast_array::<Int32Array>(&array, column_name, "Int32")?.value(row),
        )),
        DataType::Utf8 => {
            let text = downcast_array::<StringArray>(&array, column_name, "String")?.value(row);
            text.trim().parse::<f64>().ok()
        }
        _ => {
            return Err(ScreeningError::InvalidDataType {
                column: column_name.to_string(),
                expected: "Float64, Int64, Int32 or Utf8".to_string(),
            });
        }
    };
    Ok(value.filter(|v| v.is_finite()))
}

/// Read a text cell; whitespace-only cells become `None`
fn text_value(batch: &RecordBatch, column_name: &str, row: usize) -> Result<Option<String>> {
    let Some(array) = get_column(batch, column_name, false)? else {
        return Ok(None);
    };
    if row >= array.len() || array.is_null(row) {
        return Ok(None);
    }
    let text = downcast_array::<StringArray>(&array, column_name, "String")?
        .value(row)
        .trim()
        .to_string();
    if text.is_empty() {
        return Ok(None);
    }
    Ok(Some(text))
}

/// Read the polymorphic PSA cell
///
/// Numeric cells and numeric-looking text load as `Numeric`; any other
/// non-empty text stays `Qualitative` for resolution at classification
/// time.
fn psa_value(batch: &RecordBatch, row: usize) -> Result<Option<PsaValue>> {
    let Some(array) = get_column(batch, PSA, false)? else {
        return Ok(None);
    };
    if row >= array.len() || array.is_null(row) {
        return Ok(None);
    }

    if array.data_type() == &DataType::Utf8 {
        let text = downcast_array::<StringArray>(&array, PSA, "String")?
            .value(row)
            .trim()
            .to_string();
        if text.is_empty() {
            return Ok(None);
        }
        if let Ok(number) = text.parse::<f64>() {
            return Ok(Some(PsaValue::Numeric(number)));
        }
        return Ok(Some(PsaValue::Qualitative(text)));
    }

    Ok(numeric_value(batch, PSA, row)?.map(PsaValue::Numeric))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow::datatypes::{Field, Schema};

    fn test_batch() -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new(ENROLLEE_ID, DataType::Utf8, true),
            Field::new(GENDER, DataType::Utf8, true),
            Field::new(AGE, DataType::Int64, true),
            Field::new(SYSTOLIC, DataType::Float64, true),
            Field::new(DIASTOLIC, DataType::Utf8, true),
            Field::new(BMI, DataType::Float64, true),
            Field::new(URINE_GLUCOSE, DataType::Utf8, true),
            Field::new(URINE_PROTEIN, DataType::Utf8, true),
            Field::new(PSA, DataType::Utf8, true),
        ]);
        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(StringArray::from(vec![
                    Some("CL/001"),
                    Some("CL/002"),
                    None,
                ])),
                Arc::new(StringArray::from(vec![Some("M"), Some("female"), Some("F")])),
                Arc::new(Int64Array::from(vec![Some(45), Some(33), Some(29)])),
                Arc::new(Float64Array::from(vec![Some(150.0), None, Some(120.0)])),
                Arc::new(StringArray::from(vec![
                    Some("95"),
                    Some("n/a"),
                    Some("80"),
                ])),
                Arc::new(Float64Array::from(vec![Some(27.4), Some(21.0), None])),
                Arc::new(StringArray::from(vec![
                    Some("NEGATIVE"),
                    Some("  "),
                    Some("positive"),
                ])),
                Arc::new(StringArray::from(vec![
                    Some("NEGATIVE"),
                    Some("NEGATIVE"),
                    Some("negative"),
                ])),
                Arc::new(StringArray::from(vec![
                    Some("POSITIVE"),
                    Some("3.2"),
                    None,
                ])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_row_conversion_with_mixed_types() {
        let batch = test_batch();
        let record = from_screening_record(&batch, 0).unwrap().unwrap();

        assert_eq!(record.enrollee_id, "CL/001");
        assert_eq!(record.gender, Gender::Male);
        assert_eq!(record.age, Some(45));
        assert_eq!(record.systolic, Some(150.0));
        // Diastolic arrives as text and is coerced
        assert_eq!(record.diastolic, Some(95.0));
        assert_eq!(record.bmi, Some(27.4));
        // Cholesterol column absent from the schema entirely
        assert_eq!(record.cholesterol, None);
        assert_eq!(record.psa, Some(PsaValue::Qualitative("POSITIVE".to_string())));
    }

    #[test]
    fn test_unparsable_and_blank_cells_become_missing() {
        let batch = test_batch();
        let record = from_screening_record(&batch, 1).unwrap().unwrap();

        assert_eq!(record.gender, Gender::Female);
        assert_eq!(record.systolic, None);
        assert_eq!(record.diastolic, None); // "n/a" does not parse
        assert_eq!(record.urine_glucose, None); // whitespace-only
        assert_eq!(record.urine_protein, Some("NEGATIVE".to_string()));
        // Numeric-looking PSA text loads as a numeric value
        assert_eq!(record.psa, Some(PsaValue::Numeric(3.2)));
    }

    #[test]
    fn test_rows_without_enrollee_id_are_skipped() {
        let batch = test_batch();
        assert!(from_screening_record(&batch, 2).unwrap().is_none());

        let records = from_screening_batch(&batch).unwrap();
        assert_eq!(records.len(), 2);
    }
}
