//! Screening file reading
//!
//! Loads exported screening workbooks (Parquet) into typed datasets.
//! The reader performs the type coercion the analysis layer relies on:
//! numeric columns become `Option<f64>` with unparsable cells left as
//! `None`, qualitative columns load as trimmed raw text.

pub mod conversion;

use std::fs::File;
use std::path::{Path, PathBuf};

use log::info;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use rayon::prelude::*;

use crate::error::Result;
use crate::models::ScreeningDataset;

/// Read one screening file into a dataset
///
/// # Errors
/// Returns an error if the file cannot be opened or is not valid
/// Parquet; individual malformed rows are skipped, not fatal.
pub fn read_screening_file(path: &Path) -> Result<ScreeningDataset> {
    info!("Reading screening file {}", path.display());

    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        records.extend(conversion::from_screening_batch(&batch)?);
    }

    info!(
        "Loaded {} screening records from {}",
        records.len(),
        path.display()
    );
    Ok(ScreeningDataset::from_records(records))
}

/// Load multiple screening files in parallel
///
/// Datasets come back in the same order as `paths`. The first failing
/// file fails the whole load.
///
/// # Errors
/// Returns the first error encountered across the files.
pub fn load_screening_files_parallel(paths: &[PathBuf]) -> Result<Vec<ScreeningDataset>> {
    info!("Loading {} screening files in parallel", paths.len());
    paths
        .par_iter()
        .map(|path| read_screening_file(path))
        .collect()
}
