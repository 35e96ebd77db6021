//! Error handling for the screening analysis library.

use std::io;

/// Specialized error type for screening data loading and analysis
#[derive(Debug, thiserror::Error)]
pub enum ScreeningError {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// A required column is missing from the source data
    #[error("Column '{column}' not found in source data")]
    ColumnNotFound {
        /// Name of the missing column
        column: String,
    },

    /// A column holds a physical type the conversion cannot use
    #[error("Column '{column}' has unexpected type, expected {expected}")]
    InvalidDataType {
        /// Name of the offending column
        column: String,
        /// The type the conversion expected
        expected: String,
    },

    /// No record matches the requested enrollee ID
    #[error("No subject found with enrollee ID '{0}'")]
    SubjectNotFound(String),
}

/// Result type for screening operations
pub type Result<T> = std::result::Result<T, ScreeningError>;
