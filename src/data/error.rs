//! Error types for ingestion and dataset loading.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the normalization batch. Any of them halts the run before
/// the canonical file is touched.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("No readable input files found in {0}")]
    NoInputFiles(PathBuf),
    #[error("Row {row}: malformed season {value:?}, expected YYYY/YYYY")]
    MalformedRecord { row: usize, value: String },
    #[error("Input is missing required column '{0}'")]
    MissingColumn(String),
    #[error("Failed to process CSV: {0}")]
    Polars(#[from] PolarsError),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures while loading the canonical dataset into a typed snapshot.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Canonical dataset not found at {0}")]
    CanonicalFileMissing(PathBuf),
    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),
    #[error("Row {row}: invalid {column} value {value:?}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("Failed to load CSV: {0}")]
    Polars(#[from] PolarsError),
}
