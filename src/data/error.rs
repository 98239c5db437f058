use std::path::PathBuf;

use thiserror::Error;

/// The source could not be turned into raw records. Fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("required column '{0}' not found")]
    MissingColumn(&'static str),

    #[error("row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("{0}")]
    Malformed(String),
}

/// A column has no non-missing values, so its fill statistic is undefined.
/// Fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot impute column '{column}': no non-missing values")]
pub struct ImputationError {
    pub column: &'static str,
}

/// A filter selection outside its domain. Recoverable: the previous filter
/// state is kept and nothing is recomputed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {filter} filter value '{value}'")]
pub struct InvalidFilterError {
    pub filter: &'static str,
    pub value: String,
}
