//! Error types for batch record translation

use thiserror::Error;

/// Errors that can occur while translating coordinate records
#[derive(Error, Debug)]
pub enum IoError {
    #[error("column '{column}' is not in the input header")]
    MissingColumn { column: String },

    #[error("record {record} has no field for column '{column}'")]
    MissingField { record: u64, column: String },

    #[error("record {record}: value '{value}' of column '{column}' is not a number")]
    InvalidNumericField {
        record: u64,
        column: String,
        value: String,
    },

    #[error("invalid delimiter '{0}': expected a single ASCII character, 'tab', 'space' or 'auto'")]
    InvalidDelimiter(String),

    #[error("could not detect the delimiter of header line '{0}'")]
    UndetectedDelimiter(String),

    #[error("output file {path} already exists")]
    OutputExists { path: String },

    #[error("output file {path} is the input file")]
    OutputIsInput { path: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] reframe_core::Error),
}

/// Result type alias for batch translation
pub type Result<T> = std::result::Result<T, IoError>;
