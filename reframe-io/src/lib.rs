//! Batch record translation for reframe
//!
//! This crate applies a resolved [`TransformChain`](reframe_core::TransformChain)
//! to tabular point files: coordinate columns are located by name in the
//! header, rewritten with a fixed number of decimal digits, and every other
//! column is passed through unchanged.

pub mod csv_batch;
pub mod error;
pub mod record;

pub use csv_batch::{
    read_columns, translate_csv_file, CsvTranslateOptions, CsvTranslation, Delimiter,
    LOG_RECORD_FREQUENCY,
};
pub use error::*;
pub use record::{CoordinateColumns, RecordTranslator};
