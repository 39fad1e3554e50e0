//! Per-record coordinate translation
//!
//! A [`RecordTranslator`] knows where the x, y and optional z fields sit in a
//! record, parses them, runs the transformation chain and writes the formatted
//! result back into the same fields. Every other field is copied verbatim and
//! the field order never changes.

use crate::error::{IoError, Result};
use csv::StringRecord;
use rayon::prelude::*;
use reframe_core::{Point, TransformChain};

/// Names of the coordinate columns and output precision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateColumns {
    pub x: String,
    pub y: String,
    pub z: Option<String>,
    /// Number of decimal digits written for each coordinate
    pub digits: usize,
}

impl Default for CoordinateColumns {
    fn default() -> Self {
        Self {
            x: "x".to_string(),
            y: "y".to_string(),
            z: None,
            digits: 4,
        }
    }
}

#[derive(Debug, Clone)]
struct Column {
    name: String,
    index: usize,
}

impl Column {
    fn locate(headers: &StringRecord, name: &str) -> Result<Self> {
        headers
            .iter()
            .position(|header| header == name)
            .map(|index| Column {
                name: name.to_string(),
                index,
            })
            .ok_or_else(|| IoError::MissingColumn {
                column: name.to_string(),
            })
    }

    fn parse(&self, record_number: u64, record: &StringRecord) -> Result<f64> {
        let value = record.get(self.index).ok_or_else(|| IoError::MissingField {
            record: record_number,
            column: self.name.clone(),
        })?;
        value
            .trim()
            .parse()
            .map_err(|_| IoError::InvalidNumericField {
                record: record_number,
                column: self.name.clone(),
                value: value.to_string(),
            })
    }
}

/// Translates records whose layout is given by a header
#[derive(Debug, Clone)]
pub struct RecordTranslator {
    x: Column,
    y: Column,
    z: Option<Column>,
    digits: usize,
    chain: TransformChain,
}

impl RecordTranslator {
    /// Locate the coordinate columns in `headers`
    ///
    /// Fails with [`IoError::MissingColumn`] when x, y or the requested z column
    /// is not part of the header.
    pub fn new(
        headers: &StringRecord,
        columns: &CoordinateColumns,
        chain: TransformChain,
    ) -> Result<Self> {
        Ok(Self {
            x: Column::locate(headers, &columns.x)?,
            y: Column::locate(headers, &columns.y)?,
            z: columns
                .z
                .as_deref()
                .map(|name| Column::locate(headers, name))
                .transpose()?,
            digits: columns.digits,
            chain,
        })
    }

    pub fn chain(&self) -> &TransformChain {
        &self.chain
    }

    /// Read the point stored in a record
    ///
    /// `record_number` is only used in diagnostics.
    pub fn read_point(&self, record_number: u64, record: &StringRecord) -> Result<Point> {
        let x = self.x.parse(record_number, record)?;
        let y = self.y.parse(record_number, record)?;
        let z = self
            .z
            .as_ref()
            .map(|column| column.parse(record_number, record))
            .transpose()?;
        Ok(Point { x, y, z })
    }

    /// Translate a single record
    pub fn translate(&self, record_number: u64, record: &StringRecord) -> Result<StringRecord> {
        let point = self.chain.applied(self.read_point(record_number, record)?);
        let formatted = point.format(self.digits);

        Ok(record
            .iter()
            .enumerate()
            .map(|(index, field)| {
                if index == self.x.index {
                    formatted.x.as_str()
                } else if index == self.y.index {
                    formatted.y.as_str()
                } else {
                    match (&self.z, &formatted.z) {
                        (Some(column), Some(z)) if column.index == index => z.as_str(),
                        _ => field,
                    }
                }
            })
            .collect())
    }

    /// Translate a batch of records in parallel, keeping their order
    ///
    /// `first_record` is the number of the first record of the batch. On
    /// failure the error of the earliest failing record is returned.
    pub fn translate_batch(
        &self,
        first_record: u64,
        records: &[StringRecord],
    ) -> Result<Vec<StringRecord>> {
        let results: Vec<Result<StringRecord>> = records
            .par_iter()
            .enumerate()
            .map(|(offset, record)| self.translate(first_record + offset as u64, record))
            .collect();
        results.into_iter().collect()
    }
}
