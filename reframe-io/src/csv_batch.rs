//! CSV batch translation
//!
//! This module rewrites the coordinate columns of a delimited text file:
//! - Configurable delimiter, or auto-detection from the header line
//! - x and y columns (required) and an optional z column, found by name
//! - Every other column copied verbatim, column order preserved
//! - Records processed in parallel chunks, written back in input order
//! - Refuses to overwrite an existing output file unless asked to

use crate::error::{IoError, Result};
use crate::record::{CoordinateColumns, RecordTranslator};
use csv::StringRecord;
use reframe_core::TransformChain;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;
use std::str::FromStr;

/// A debug line is logged every this many records
pub const LOG_RECORD_FREQUENCY: u64 = 10_000;

/// Supported delimiters for CSV files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    Comma,
    Space,
    Tab,
    #[default]
    Semicolon,
    /// Any other single ASCII character
    Other(u8),
}

impl Delimiter {
    /// Get the byte representation of the delimiter
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Space => b' ',
            Delimiter::Tab => b'\t',
            Delimiter::Semicolon => b';',
            Delimiter::Other(byte) => *byte,
        }
    }

    /// Detect delimiter from a line of text
    ///
    /// The most frequent candidate wins. On a tie the precedence is semicolon,
    /// then tab, then space, then comma.
    pub fn detect_from_line(line: &str) -> Option<Self> {
        let counts = [
            (line.matches(',').count(), Delimiter::Comma),
            (line.matches(' ').count(), Delimiter::Space),
            (line.matches('\t').count(), Delimiter::Tab),
            (line.matches(';').count(), Delimiter::Semicolon),
        ];

        counts
            .iter()
            .max_by_key(|(count, _)| count)
            .filter(|(count, _)| *count > 0)
            .map(|(_, delimiter)| *delimiter)
    }
}

impl FromStr for Delimiter {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "," => Ok(Delimiter::Comma),
            ";" => Ok(Delimiter::Semicolon),
            "\t" | "tab" => Ok(Delimiter::Tab),
            " " | "space" => Ok(Delimiter::Space),
            other if other.len() == 1 && other.is_ascii() => {
                Ok(Delimiter::Other(other.as_bytes()[0]))
            }
            other => Err(IoError::InvalidDelimiter(other.to_string())),
        }
    }
}

/// Options for [`CsvTranslation`]
#[derive(Debug, Clone)]
pub struct CsvTranslateOptions {
    pub columns: CoordinateColumns,
    /// `None` detects the delimiter from the header line
    pub delimiter: Option<Delimiter>,
    /// Number of records translated together
    pub chunk_size: usize,
}

impl Default for CsvTranslateOptions {
    fn default() -> Self {
        Self {
            columns: CoordinateColumns::default(),
            delimiter: Some(Delimiter::default()),
            chunk_size: LOG_RECORD_FREQUENCY as usize,
        }
    }
}

/// Open a CSV reader, detecting the delimiter from the first line if needed
fn open_reader<'a, R: Read + 'a>(
    input: R,
    delimiter: Option<Delimiter>,
) -> Result<(csv::Reader<Box<dyn Read + 'a>>, Delimiter)> {
    let mut buffered = BufReader::new(input);
    let (source, delimiter): (Box<dyn Read + 'a>, Delimiter) = match delimiter {
        Some(delimiter) => (Box::new(buffered), delimiter),
        None => {
            let mut first_line = String::new();
            buffered.read_line(&mut first_line)?;
            let delimiter = Delimiter::detect_from_line(first_line.trim_end())
                .ok_or_else(|| IoError::UndetectedDelimiter(first_line.trim_end().to_string()))?;
            log::debug!("Detected delimiter {:?}", delimiter);
            (Box::new(Cursor::new(first_line).chain(buffered)), delimiter)
        }
    };

    // Short records are reported per column by the record translator
    let reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .flexible(true)
        .from_reader(source);
    Ok((reader, delimiter))
}

/// Read the column names of a CSV file
pub fn read_columns<P: AsRef<Path>>(path: P, delimiter: Option<Delimiter>) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let (mut reader, _) = open_reader(file, delimiter)?;
    Ok(reader.headers()?.iter().map(str::to_string).collect())
}

/// A CSV input whose header has been validated against the coordinate columns
pub struct CsvTranslation<'a> {
    reader: csv::Reader<Box<dyn Read + 'a>>,
    headers: StringRecord,
    delimiter: Delimiter,
    translator: RecordTranslator,
    chunk_size: usize,
}

impl<'a> CsvTranslation<'a> {
    /// Read the header and locate the coordinate columns
    pub fn new<R: Read + 'a>(
        input: R,
        chain: TransformChain,
        options: &CsvTranslateOptions,
    ) -> Result<Self> {
        let (mut reader, delimiter) = open_reader(input, options.delimiter)?;
        let headers = reader.headers()?.clone();
        let translator = RecordTranslator::new(&headers, &options.columns, chain)?;

        Ok(Self {
            reader,
            headers,
            delimiter,
            translator,
            chunk_size: options.chunk_size.max(1),
        })
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// Translate every record and write header plus records to `output`
    ///
    /// Returns the number of records written.
    pub fn write_to<W: Write>(mut self, output: W) -> Result<u64> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter.as_byte())
            .from_writer(output);
        writer.write_record(&self.headers)?;

        let mut count: u64 = 0;
        let mut chunk = Vec::with_capacity(self.chunk_size);
        let mut records = self.reader.records();

        loop {
            chunk.clear();
            for record in records.by_ref().take(self.chunk_size) {
                chunk.push(record?);
            }
            if chunk.is_empty() {
                break;
            }

            let translated = self.translator.translate_batch(count + 1, &chunk)?;
            for record in &translated {
                if count % LOG_RECORD_FREQUENCY == 0 {
                    log::debug!("{}: {}", count, record.iter().collect::<Vec<_>>().join(", "));
                }
                writer.write_record(record)?;
                count += 1;
            }
        }

        writer.flush()?;
        log::info!("End of input, {} records processed", count);
        Ok(count)
    }
}

/// Translate a CSV file into another one
///
/// The output file must not exist unless `overwrite` is set, and it can never
/// be the input file itself. Column checks run before the output file is
/// created.
pub fn translate_csv_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    chain: TransformChain,
    options: &CsvTranslateOptions,
    overwrite: bool,
) -> Result<u64> {
    let output = output.as_ref();
    let output_exists = || IoError::OutputExists {
        path: output.display().to_string(),
    };
    if output.exists() {
        if !overwrite {
            return Err(output_exists());
        }
        if std::fs::canonicalize(input.as_ref())? == std::fs::canonicalize(output)? {
            return Err(IoError::OutputIsInput {
                path: output.display().to_string(),
            });
        }
    }

    let translation = CsvTranslation::new(File::open(input)?, chain, options)?;

    let file = if overwrite {
        File::create(output)?
    } else {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(output)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => output_exists(),
                _ => IoError::Io(e),
            })?
    };

    log::info!("Writing {}", output.display());
    translation.write_to(BufWriter::new(file))
}
