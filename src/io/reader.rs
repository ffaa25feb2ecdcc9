//! Delimited instruction reader with iterator interface
//!
//! Provides a streaming iterator over instruction records from any
//! `io::Read` source (a file or standard input). Delegates field layout and
//! type conversion to the record_format module.
//!
//! # Input Layout
//!
//! Rows are tab-separated by default, with the fields listed in
//! [`FIELD_NAMES`]. A header row is optional and may repeat anywhere in
//! the stream; it is recognised by its first two fields and skipped.
//! Surrounding whitespace is trimmed and blank lines are ignored.
//!
//! ```no_run
//! use settlement_reports::io::InstructionReader;
//! use std::path::Path;
//!
//! let reader = InstructionReader::from_path(Path::new("instructions.tsv"), b'\t').unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("{} {}", record.entity, record.settlement_date),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found) are returned from the constructors
//! - Individual malformed rows are yielded as Err variants carrying the
//!   line number and field name; iteration can continue past them

use crate::io::record_format::{convert_raw_record, is_header, RawRecord, FIELD_NAMES};
use crate::types::{InstructionRecord, SettlementError};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default field delimiter
pub const DEFAULT_DELIMITER: u8 = b'\t';

/// Streaming reader of instruction records
#[derive(Debug)]
pub struct InstructionReader<R: Read> {
    reader: csv::Reader<R>,
    fields: StringRecord,
}

impl InstructionReader<File> {
    /// Open a file for reading
    ///
    /// # Errors
    ///
    /// * `FileNotFound` if the path does not exist
    /// * `IoError` for any other open failure
    pub fn from_path(path: &Path, delimiter: u8) -> Result<Self, SettlementError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SettlementError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => SettlementError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        Ok(Self::new(file, delimiter))
    }
}

impl<R: Read> InstructionReader<R> {
    /// Wrap any reader
    ///
    /// The underlying CSV reader is configured to:
    /// - Use `delimiter` between fields, with quoting disabled
    /// - Trim whitespace from all fields
    /// - Treat every row as data (headers are detected per row)
    /// - Allow rows of any length, so short rows can be reported by field
    pub fn new(reader: R, delimiter: u8) -> Self {
        let reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .quoting(false)
            .has_headers(false)
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(reader);

        Self {
            reader,
            fields: StringRecord::new(),
        }
    }

    fn convert_current(&self) -> Result<InstructionRecord, SettlementError> {
        let line = self.fields.position().map(|pos| pos.line());

        if self.fields.len() < FIELD_NAMES.len() {
            return Err(SettlementError::parse_field(
                line,
                FIELD_NAMES[self.fields.len()],
                format!(
                    "expected {} fields, found {}",
                    FIELD_NAMES.len(),
                    self.fields.len()
                ),
            ));
        }

        let raw: RawRecord = self.fields.deserialize(None)?;

        convert_raw_record(raw, line)
    }
}

impl<R: Read> Iterator for InstructionReader<R> {
    type Item = Result<InstructionRecord, SettlementError>;

    /// Get the next instruction record
    ///
    /// Header rows and rows with only empty fields are skipped.
    ///
    /// # Returns
    ///
    /// * `Some(Ok(InstructionRecord))` - Successfully decoded row
    /// * `Some(Err(SettlementError))` - Read, layout or conversion error
    /// * `None` - End of input reached
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_record(&mut self.fields) {
                Ok(false) => return None,
                Ok(true) => {
                    if is_header(&self.fields) || self.fields.iter().all(str::is_empty) {
                        continue;
                    }
                    return Some(self.convert_current());
                }
                Err(e) => return Some(Err(SettlementError::from(e))),
            }
        }
    }
}
