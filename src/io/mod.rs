//! I/O module
//!
//! Handles instruction input and report output.
//!
//! # Components
//!
//! - `record_format` - Input record layout and conversion to typed records
//! - `reader` - Delimited reader with iterator interface
//! - `report` - Fixed-width text reports

pub mod reader;
pub mod record_format;
pub mod report;

pub use reader::InstructionReader;
pub use record_format::{convert_raw_record, RawRecord, DATE_FORMAT};
pub use report::{write_daily_report, write_ranking_report, REPORT_SEPARATOR};
