//! Error types for the settlement engine
//!
//! This module defines all error types that can occur while reading,
//! finalising and reporting on settlement instructions.
//! Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Parse Errors**: Missing or unparseable fields in an input record
//! - **Value Errors**: Decoded values that make no sense for a settlement
//! - **Arithmetic Errors**: Overflow while computing the USD amount
//! - **Calendar Errors**: Invalid working-day calendar configuration
//!
//! An unknown currency is not an error: it resolves to the default calendar.

use thiserror::Error;

/// Main error type for the settlement engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettlementError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading input or writing reports
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A record field is missing or cannot be decoded
    ///
    /// The record is rejected; it never reaches the finaliser.
    #[error("Parse error{}{}: {message}",
        line.map(|l| format!(" at line {}", l)).unwrap_or_default(),
        field.as_ref().map(|f| format!(" in field '{}'", f)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Name of the offending field (if known)
        field: Option<String>,
        /// Description of the parsing error
        message: String,
    },

    /// A decoded value is not usable for settlement
    #[error("Invalid {field} '{value}' for entity '{entity}'")]
    InvalidValue {
        /// Entity of the rejected instruction
        entity: String,
        /// Name of the offending field
        field: String,
        /// The rejected value
        value: String,
    },

    /// The USD amount does not fit into a decimal
    #[error("Arithmetic overflow computing USD amount for entity '{entity}'")]
    ArithmeticOverflow {
        /// Entity of the rejected instruction
        entity: String,
    },

    /// The working-day calendar configuration is invalid
    #[error("Calendar configuration error: {message}")]
    CalendarError {
        /// Description of the configuration problem
        message: String,
    },
}

impl From<std::io::Error> for SettlementError {
    fn from(error: std::io::Error) -> Self {
        SettlementError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for SettlementError {
    fn from(error: csv::Error) -> Self {
        if error.is_io_error() {
            return SettlementError::IoError {
                message: error.to_string(),
            };
        }

        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        SettlementError::ParseError {
            line,
            field: None,
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for SettlementError {
    fn from(error: toml::de::Error) -> Self {
        SettlementError::CalendarError {
            message: error.to_string(),
        }
    }
}

impl SettlementError {
    /// Create a ParseError for a named field
    pub fn parse_field(line: Option<u64>, field: &str, message: impl Into<String>) -> Self {
        SettlementError::ParseError {
            line,
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(entity: &str, field: &str, value: impl ToString) -> Self {
        SettlementError::InvalidValue {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(entity: &str) -> Self {
        SettlementError::ArithmeticOverflow {
            entity: entity.to_string(),
        }
    }

    /// Create a CalendarError
    pub fn calendar(message: impl Into<String>) -> Self {
        SettlementError::CalendarError {
            message: message.into(),
        }
    }
}
