use crate::core::WorkingDayCalendar;
use crate::io::reader::DEFAULT_DELIMITER;
use crate::pipeline::{ErrorPolicy, Pipeline};
use crate::types::SettlementError;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Report daily USD settlement totals and entity rankings
#[derive(Parser, Debug)]
#[command(name = "settlement-reports")]
#[command(about = "Report daily USD settlement totals and entity rankings", long_about = None)]
pub struct CliArgs {
    /// Input file with one instruction per line (standard input if omitted)
    #[arg(value_name = "INPUT", help = "Path to the input file (reads stdin if omitted)")]
    pub input_file: Option<PathBuf>,

    /// Field delimiter
    #[arg(
        long = "delimiter",
        short = 'd',
        value_name = "CHAR",
        default_value = "tab",
        value_parser = parse_delimiter,
        help = "Field delimiter: a single ASCII character or 'tab'"
    )]
    pub delimiter: u8,

    /// Working-day calendar file
    #[arg(
        long = "calendar",
        value_name = "FILE",
        help = "TOML file with closed weekdays per currency (built-in table if omitted)"
    )]
    pub calendar: Option<PathBuf>,

    /// Handling of records that cannot be decoded or finalised
    #[arg(
        long = "on-error",
        value_name = "POLICY",
        default_value = "abort",
        help = "'abort' stops at the first bad record, 'skip' logs it and continues"
    )]
    pub on_error: ErrorPolicy,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(DEFAULT_DELIMITER),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(format!(
                    "expected a single ASCII character or 'tab', got '{}'",
                    value
                )),
            }
        }
    }
}

impl CliArgs {
    /// Build the report pipeline from CLI arguments
    ///
    /// Loads the calendar file when one is given, otherwise uses the
    /// built-in calendar.
    pub fn to_pipeline(&self) -> Result<Pipeline, SettlementError> {
        let calendar = match &self.calendar {
            Some(path) => WorkingDayCalendar::from_file(path)?,
            None => WorkingDayCalendar::default(),
        };

        Ok(Pipeline::new(calendar, self.delimiter, self.on_error))
    }

    /// Default log filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
