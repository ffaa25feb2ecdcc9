//! End-to-end report pipeline
//!
//! Orchestrates a complete run by coordinating between the
//! InstructionReader (input), the SettlementEngine (finalisation and
//! aggregation) and the report writers (output).
//!
//! # Design
//!
//! The run is a single sequential pass in two phases:
//! 1. every row is decoded and finalised into the engine
//! 2. only once input is exhausted are the summaries computed and written
//!
//! The error policy decides what happens to a row that cannot be decoded
//! or finalised: `Abort` stops the run with that error, `Skip` logs it and
//! carries on with the next row.

use crate::core::{SettlementEngine, WorkingDayCalendar};
use crate::io::reader::{InstructionReader, DEFAULT_DELIMITER};
use crate::io::report::{write_daily_report, write_ranking_report, REPORT_SEPARATOR};
use crate::types::{Direction, InstructionRecord, SettlementError};
use clap::ValueEnum;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// What to do with a record that fails decoding or finalisation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ErrorPolicy {
    /// Stop at the first bad record
    #[default]
    Abort,
    /// Log the bad record and continue
    Skip,
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Records finalised into the engine
    pub ingested: usize,
    /// Records rejected under the `Skip` policy
    pub skipped: usize,
}

/// Configured report pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    calendar: WorkingDayCalendar,
    delimiter: u8,
    policy: ErrorPolicy,
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::new(WorkingDayCalendar::default(), DEFAULT_DELIMITER, ErrorPolicy::Abort)
    }
}

impl Pipeline {
    pub fn new(calendar: WorkingDayCalendar, delimiter: u8, policy: ErrorPolicy) -> Self {
        Pipeline {
            calendar,
            delimiter,
            policy,
        }
    }

    /// Read every instruction from `input` into a fresh engine
    ///
    /// # Errors
    ///
    /// Under `Abort`, the first parse or finalisation error. Under `Skip`,
    /// only I/O errors from the underlying reader.
    pub fn ingest<R: Read>(
        &self,
        input: R,
    ) -> Result<(SettlementEngine, RunStats), SettlementError> {
        self.ingest_records(InstructionReader::new(input, self.delimiter))
    }

    /// Finalise already-decoded records into a fresh engine
    ///
    /// Decoding errors in the stream are subject to the error policy just
    /// like finalisation errors.
    pub fn ingest_records<I>(&self, records: I) -> Result<(SettlementEngine, RunStats), SettlementError>
    where
        I: IntoIterator<Item = Result<InstructionRecord, SettlementError>>,
    {
        let mut engine = SettlementEngine::new(self.calendar.clone());
        let mut stats = RunStats::default();

        for result in records {
            let outcome = result.and_then(|record| engine.ingest(record).map(|_| ()));
            match outcome {
                Ok(()) => stats.ingested += 1,
                Err(e @ SettlementError::IoError { .. }) => return Err(e),
                Err(e) => match self.policy {
                    ErrorPolicy::Abort => return Err(e),
                    ErrorPolicy::Skip => {
                        warn!(error = %e, "skipping instruction");
                        stats.skipped += 1;
                    }
                },
            }
        }

        info!(
            ingested = stats.ingested,
            skipped = stats.skipped,
            "instructions finalised"
        );

        Ok((engine, stats))
    }

    /// Ingest `input` and write all three reports to `output`
    ///
    /// Nothing is written if ingestion fails.
    pub fn process<R: Read>(
        &self,
        input: R,
        output: &mut dyn Write,
    ) -> Result<RunStats, SettlementError> {
        let (engine, stats) = self.ingest(input)?;
        write_reports(&engine, output)?;
        Ok(stats)
    }

    /// Like [`Pipeline::process`], reading from a file
    pub fn process_path(
        &self,
        path: &Path,
        output: &mut dyn Write,
    ) -> Result<RunStats, SettlementError> {
        let reader = InstructionReader::from_path(path, self.delimiter)?;
        let (engine, stats) = self.ingest_records(reader)?;
        write_reports(&engine, output)?;
        Ok(stats)
    }
}

/// Write the daily report and both rankings, each preceded by a separator
///
/// All three datasets are computed before the first byte is written, so
/// an `ArithmeticOverflow` leaves `output` untouched.
pub fn write_reports(
    engine: &SettlementEngine,
    output: &mut dyn Write,
) -> Result<(), SettlementError> {
    let summary = engine.daily_summary()?;
    let incoming = engine.entity_ranking(Direction::Incoming)?;
    let outgoing = engine.entity_ranking(Direction::Outgoing)?;

    writeln!(output, "{}", REPORT_SEPARATOR)?;
    write_daily_report(&summary, output)?;

    for (direction, ranking) in [(Direction::Incoming, incoming), (Direction::Outgoing, outgoing)] {
        writeln!(output, "{}", REPORT_SEPARATOR)?;
        write_ranking_report(direction, &ranking, output)?;
    }

    output.flush()?;
    Ok(())
}
