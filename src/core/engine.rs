//! Settlement engine
//!
//! This module provides the SettlementEngine, which owns the list of
//! finalised instructions and derives the report datasets from it.
//!
//! The engine works in two phases:
//! - ingestion: records are finalised one at a time and appended, possibly
//!   across several batches
//! - analysis: daily summaries and entity rankings are recomputed from the
//!   full list on every call, never maintained as running totals

use crate::core::aggregator::{rank_entities, summarise_by_date};
use crate::core::calendar::WorkingDayCalendar;
use crate::core::finaliser::Finaliser;
use crate::types::{
    DailySummary, Direction, Instruction, InstructionRecord, RankingEntry, SettlementError,
};

/// Settlement instruction engine
///
/// Finalises incoming records against a working-day calendar and keeps
/// them for reporting.
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    finaliser: Finaliser,
    instructions: Vec<Instruction>,
}

impl SettlementEngine {
    /// Create an empty engine using `calendar` for settlement-date correction
    pub fn new(calendar: WorkingDayCalendar) -> Self {
        SettlementEngine {
            finaliser: Finaliser::new(calendar),
            instructions: Vec::new(),
        }
    }

    /// Finalise a record and append it to the instruction list
    ///
    /// # Returns
    ///
    /// * `Ok(&Instruction)` - the finalised instruction as stored
    /// * `Err(SettlementError)` - the record was rejected and not stored
    pub fn ingest(&mut self, record: InstructionRecord) -> Result<&Instruction, SettlementError> {
        let instruction = self.finaliser.finalise(record)?;
        let index = self.instructions.len();
        self.instructions.push(instruction);
        Ok(&self.instructions[index])
    }

    /// Ingest a batch of records, stopping at the first rejected one
    ///
    /// Records before the failing one stay ingested.
    ///
    /// # Returns
    ///
    /// The number of records ingested from this batch.
    pub fn ingest_all<I>(&mut self, records: I) -> Result<usize, SettlementError>
    where
        I: IntoIterator<Item = InstructionRecord>,
    {
        let mut count = 0;
        for record in records {
            self.ingest(record)?;
            count += 1;
        }
        Ok(count)
    }

    /// All finalised instructions in ingestion order
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn calendar(&self) -> &WorkingDayCalendar {
        self.finaliser.calendar()
    }

    /// Incoming and outgoing USD totals per settlement date
    ///
    /// Fails with `ArithmeticOverflow` if a day's total cannot be held
    /// exactly.
    pub fn daily_summary(&self) -> Result<DailySummary, SettlementError> {
        summarise_by_date(&self.instructions)
    }

    /// Entities ranked by total USD amount for `direction`
    pub fn entity_ranking(&self, direction: Direction) -> Result<Vec<RankingEntry>, SettlementError> {
        rank_entities(&self.instructions, direction)
    }
}
