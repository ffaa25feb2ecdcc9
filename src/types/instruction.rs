//! Instruction-related types for the settlement engine
//!
//! This module defines the settlement direction, the decoded instruction
//! record handed over by the reader, and the finalised instruction that the
//! aggregator consumes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Direction of the USD settlement flow relative to the reporting entity
///
/// Derived from the instruction's buy/sell flag: a buy instruction is an
/// outgoing settlement, a sell instruction is an incoming one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Funds settled to us (sell instructions)
    Incoming,

    /// Funds settled by us (buy instructions)
    Outgoing,
}

impl Direction {
    /// Lowercase label used in report titles and log events
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Incoming => "incoming",
            Direction::Outgoing => "outgoing",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Parse the buy/sell flag of an input record
    ///
    /// Accepts `B`/`S` and `Buy`/`Sell`, case-insensitive.
    fn from_str(flag: &str) -> Result<Self, Self::Err> {
        match flag.trim().to_ascii_uppercase().as_str() {
            "B" | "BUY" => Ok(Direction::Outgoing),
            "S" | "SELL" => Ok(Direction::Incoming),
            other => Err(format!("expected 'B' or 'S', got '{}'", other)),
        }
    }
}

/// Decoded instruction record, not yet finalised
///
/// Produced by the reader once every field has been type-cast. The
/// settlement date is the one requested by the client and may fall on a
/// non-working day.
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionRecord {
    /// Counterparty identifier
    pub entity: String,

    /// Settlement direction derived from the buy/sell flag
    pub direction: Direction,

    /// Currency code, used only to select a working-day calendar
    pub currency: String,

    /// Agreed FX rate converting the local amount to USD
    pub fx_rate: Decimal,

    /// Number of units traded
    pub units: Decimal,

    /// Price of a single unit in local currency
    pub price_per_unit: Decimal,

    /// Date the instruction was issued
    pub instruction_date: NaiveDate,

    /// Settlement date requested by the client
    pub settlement_date: NaiveDate,
}

/// Finalised instruction
///
/// Built only by the finaliser: the settlement date has been rolled forward
/// to a working day for the instruction's currency and the USD amount has
/// been computed at full precision. Fields are read-only after that.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    entity: String,
    direction: Direction,
    currency: String,
    fx_rate: Decimal,
    units: Decimal,
    price_per_unit: Decimal,
    instruction_date: NaiveDate,
    requested_settlement_date: NaiveDate,
    settlement_date: NaiveDate,
    usd_amount: Decimal,
}

impl Instruction {
    pub(crate) fn from_record(
        record: InstructionRecord,
        settlement_date: NaiveDate,
        usd_amount: Decimal,
    ) -> Self {
        Instruction {
            entity: record.entity,
            direction: record.direction,
            currency: record.currency,
            fx_rate: record.fx_rate,
            units: record.units,
            price_per_unit: record.price_per_unit,
            instruction_date: record.instruction_date,
            requested_settlement_date: record.settlement_date,
            settlement_date,
            usd_amount,
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn fx_rate(&self) -> Decimal {
        self.fx_rate
    }

    pub fn units(&self) -> Decimal {
        self.units
    }

    pub fn price_per_unit(&self) -> Decimal {
        self.price_per_unit
    }

    pub fn instruction_date(&self) -> NaiveDate {
        self.instruction_date
    }

    /// Settlement date as originally requested, before any correction
    pub fn requested_settlement_date(&self) -> NaiveDate {
        self.requested_settlement_date
    }

    /// Settlement date after rolling forward to a working day
    pub fn settlement_date(&self) -> NaiveDate {
        self.settlement_date
    }

    /// Settled amount in USD at full precision
    pub fn usd_amount(&self) -> Decimal {
        self.usd_amount
    }

    /// Whether finalisation moved the settlement date
    pub fn was_adjusted(&self) -> bool {
        self.settlement_date != self.requested_settlement_date
    }
}
