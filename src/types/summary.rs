//! Aggregated report datasets
//!
//! Both structures are derived from the current instruction list on demand
//! and carry amounts at full precision; rounding happens in the formatters.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Incoming and outgoing USD totals for a single settlement date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyTotals {
    /// Sum of USD amounts of incoming instructions settling that day
    pub incoming: Decimal,

    /// Sum of USD amounts of outgoing instructions settling that day
    pub outgoing: Decimal,
}

/// Settlement date → totals, iterated in ascending date order
pub type DailySummary = BTreeMap<NaiveDate, DailyTotals>;

/// One row of an entity ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    /// 1-based position in the ranking
    pub rank: usize,

    /// Counterparty identifier
    pub entity: String,

    /// Total USD amount for the ranked direction
    pub total: Decimal,
}
