//! Aggregation of finalised instructions into report datasets
//!
//! Both functions are pure: they read the instruction slice, never mutate
//! it, and can be called any number of times in any order.

use crate::types::{DailySummary, Direction, Instruction, RankingEntry, SettlementError};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Group instructions by settlement date and sum incoming/outgoing USD
///
/// Every date that appears in at least one instruction gets exactly one
/// entry; a direction with no activity on that date totals zero. Iteration
/// order of the result is ascending by date.
///
/// # Errors
///
/// `ArithmeticOverflow` naming the entity whose amount could not be added
/// to its day's total without overflow or loss of precision.
pub fn summarise_by_date(instructions: &[Instruction]) -> Result<DailySummary, SettlementError> {
    let mut summary = DailySummary::new();

    for instruction in instructions {
        let totals = summary.entry(instruction.settlement_date()).or_default();
        let total = match instruction.direction() {
            Direction::Incoming => &mut totals.incoming,
            Direction::Outgoing => &mut totals.outgoing,
        };
        *total = add_exact(*total, instruction.usd_amount())
            .ok_or_else(|| SettlementError::arithmetic_overflow(instruction.entity()))?;
    }

    Ok(summary)
}

/// Rank entities by total USD amount for one direction
///
/// Only instructions matching `direction` are considered. Entities whose
/// total is zero are left out. Sorted by total descending, ties broken by
/// entity name ascending so the order is deterministic; ranks start at 1.
///
/// # Errors
///
/// `ArithmeticOverflow` if an entity's total cannot be represented exactly.
pub fn rank_entities(
    instructions: &[Instruction],
    direction: Direction,
) -> Result<Vec<RankingEntry>, SettlementError> {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();

    for instruction in instructions
        .iter()
        .filter(|instruction| instruction.direction() == direction)
    {
        let total = totals.entry(instruction.entity()).or_default();
        *total = add_exact(*total, instruction.usd_amount())
            .ok_or_else(|| SettlementError::arithmetic_overflow(instruction.entity()))?;
    }

    let mut ranked: Vec<(&str, Decimal)> = totals
        .into_iter()
        .filter(|(_, total)| !total.is_zero())
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    Ok(ranked
        .into_iter()
        .enumerate()
        .map(|(index, (entity, total))| RankingEntry {
            rank: index + 1,
            entity: entity.to_string(),
            total,
        })
        .collect())
}

/// Sum two amounts, or `None` on overflow or when digits had to be rounded
///
/// A non-zero sum that keeps the larger operand scale is exact; rust_decimal
/// only lowers the scale when it has to round to fit 96 bits.
fn add_exact(total: Decimal, amount: Decimal) -> Option<Decimal> {
    let sum = total.checked_add(amount)?;
    if total.is_zero() || amount.is_zero() || sum.scale() == total.scale().max(amount.scale()) {
        Some(sum)
    } else {
        None
    }
}
