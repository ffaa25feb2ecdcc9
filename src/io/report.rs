//! Fixed-width text reports
//!
//! Renders the aggregator's datasets as plain-text tables. Columns are
//! padded to fixed widths and joined by tabs; monetary values are printed
//! with exactly two decimals, rounded half away from zero. Amounts are
//! rounded here and nowhere else.

use crate::io::record_format::DATE_FORMAT;
use crate::types::{DailySummary, Direction, RankingEntry};
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::Write;

/// Line printed before each report by the CLI
pub const REPORT_SEPARATOR: &str =
    "=========================================================";

const COLUMN_SEP: &str = "\t";

fn money(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn daily_row(date: &str, incoming: &str, outgoing: &str) -> String {
    [
        format!("{:<13}", date),
        format!("{:>17}", incoming),
        format!("{:>17}", outgoing),
    ]
    .join(COLUMN_SEP)
}

fn ranking_row(rank: &str, entity: &str, amount: &str) -> String {
    [
        format!("{:>10}", rank),
        format!("{:<16}", entity),
        format!("{:>16}", amount),
    ]
    .join(COLUMN_SEP)
}

/// Write the amounts-settled-every-day report
///
/// One row per settlement date, ascending, with incoming and outgoing USD.
pub fn write_daily_report(summary: &DailySummary, output: &mut dyn Write) -> std::io::Result<()> {
    writeln!(output, "AMOUNTS SETTLED EVERY DAY")?;
    writeln!(output)?;
    writeln!(
        output,
        "{}",
        daily_row("DATE", "INCOMING (USD)", "OUTGOING (USD)")
    )?;

    for (date, totals) in summary {
        writeln!(
            output,
            "{}",
            daily_row(
                &date.format(DATE_FORMAT).to_string(),
                &money(totals.incoming),
                &money(totals.outgoing),
            )
        )?;
    }

    Ok(())
}

/// Write the ranking of entities for one direction
pub fn write_ranking_report(
    direction: Direction,
    ranking: &[RankingEntry],
    output: &mut dyn Write,
) -> std::io::Result<()> {
    writeln!(
        output,
        "RANKING OF ENTITIES BASED ON {} AMOUNT",
        direction.as_str().to_uppercase()
    )?;
    writeln!(output)?;
    writeln!(output, "{}", ranking_row("Rank", "Entity", "USD"))?;

    for entry in ranking {
        writeln!(
            output,
            "{}",
            ranking_row(&entry.rank.to_string(), &entry.entity, &money(entry.total))
        )?;
    }

    Ok(())
}
