//! Instruction finalisation
//!
//! Turns a decoded [`InstructionRecord`] into a read-only [`Instruction`]:
//! the settlement date is rolled forward to the next working day for the
//! instruction's currency and the USD amount is computed with decimal
//! arithmetic.
//!
//! Finalisation always starts from the requested settlement date, so the
//! same record finalised twice yields the same instruction, and a record
//! whose requested date is already a working day keeps it.

use crate::core::calendar::WorkingDayCalendar;
use crate::types::{Instruction, InstructionRecord, SettlementError};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Finalises instruction records against a working-day calendar
#[derive(Debug, Clone, Default)]
pub struct Finaliser {
    calendar: WorkingDayCalendar,
}

impl Finaliser {
    pub fn new(calendar: WorkingDayCalendar) -> Self {
        Finaliser { calendar }
    }

    pub fn calendar(&self) -> &WorkingDayCalendar {
        &self.calendar
    }

    /// Finalise a single instruction record
    ///
    /// # Errors
    ///
    /// - `InvalidValue` if the entity or currency is blank, the FX rate is
    ///   not positive, units or price are negative, or the settlement date
    ///   cannot be rolled forward
    /// - `ArithmeticOverflow` if the USD amount does not fit into a decimal
    ///   exactly
    pub fn finalise(&self, record: InstructionRecord) -> Result<Instruction, SettlementError> {
        validate(&record)?;

        let settlement_date = self
            .calendar
            .roll_forward(&record.currency, record.settlement_date)
            .ok_or_else(|| {
                SettlementError::invalid_value(
                    &record.entity,
                    "SettlementDate",
                    record.settlement_date,
                )
            })?;

        if settlement_date != record.settlement_date {
            debug!(
                entity = %record.entity,
                currency = %record.currency,
                requested = %record.settlement_date,
                adjusted = %settlement_date,
                "settlement date moved to next working day"
            );
        }

        if settlement_date < record.instruction_date {
            warn!(
                entity = %record.entity,
                instruction_date = %record.instruction_date,
                settlement_date = %settlement_date,
                "settlement date precedes instruction date"
            );
        }

        let usd_amount = usd_amount(&record)?;

        Ok(Instruction::from_record(record, settlement_date, usd_amount))
    }
}

/// `price_per_unit × units × fx_rate` at full precision
///
/// Fails when the product overflows or would have to be rounded to fit a
/// `Decimal`, so the amount is always the exact product.
fn usd_amount(record: &InstructionRecord) -> Result<Decimal, SettlementError> {
    mul_exact(record.price_per_unit, record.units)
        .and_then(|local| mul_exact(local, record.fx_rate))
        .ok_or_else(|| SettlementError::arithmetic_overflow(&record.entity))
}

/// Multiply, or `None` on overflow or when digits had to be rounded
///
/// Operands are normalised first so trailing zeros do not use up scale. A
/// non-zero product is exact only if it keeps the summed operand scale.
fn mul_exact(lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
    let (lhs, rhs) = (lhs.normalize(), rhs.normalize());
    if lhs.is_zero() || rhs.is_zero() {
        return Some(Decimal::ZERO);
    }

    let product = lhs.checked_mul(rhs)?;
    (product.scale() == lhs.scale() + rhs.scale()).then_some(product)
}

fn validate(record: &InstructionRecord) -> Result<(), SettlementError> {
    if record.entity.trim().is_empty() {
        return Err(SettlementError::invalid_value(
            &record.entity,
            "Entity",
            &record.entity,
        ));
    }
    if record.currency.trim().is_empty() {
        return Err(SettlementError::invalid_value(
            &record.entity,
            "Currency",
            &record.currency,
        ));
    }
    if record.fx_rate <= Decimal::ZERO {
        return Err(SettlementError::invalid_value(
            &record.entity,
            "AgreedFx",
            record.fx_rate,
        ));
    }
    if record.units < Decimal::ZERO {
        return Err(SettlementError::invalid_value(
            &record.entity,
            "Units",
            record.units,
        ));
    }
    if record.price_per_unit < Decimal::ZERO {
        return Err(SettlementError::invalid_value(
            &record.entity,
            "Price per unit",
            record.price_per_unit,
        ));
    }
    Ok(())
}
