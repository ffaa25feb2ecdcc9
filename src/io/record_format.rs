//! Input record format handling
//!
//! This module centralizes the input layout concerns, providing:
//! - the ordered field names of an instruction row
//! - RawRecord structure for positional deserialization
//! - Conversion from raw text fields to typed instruction records
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Direction, InstructionRecord, SettlementError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Date layout of input fields and report rows, e.g. `01 Jan 2016`
pub const DATE_FORMAT: &str = "%d %b %Y";

/// Field names of an instruction row, in column order
pub const FIELD_NAMES: [&str; 8] = [
    "Entity",
    "Buy/Sell",
    "AgreedFx",
    "Currency",
    "InstructionDate",
    "SettlementDate",
    "Units",
    "Price per unit",
];

/// One instruction row as text, in column order
///
/// Values are kept as strings so that a bad value can be reported with
/// the name of its field.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RawRecord {
    #[serde(rename = "Entity")]
    pub entity: String,
    #[serde(rename = "Buy/Sell")]
    pub buy_sell: String,
    #[serde(rename = "AgreedFx")]
    pub agreed_fx: String,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "InstructionDate")]
    pub instruction_date: String,
    #[serde(rename = "SettlementDate")]
    pub settlement_date: String,
    #[serde(rename = "Units")]
    pub units: String,
    #[serde(rename = "Price per unit")]
    pub price_per_unit: String,
}

/// Whether a row is a header line
///
/// A row is a header when its first two fields are the first two field
/// names, so repeated headers inside concatenated inputs are recognised.
pub fn is_header(fields: &csv::StringRecord) -> bool {
    fields.get(0) == Some(FIELD_NAMES[0]) && fields.get(1) == Some(FIELD_NAMES[1])
}

/// Convert a RawRecord to an InstructionRecord
///
/// This function:
/// - Parses the buy/sell flag into a Direction
/// - Parses the FX rate, units and price into Decimals
/// - Parses both dates using [`DATE_FORMAT`]
/// - Rejects blank entity and currency fields
///
/// Nothing is ever defaulted: a missing or unparseable value is an error.
///
/// # Arguments
///
/// * `raw` - The deserialized row
/// * `line` - Line number for error messages, if known
pub fn convert_raw_record(
    raw: RawRecord,
    line: Option<u64>,
) -> Result<InstructionRecord, SettlementError> {
    let entity = required(line, "Entity", &raw.entity)?.to_string();
    let direction = Direction::from_str(required(line, "Buy/Sell", &raw.buy_sell)?)
        .map_err(|e| SettlementError::parse_field(line, "Buy/Sell", e))?;
    let fx_rate = parse_decimal(line, "AgreedFx", &raw.agreed_fx)?;
    let currency = required(line, "Currency", &raw.currency)?.to_ascii_uppercase();
    let instruction_date = parse_date(line, "InstructionDate", &raw.instruction_date)?;
    let settlement_date = parse_date(line, "SettlementDate", &raw.settlement_date)?;
    let units = parse_decimal(line, "Units", &raw.units)?;
    let price_per_unit = parse_decimal(line, "Price per unit", &raw.price_per_unit)?;

    Ok(InstructionRecord {
        entity,
        direction,
        currency,
        fx_rate,
        units,
        price_per_unit,
        instruction_date,
        settlement_date,
    })
}

fn required<'a>(
    line: Option<u64>,
    field: &str,
    value: &'a str,
) -> Result<&'a str, SettlementError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SettlementError::parse_field(line, field, "missing value"));
    }
    Ok(value)
}

fn parse_decimal(line: Option<u64>, field: &str, value: &str) -> Result<Decimal, SettlementError> {
    let value = required(line, field, value)?;
    if !is_plain_decimal(value) {
        return Err(SettlementError::parse_field(
            line,
            field,
            format!(
                "invalid number '{}': expected digits with an optional sign and decimal point",
                value
            ),
        ));
    }
    Decimal::from_str(value).map_err(|e| {
        SettlementError::parse_field(line, field, format!("invalid number '{}': {}", value, e))
    })
}

/// `[+-]digits[.digits]`; `Decimal::from_str` alone also accepts `_`
fn is_plain_decimal(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

fn parse_date(line: Option<u64>, field: &str, value: &str) -> Result<NaiveDate, SettlementError> {
    let value = required(line, field, value)?;
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        SettlementError::parse_field(line, field, format!("invalid date '{}': {}", value, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn raw() -> RawRecord {
        RawRecord {
            entity: "foo".to_string(),
            buy_sell: "B".to_string(),
            agreed_fx: "0.50".to_string(),
            currency: "sgp".to_string(),
            instruction_date: "01 Jan 2016".to_string(),
            settlement_date: "02 Jan 2016".to_string(),
            units: "200".to_string(),
            price_per_unit: "100.25".to_string(),
        }
    }

    #[test]
    fn test_convert_valid_record() {
        let record = convert_raw_record(raw(), Some(2)).unwrap();

        assert_eq!(record.entity, "foo");
        assert_eq!(record.direction, Direction::Outgoing);
        assert_eq!(record.currency, "SGP");
        assert_eq!(record.fx_rate, Decimal::new(50, 2));
        assert_eq!(record.units, Decimal::new(200, 0));
        assert_eq!(record.price_per_unit, Decimal::new(10025, 2));
        assert_eq!(
            record.instruction_date,
            NaiveDate::from_ymd_opt(2016, 1, 1).unwrap()
        );
        assert_eq!(
            record.settlement_date,
            NaiveDate::from_ymd_opt(2016, 1, 2).unwrap()
        );
    }

    #[rstest]
    #[case::bad_direction("Buy/Sell", |r: &mut RawRecord| r.buy_sell = "X".to_string())]
    #[case::missing_direction("Buy/Sell", |r: &mut RawRecord| r.buy_sell = String::new())]
    #[case::bad_fx("AgreedFx", |r: &mut RawRecord| r.agreed_fx = "half".to_string())]
    #[case::missing_entity("Entity", |r: &mut RawRecord| r.entity = " ".to_string())]
    #[case::missing_currency("Currency", |r: &mut RawRecord| r.currency = String::new())]
    #[case::bad_instruction_date("InstructionDate", |r: &mut RawRecord| r.instruction_date = "2016-01-01".to_string())]
    #[case::impossible_date("SettlementDate", |r: &mut RawRecord| r.settlement_date = "31 Feb 2016".to_string())]
    #[case::missing_units("Units", |r: &mut RawRecord| r.units = String::new())]
    #[case::bad_price("Price per unit", |r: &mut RawRecord| r.price_per_unit = "1,000".to_string())]
    #[case::underscore("Units", |r: &mut RawRecord| r.units = "1_0_0".to_string())]
    #[case::two_points("AgreedFx", |r: &mut RawRecord| r.agreed_fx = "0.5.1".to_string())]
    #[case::lone_point("Price per unit", |r: &mut RawRecord| r.price_per_unit = ".".to_string())]
    #[case::exponent("Units", |r: &mut RawRecord| r.units = "1e3".to_string())]
    #[case::double_sign("Units", |r: &mut RawRecord| r.units = "--1".to_string())]
    fn test_convert_errors(#[case] field: &str, #[case] mutate: fn(&mut RawRecord)) {
        let mut record = raw();
        mutate(&mut record);

        match convert_raw_record(record, Some(5)) {
            Err(SettlementError::ParseError {
                line,
                field: Some(f),
                ..
            }) => {
                assert_eq!(line, Some(5));
                assert_eq!(f, field);
            }
            other => panic!("expected ParseError for {}, got {:?}", field, other),
        }
    }

    #[rstest]
    #[case::header(&["Entity", "Buy/Sell", "AgreedFx"], true)]
    #[case::data(&["foo", "B", "0.50"], false)]
    #[case::partial(&["Entity", "B"], false)]
    #[case::empty(&[], false)]
    fn test_is_header(#[case] fields: &[&str], #[case] expected: bool) {
        let record = csv::StringRecord::from(fields.to_vec());
        assert_eq!(is_header(&record), expected);
    }

    #[rstest]
    #[case::integer("100", true)]
    #[case::fraction("100.25", true)]
    #[case::leading_point(".5", true)]
    #[case::trailing_point("5.", true)]
    #[case::signed("-0.5", true)]
    #[case::plus("+7", true)]
    #[case::underscore("1_000", false)]
    #[case::sign_only("-", false)]
    #[case::space("1 000", false)]
    fn test_is_plain_decimal(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_plain_decimal(value), expected);
    }
}
