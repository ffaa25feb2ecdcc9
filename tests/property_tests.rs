//! Property-based tests for finalisation and aggregation

use chrono::{Datelike, Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use settlement_reports::core::{rank_entities, summarise_by_date, Finaliser};
use settlement_reports::{Direction, Instruction, InstructionRecord, WorkingDayCalendar};

const CURRENCIES: [&str; 5] = ["USD", "AED", "SAR", "GBP", "SGP"];
const ENTITIES: [&str; 4] = ["foo", "bar", "baz", "qux"];

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 1, 1).unwrap()
}

fn record_strategy() -> impl Strategy<Value = InstructionRecord> {
    (
        0usize..ENTITIES.len(),
        any::<bool>(),
        0usize..CURRENCIES.len(),
        1i64..500_000i64,
        0i64..10_000i64,
        0i64..1_000_000i64,
        0u64..730u64,
    )
        .prop_map(|(entity, buy, currency, fx, units, price, offset)| {
            let settlement_date = base_date() + Days::new(offset);
            InstructionRecord {
                entity: ENTITIES[entity].to_string(),
                direction: if buy {
                    Direction::Outgoing
                } else {
                    Direction::Incoming
                },
                currency: CURRENCIES[currency].to_string(),
                fx_rate: Decimal::new(fx, 4),
                units: Decimal::from(units),
                price_per_unit: Decimal::new(price, 2),
                instruction_date: base_date(),
                settlement_date,
            }
        })
}

fn finalise_all(records: Vec<InstructionRecord>) -> Vec<Instruction> {
    let finaliser = Finaliser::default();
    records
        .into_iter()
        .map(|record| finaliser.finalise(record).unwrap())
        .collect()
}

proptest! {
    /// Property: a finalised settlement date is a working day for its currency
    #[test]
    fn finalised_date_is_working_day(record in record_strategy()) {
        let calendar = WorkingDayCalendar::default();
        let currency = record.currency.clone();
        let instruction = Finaliser::default().finalise(record).unwrap();

        prop_assert!(!calendar
            .non_working_days(&currency)
            .contains(&instruction.settlement_date().weekday()));
        prop_assert!(instruction.settlement_date() >= instruction.requested_settlement_date());
        prop_assert!(
            instruction.settlement_date() - instruction.requested_settlement_date()
                <= chrono::Duration::days(2)
        );
    }

    /// Property: rolling an already-corrected date forward changes nothing
    #[test]
    fn roll_forward_is_idempotent(record in record_strategy()) {
        let calendar = WorkingDayCalendar::default();
        let once = calendar.roll_forward(&record.currency, record.settlement_date).unwrap();
        let twice = calendar.roll_forward(&record.currency, once).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Property: USD amount is exactly units × price × fx
    #[test]
    fn usd_amount_is_exact_product(record in record_strategy()) {
        let expected = record.units * record.price_per_unit * record.fx_rate;
        let instruction = Finaliser::default().finalise(record).unwrap();
        prop_assert_eq!(instruction.usd_amount(), expected);
    }

    /// Property: a USD amount is either the exact product or an error,
    /// never a rounded value
    #[test]
    fn usd_amount_is_never_rounded(
        (units, units_scale) in (1i64..1_000_000, 0u32..=28),
        (price, price_scale) in (1i64..1_000_000, 0u32..=28),
        (fx, fx_scale) in (1i64..1_000_000, 0u32..=28),
    ) {
        prop_assume!(units % 10 != 0 && price % 10 != 0 && fx % 10 != 0);

        let record = InstructionRecord {
            entity: "foo".to_string(),
            direction: Direction::Incoming,
            currency: "USD".to_string(),
            fx_rate: Decimal::new(fx, fx_scale),
            units: Decimal::new(units, units_scale),
            price_per_unit: Decimal::new(price, price_scale),
            instruction_date: base_date(),
            settlement_date: base_date(),
        };

        // Exact product, with trailing zeros stripped only where needed
        let mut mantissa = units as i128 * price as i128 * fx as i128;
        let mut scale = units_scale + price_scale + fx_scale;
        let fits = scale <= Decimal::MAX_SCALE;
        while scale > Decimal::MAX_SCALE && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }

        match Finaliser::default().finalise(record) {
            Ok(instruction) => {
                prop_assert!(scale <= Decimal::MAX_SCALE);
                prop_assert_eq!(
                    instruction.usd_amount(),
                    Decimal::from_i128_with_scale(mantissa, scale)
                );
            }
            Err(_) => prop_assert!(!fits),
        }
    }

    /// Property: every settlement date appears once, in ascending order
    #[test]
    fn daily_summary_is_date_complete(
        records in prop::collection::vec(record_strategy(), 0..40)
    ) {
        let instructions = finalise_all(records);
        let summary = summarise_by_date(&instructions).unwrap();

        for instruction in &instructions {
            prop_assert!(summary.contains_key(&instruction.settlement_date()));
        }
        let dates: Vec<_> = summary.keys().copied().collect();
        prop_assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
    }

    /// Property: daily totals and entity rankings agree per direction
    #[test]
    fn daily_and_ranking_totals_agree(
        records in prop::collection::vec(record_strategy(), 0..40)
    ) {
        let instructions = finalise_all(records);
        let summary = summarise_by_date(&instructions).unwrap();

        let daily_in: Decimal = summary.values().map(|t| t.incoming).sum();
        let daily_out: Decimal = summary.values().map(|t| t.outgoing).sum();
        let ranked_in: Decimal = rank_entities(&instructions, Direction::Incoming)
            .unwrap()
            .iter()
            .map(|entry| entry.total)
            .sum();
        let ranked_out: Decimal = rank_entities(&instructions, Direction::Outgoing)
            .unwrap()
            .iter()
            .map(|entry| entry.total)
            .sum();

        prop_assert_eq!(daily_in, ranked_in);
        prop_assert_eq!(daily_out, ranked_out);
    }

    /// Property: rankings are non-increasing and contain no zero totals
    #[test]
    fn ranking_is_sorted_without_zeros(
        records in prop::collection::vec(record_strategy(), 0..40),
        buy in any::<bool>(),
    ) {
        let direction = if buy { Direction::Outgoing } else { Direction::Incoming };
        let ranking = rank_entities(&finalise_all(records), direction).unwrap();

        prop_assert!(ranking.windows(2).all(|pair| pair[0].total >= pair[1].total));
        prop_assert!(ranking.iter().all(|entry| !entry.total.is_zero()));
        prop_assert!(ranking
            .iter()
            .enumerate()
            .all(|(index, entry)| entry.rank == index + 1));
    }
}
