//! Settlement Reports Library
//! # Overview
//!
//! This library turns a delimited stream of buy/sell settlement instructions
//! into daily USD settlement totals and entity rankings.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Instruction, Direction, summaries, errors)
//! - [`cli`] - CLI arguments parsing and logging setup
//! - [`core`] - Business logic components:
//!   - [`core::calendar`] - Per-currency working-day calendars
//!   - [`core::finaliser`] - Settlement-date correction and USD amounts
//!   - [`core::aggregator`] - Daily summaries and entity rankings
//!   - [`core::engine`] - Two-phase ingest-then-analyse orchestration
//! - [`io`] - Record decoding and fixed-width report output
//! - [`pipeline`] - End-to-end run with an error policy
//!
//! # Finalisation
//!
//! Every instruction is finalised exactly once on ingestion:
//!
//! - **Settlement date**: rolled forward one day at a time until it falls on
//!   a working day for the instruction's currency (Monday–Friday by default,
//!   Sunday–Thursday for AED and SAR)
//! - **USD amount**: `price per unit × units × agreed FX`, kept at full
//!   decimal precision and rounded to cents only when printed
//!
//! # Directions
//!
//! - **Outgoing**: buy instructions (`B`)
//! - **Incoming**: sell instructions (`S`)

pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use self::core::{Finaliser, SettlementEngine, WorkingDayCalendar};
pub use pipeline::{ErrorPolicy, Pipeline, RunStats};
pub use types::{
    DailySummary, DailyTotals, Direction, Instruction, InstructionRecord, RankingEntry,
    SettlementError,
};
