//! Core business logic module
//!
//! This module contains the settlement processing components:
//! - `calendar` - Per-currency working-day calendars
//! - `finaliser` - Settlement-date correction and USD amount computation
//! - `aggregator` - Daily summaries and entity rankings
//! - `engine` - Two-phase ingest-then-analyse orchestration

pub mod aggregator;
pub mod calendar;
pub mod engine;
pub mod finaliser;

pub use aggregator::{rank_entities, summarise_by_date};
pub use calendar::{ClosedDays, WorkingDayCalendar};
pub use engine::SettlementEngine;
pub use finaliser::Finaliser;
