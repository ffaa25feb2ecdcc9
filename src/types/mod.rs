//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `instruction`: Instruction records, finalised instructions and directions
//! - `summary`: Aggregated report datasets
//! - `error`: Error types for the settlement engine

pub mod error;
pub mod instruction;
pub mod summary;

pub use error::SettlementError;
pub use instruction::{Direction, Instruction, InstructionRecord};
pub use summary::{DailySummary, DailyTotals, RankingEntry};
