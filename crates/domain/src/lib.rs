//! # LogChecker Domain
//!
//! Business domain types and models for LogChecker.
//!
//! This crate contains:
//! - Duty-status grid types (Slot, DaySchedule, ChangeEvent)
//! - REST wire types (drivers, timeline responses, save requests)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and small pure helpers
//!
//! ## Architecture
//! - No dependencies on other LogChecker crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::duration::format_duration;
pub use utils::time_of_day::parse_time_of_day;
