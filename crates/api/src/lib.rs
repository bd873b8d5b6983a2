//! # LogChecker App
//!
//! Command-line application layer - commands and main entry point.
//!
//! This crate contains:
//! - Commands (driver listing, timeline display, timeline editing)
//! - Application context (dependency injection)
//! - Report rendering and logging helpers
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Provides the `logchecker` binary

pub mod commands;
pub mod context;
pub mod report;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
