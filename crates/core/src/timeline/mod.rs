//! Driver timeline loading, editing and saving

pub mod ports;
pub mod service;

pub use service::{LoadOutcome, TimelineService};
