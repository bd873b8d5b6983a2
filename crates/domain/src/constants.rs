//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Grid geometry
pub const SLOT_MINUTES: u32 = 15;
pub const SLOTS_PER_HOUR: usize = 4;
pub const SLOTS_PER_DAY: usize = 24 * SLOTS_PER_HOUR;
pub const MINUTES_PER_DAY: u32 = 24 * 60;

// Date handling
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_RANGE_DAYS: u32 = 7;

// REST endpoints
pub const DRIVERS_PATH: &str = "/api/drivers";
pub const TIMELINE_PATH: &str = "/api/timeline";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";

// User-facing outcome messages
pub const MSG_NO_CHANGES: &str = "No changes to save";
pub const MSG_SAVED: &str = "Timeline saved successfully!";
pub const MSG_SAVE_FAILED: &str = "Error saving timeline";
pub const MSG_RESET: &str = "Timeline reset to original state";
pub const MSG_LOAD_FAILED: &str = "Failed to load timeline data";
pub const MSG_DRIVER_NOT_FOUND: &str = "Error: Driver not found";
pub const MSG_SAVE_STALE: &str = "Save finished after the selection changed";
