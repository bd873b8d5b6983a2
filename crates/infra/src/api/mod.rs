//! Duty-log REST API
//!
//! HTTP client, error classification and the adapters that implement the
//! core timeline ports on top of it.
//!
//! # Endpoints
//!
//! - `GET /api/drivers` - driver directory
//! - `GET /api/timeline?driverId&startDate&endDate` - per-day intervals
//! - `POST /api/timeline` - change-event submission

pub mod client;
pub mod directory;
pub mod errors;
pub mod timeline;

pub use client::{ApiClient, ApiClientConfig};
pub use directory::{CachedDriverDirectory, DEFAULT_DIRECTORY_TTL};
pub use errors::{ApiError, ApiErrorCategory};
pub use timeline::TimelineApi;
