//! # LogChecker Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The retrying HTTP client
//! - The duty-log REST API client and its port adapters
//! - The TTL-cached driver directory
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements traits defined in `logchecker-core`
//! - Depends on `logchecker-domain` and `logchecker-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientConfig, ApiError, ApiErrorCategory, CachedDriverDirectory, TimelineApi};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, RetryPolicy};
