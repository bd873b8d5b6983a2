//! Configuration management

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_RANGE_DAYS};
use crate::errors::{LogCheckerError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// REST API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_driver_cache_ttl_seconds")]
    pub driver_cache_ttl_seconds: u64,
}

/// Grid construction configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Fixed UTC offset such as `+05:45`. When absent the local offset is
    /// captured once at start-up.
    #[serde(default)]
    pub utc_offset: Option<String>,
    #[serde(default = "default_range_days")]
    pub default_range_days: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    3
}

fn default_driver_cache_ttl_seconds() -> u64 {
    600
}

fn default_range_days() -> u32 {
    DEFAULT_RANGE_DAYS
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: default_timeout_seconds(),
            max_attempts: default_max_attempts(),
            driver_cache_ttl_seconds: default_driver_cache_ttl_seconds(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { utc_offset: None, default_range_days: default_range_days() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}

impl GridConfig {
    /// The configured offset, or `fallback` when none is configured.
    ///
    /// # Errors
    /// Returns `LogCheckerError::Config` if the configured offset is not a
    /// valid `±HH:MM` string.
    pub fn resolve_offset(&self, fallback: FixedOffset) -> Result<FixedOffset> {
        match self.utc_offset.as_deref() {
            Some(raw) => parse_utc_offset(raw)
                .map_err(|e| LogCheckerError::Config(format!("Invalid grid.utc_offset: {e}"))),
            None => Ok(fallback),
        }
    }
}

/// Parse `Z`, `±HH:MM`, `±HHMM` or `±HH` into a fixed offset.
///
/// # Errors
/// Returns `InvalidInput` for anything else, including offsets of 24 hours or
/// more.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    let invalid = || LogCheckerError::InvalidInput(format!("not a UTC offset: {raw}"));
    let trimmed = raw.trim();

    if trimmed.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, digits) = if let Some(rest) = trimmed.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = trimmed.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };

    let compact: String = digits.chars().filter(|c| *c != ':').collect();
    if !compact.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let (hours, minutes) = match compact.len() {
        2 => (compact.parse::<i32>().map_err(|_| invalid())?, 0),
        4 => (
            compact[..2].parse::<i32>().map_err(|_| invalid())?,
            compact[2..].parse::<i32>().map_err(|_| invalid())?,
        ),
        _ => return Err(invalid()),
    };
    if minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
