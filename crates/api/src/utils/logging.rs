use std::time::Duration;

use logchecker_domain::LogCheckerError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set. An unparsable directive
/// falls back to `info`. Calling this twice is harmless.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"timeline::edit"`).
/// * `elapsed` - Duration the command execution took.
/// * `outcome` - `None` on success, otherwise the error's label.
///
/// Callers must avoid forwarding driver names or other personal data in
/// `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, outcome: Option<&'static str>) {
    let duration_ms = elapsed.as_millis() as u64;

    match outcome {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(error_type) => warn!(command, duration_ms, error_type, "command_execution_failure"),
    }
}

/// Convert a `LogCheckerError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &LogCheckerError) -> &'static str {
    match error {
        LogCheckerError::Config(_) => "config",
        LogCheckerError::Network(_) => "network",
        LogCheckerError::NotFound(_) => "not_found",
        LogCheckerError::InvalidInput(_) => "invalid_input",
        LogCheckerError::InvalidState(_) => "invalid_state",
        LogCheckerError::Internal(_) => "internal",
    }
}
