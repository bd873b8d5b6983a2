//! Conversions from external infrastructure errors into domain errors.

use logchecker_domain::LogCheckerError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub LogCheckerError);

impl From<InfraError> for LogCheckerError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<LogCheckerError> for InfraError {
    fn from(value: LogCheckerError) -> Self {
        InfraError(value)
    }
}

trait IntoLogCheckerError {
    fn into_domain(self) -> LogCheckerError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → LogCheckerError */
/* -------------------------------------------------------------------------- */

impl IntoLogCheckerError for HttpError {
    fn into_domain(self) -> LogCheckerError {
        if self.is_timeout() {
            return LogCheckerError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return LogCheckerError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return LogCheckerError::Config(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return LogCheckerError::Network(format!("malformed HTTP response body: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                404 => LogCheckerError::NotFound(message),
                429 => LogCheckerError::Network(message),
                400..=499 => LogCheckerError::InvalidInput(message),
                _ => LogCheckerError::Network(message),
            };
        }

        LogCheckerError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → LogCheckerError */
/* -------------------------------------------------------------------------- */

impl IntoLogCheckerError for JsonError {
    fn into_domain(self) -> LogCheckerError {
        if self.is_io() {
            LogCheckerError::Network(format!("failed reading JSON payload: {self}"))
        } else {
            LogCheckerError::Network(format!(
                "malformed JSON payload at line {} column {}: {self}",
                self.line(),
                self.column()
            ))
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
