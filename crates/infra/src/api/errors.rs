//! API-specific error types
//!
//! Classifies failures of the duty-log REST API before they are folded into
//! [`LogCheckerError`] at the port boundary.

use std::time::Duration;

use logchecker_domain::LogCheckerError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// 404 - unknown driver or route
    NotFound,
    /// Client errors (4xx other than 404/429)
    Client,
    /// Connection failures, timeouts and unreadable payloads
    Network,
    /// Configuration errors
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl ApiError {
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::NotFound(_) => ApiErrorCategory::NotFound,
            Self::Client(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Decode(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Whether re-issuing the same request could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.category(),
            ApiErrorCategory::RateLimit | ApiErrorCategory::Server | ApiErrorCategory::Network
        ) && !matches!(self, Self::Decode(_))
    }
}

impl From<ApiError> for LogCheckerError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        match err.category() {
            ApiErrorCategory::NotFound => LogCheckerError::NotFound(message),
            ApiErrorCategory::Client => LogCheckerError::InvalidInput(message),
            ApiErrorCategory::Config => LogCheckerError::Config(message),
            ApiErrorCategory::RateLimit | ApiErrorCategory::Server | ApiErrorCategory::Network => {
                LogCheckerError::Network(message)
            }
        }
    }
}

impl From<LogCheckerError> for ApiError {
    fn from(err: LogCheckerError) -> Self {
        match err {
            LogCheckerError::Network(message) => Self::Network(message),
            LogCheckerError::Config(message) => Self::Config(message),
            LogCheckerError::NotFound(message) => Self::NotFound(message),
            LogCheckerError::InvalidInput(message) => Self::Client(message),
            LogCheckerError::InvalidState(message) | LogCheckerError::Internal(message) => {
                Self::Server(message)
            }
        }
    }
}
