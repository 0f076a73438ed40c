use thiserror::Error;

use crate::config::ConfigError;

/// Crate-wide error type covering every failure the notification client can
/// report through its typed surface.
///
/// The sentinel-compatible methods never return these; they translate them
/// into in-band fallback values instead.
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Configuration loading or validation error
    #[error("Configuration error")]
    Configuration {
        #[from]
        source: ConfigError,
    },

    /// The service answered an authorized call with a non-200 status
    #[error("Notification service rejected {endpoint} with status {status}")]
    ServiceRejected { endpoint: String, status: u16 },

    /// Transport-level failure (connection refused, timeout, unreadable
    /// body) while talking to the notification service
    #[error("Request to {endpoint} failed: {message}")]
    ExternalApi {
        endpoint: String,
        message: String,
        source: Option<anyhow::Error>,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
