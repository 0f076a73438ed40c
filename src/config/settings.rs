//! Configuration settings structures for the notification client
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables, or built directly in code.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

// ============================================================================
// Default value functions
// ============================================================================

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

// ============================================================================
// Service Configuration
// ============================================================================

/// Notification microservice connection configuration
///
/// Credentials are held in memory only; nothing here is ever persisted by
/// the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    /// Base URL of the notification microservice, e.g. `http://localhost:8765`
    #[serde(default)]
    pub base_url: String,

    /// Superuser's username
    #[serde(default)]
    pub username: String,

    /// Superuser's password
    #[serde(default)]
    pub password: String,
}

impl ServiceConfig {
    /// Validates the service configuration
    ///
    /// The password is deliberately not checked: the service itself decides
    /// what it accepts, and an empty password merely yields a rejected login.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|_| ConfigError::ValidationError {
            field: "service.base_url".to_string(),
            message: format!("Invalid URL: '{}'", self.base_url),
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::ValidationError {
                field: "service.base_url".to_string(),
                message: "URL must use http or https protocol".to_string(),
            });
        }

        if self.username.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "service.username".to_string(),
                message: "Username cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

// ============================================================================
// HTTP Transport Configuration
// ============================================================================

/// HTTP transport configuration for the underlying reqwest client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl HttpConfig {
    /// Validates the HTTP transport configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout == 0 {
            return Err(ConfigError::ValidationError {
                field: "http.request_timeout".to_string(),
                message: "Request timeout must be positive".to_string(),
            });
        }

        if self.connect_timeout == 0 {
            return Err(ConfigError::ValidationError {
                field: "http.connect_timeout".to_string(),
                message: "Connect timeout must be positive".to_string(),
            });
        }

        Ok(())
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete client settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClientSettings {
    /// Notification microservice connection settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logger settings
    #[serde(default)]
    pub logger: LoggerSettings,
}

impl ClientSettings {
    /// Builds settings for the common direct-construction path.
    ///
    /// Transport and logger settings take their defaults; override the
    /// fields afterwards if needed.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            service: ServiceConfig {
                base_url: base_url.into(),
                username: username.into(),
                password: password.into(),
            },
            http: HttpConfig::default(),
            logger: LoggerSettings::default(),
        }
    }

    /// Validates the loaded settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.service.validate()?;
        self.http.validate()?;
        Ok(())
    }
}
