//! Configuration management for the notification client
//!
//! Settings can be built directly in code (`ClientSettings::new`) or loaded
//! the layered way:
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local development overrides (not committed to version control)
//! 4. `NOTIFY_*` environment variables

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;

// Re-export public types
pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{ClientSettings, HttpConfig, LoggerSettings, ServiceConfig};
