use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::{AppError, AppResult};

/// Builds the HTTP client used by one notification client instance
///
/// Each instance gets its own transport so the timeouts of its settings
/// apply and no state is shared across instances.
///
/// # Features
/// - **Connection pooling**: Reuses TCP connections across sequential calls
/// - **Timeouts**: request and connect timeouts from [`HttpConfig`]
/// - **Security**: Uses Rustls for TLS (no OpenSSL dependency)
pub fn build_http_client(config: &HttpConfig) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(config.request_timeout))
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        // Connection pooling
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        // Security
        .use_rustls_tls()
        .build()
        .map_err(|e| AppError::Internal { source: e.into() })
}
