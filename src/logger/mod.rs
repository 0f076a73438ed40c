//! Logger initialization
//!
//! Console logging based on `tracing-subscriber`. Initialization is opt-in:
//! applications embedding this crate call [`init`] once if they want the
//! client's log output; libraries composing their own subscriber simply
//! skip it.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console logging at the given level
///
/// Invalid level strings fall back to `info`. Returns an error if a global
/// subscriber is already set.
pub fn init(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let is_tty = std::io::stdout().is_terminal();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(is_tty)
                .with_target(true)
                .with_level(true),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global logger: {}", e))
}
