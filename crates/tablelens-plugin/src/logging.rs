//! Logging setup

use tablelens_core::PluginConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a stderr subscriber filtered by `RUST_LOG`, or the configured filter
///
/// Stdout usually belongs to the host protocol, so nothing is written there.
/// Does nothing if a global subscriber is already installed.
pub fn init_logging(config: &PluginConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if installed.is_ok() {
        tracing::debug!(filter = %config.log_filter, "logging initialized");
    }
}
