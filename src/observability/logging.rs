//! # Logging
//!
//! `tracing-subscriber` setup. `RUST_LOG` overrides the default filter.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

const DEFAULT_LOG_FILTER: &str = "keyvault_secret_function=info,tower_http=info";

/// Install the global subscriber
///
/// # Errors
///
/// Fails if a global subscriber is already installed (Datadog export installs
/// its own; callers treat that case as non-fatal).
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))
}
