//! # Server Configuration
//!
//! HTTP listener and logging settings for the custom handler process.

use crate::constants::{DEFAULT_HTTP_PORT, FUNCTIONS_CUSTOMHANDLER_PORT_ENV};

use super::env_var_or_default;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human readable lines (local development)
    #[default]
    Text,
    /// One JSON object per line (picked up by Application Insights)
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind on 0.0.0.0
    pub port: u16,
    /// Log format
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
            log_format: LogFormat::Text,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// The Functions host sets `FUNCTIONS_CUSTOMHANDLER_PORT`; `PORT` is honoured
    /// for running the binary in a plain container.
    pub fn from_env() -> Self {
        let fallback = env_var_or_default("PORT", DEFAULT_HTTP_PORT);
        Self {
            port: env_var_or_default(FUNCTIONS_CUSTOMHANDLER_PORT_ENV, fallback),
            log_format: env_var_or_default("LOG_FORMAT", LogFormat::Text),
        }
    }
}
