//! # Configuration
//!
//! Function settings loaded from environment variables.
//!
//! - `function`: what the handler needs per request (Key Vault URL, secret name)
//! - `server`: HTTP listener settings for the custom handler
//! - `pact_mode`: routes Key Vault calls to a Pact mock server during contract tests

pub mod function;
pub mod pact_mode;
pub mod server;

pub use function::FunctionConfig;
pub use pact_mode::PactModeConfig;
pub use server::{LogFormat, ServerConfig};

/// Read environment variable or return default value
pub(crate) fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read environment variable as boolean or return default
pub(crate) fn env_var_or_default_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| {
            let v_lower = v.to_lowercase();
            v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
        })
        .unwrap_or(default)
}

/// Read environment variable, treating blank values as absent
pub(crate) fn env_var_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
