//! # PACT_MODE Configuration
//!
//! Routes Key Vault calls to a Pact mock server.
//!
//! When `PACT_MODE` is set the identity provider hands out a fixed bearer token
//! and the Key Vault client talks to `AZURE_KEY_VAULT_ENDPOINT` instead of the
//! configured vault.

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::{env_var_non_empty, env_var_or_default_bool};

/// Environment variable holding the mock server endpoint
pub const AZURE_KEY_VAULT_ENDPOINT_ENV: &str = "AZURE_KEY_VAULT_ENDPOINT";

/// Pact mock server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PactModeConfig {
    /// Mock server base URL
    pub key_vault_endpoint: String,
}

impl PactModeConfig {
    /// Read PACT_MODE settings
    ///
    /// Returns `Ok(None)` when Pact mode is off.
    ///
    /// # Errors
    ///
    /// Fails when Pact mode is on but no endpoint is configured, or when the
    /// endpoint points at production Azure.
    pub fn from_env() -> Result<Option<Self>> {
        if !env_var_or_default_bool("PACT_MODE", false) {
            return Ok(None);
        }

        let endpoint = env_var_non_empty(AZURE_KEY_VAULT_ENDPOINT_ENV).context(
            "PACT_MODE enabled but Azure Key Vault endpoint not configured. \
             Set AZURE_KEY_VAULT_ENDPOINT environment variable.",
        )?;

        let config = Self::new(endpoint)?;
        info!(
            "PACT_MODE: routing Azure Key Vault requests to {}",
            config.key_vault_endpoint
        );
        Ok(Some(config))
    }

    /// Build and validate a Pact mode configuration
    ///
    /// # Errors
    ///
    /// Rejects endpoints under `vault.azure.net`.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        validate_endpoint(&endpoint)?;
        Ok(Self {
            key_vault_endpoint: endpoint,
        })
    }
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    if endpoint.contains("vault.azure.net") {
        return Err(anyhow::anyhow!(
            "PACT_MODE enabled but endpoint '{endpoint}' points to production Azure. \
            This is not allowed in Pact mode. Use a mock server endpoint instead."
        ));
    }

    let looks_like_mock = endpoint.starts_with("http://localhost")
        || endpoint.starts_with("http://127.0.0.1")
        || endpoint.starts_with("http://[::1]")
        || endpoint.contains("host.docker.internal")
        || endpoint.contains("pact")
        || endpoint.contains("mock");

    if !looks_like_mock {
        warn!(
            "PACT_MODE enabled but endpoint '{}' does not appear to be a mock server. \
            Verify this is correct and not pointing to production Azure.",
            endpoint
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_production_vault() {
        let err = PactModeConfig::new("https://kv-demo.vault.azure.net/").unwrap_err();
        assert!(err.to_string().contains("points to production Azure"));
    }

    #[test]
    fn test_accepts_local_mock_server() {
        let config = PactModeConfig::new("http://localhost:1234/").unwrap();
        assert_eq!(config.key_vault_endpoint, "http://localhost:1234/");
    }
}
