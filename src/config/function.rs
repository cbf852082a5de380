//! # Function Configuration
//!
//! Per-request settings for the secret retrieval handler.

use crate::constants::{DEMO_SECRET_NAME, KEY_VAULT_URL_ENV};

use super::env_var_non_empty;

/// Handler configuration
///
/// Built once at startup and handed to the handler, so tests can construct it
/// directly instead of mutating the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionConfig {
    /// Key Vault endpoint, e.g. `https://kv-demo.vault.azure.net/`.
    /// `None` when the variable is unset or blank.
    pub key_vault_url: Option<String>,
    /// Name of the secret to read
    pub secret_name: String,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            key_vault_url: None,
            secret_name: DEMO_SECRET_NAME.to_string(),
        }
    }
}

impl FunctionConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            key_vault_url: env_var_non_empty(KEY_VAULT_URL_ENV),
            ..Self::default()
        }
    }

    /// Configuration pointing at the given vault
    pub fn with_key_vault_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            key_vault_url: (!url.trim().is_empty()).then(|| url.trim().to_string()),
            ..Self::default()
        }
    }

    /// Endpoint URL, if one is configured
    pub fn key_vault_url(&self) -> Option<&str> {
        self.key_vault_url.as_deref().filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reads_demo_secret_without_url() {
        let config = FunctionConfig::default();
        assert_eq!(config.secret_name, "demo-secret");
        assert!(config.key_vault_url().is_none());
    }

    #[test]
    fn test_blank_url_is_treated_as_missing() {
        assert!(FunctionConfig::with_key_vault_url("   ").key_vault_url().is_none());
        assert!(FunctionConfig::with_key_vault_url("").key_vault_url().is_none());
    }

    #[test]
    fn test_url_is_trimmed() {
        let config = FunctionConfig::with_key_vault_url(" https://kv-demo.vault.azure.net/ \n");
        assert_eq!(
            config.key_vault_url(),
            Some("https://kv-demo.vault.azure.net/")
        );
    }

    #[test]
    fn test_empty_string_field_is_not_exposed() {
        let config = FunctionConfig {
            key_vault_url: Some(String::new()),
            ..FunctionConfig::default()
        };
        assert!(config.key_vault_url().is_none());
    }
}
