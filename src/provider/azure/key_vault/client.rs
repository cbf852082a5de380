//! # Azure Key Vault Client
//!
//! Wraps `SecretClient` behind `SecretStoreClient`.

use crate::config::PactModeConfig;
use crate::provider::{SecretStoreClient, SecretStoreConnector, SecretStoreError};
use async_trait::async_trait;
use azure_core::credentials::TokenCredential;
use azure_security_keyvault_secrets::{models::Secret, SecretClient};
use std::sync::Arc;
use tracing::{debug, debug_span, Instrument};

/// Azure Key Vault secrets client bound to one vault
pub struct AzureKeyVault {
    client: SecretClient,
    vault_url: String,
}

impl std::fmt::Debug for AzureKeyVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureKeyVault")
            .field("vault_url", &self.vault_url)
            .finish_non_exhaustive()
    }
}

impl AzureKeyVault {
    /// Create a client for `vault_url`
    ///
    /// # Errors
    ///
    /// Returns `SecretStoreError::Configuration` when the SDK rejects the endpoint.
    pub fn new(
        vault_url: &str,
        credential: Arc<dyn TokenCredential>,
    ) -> Result<Self, SecretStoreError> {
        let client = SecretClient::new(vault_url, credential, None).map_err(|e| {
            SecretStoreError::Configuration(format!(
                "Failed to create Azure Key Vault SecretClient: {e}"
            ))
        })?;

        Ok(Self {
            client,
            vault_url: vault_url.to_string(),
        })
    }

    pub fn vault_url(&self) -> &str {
        &self.vault_url
    }
}

#[async_trait]
impl SecretStoreClient for AzureKeyVault {
    async fn fetch(&self, secret_name: &str) -> Result<Option<String>, SecretStoreError> {
        let span = debug_span!(
            "azure.keyvault.secret.get",
            secret.name = secret_name,
            vault.url = %self.vault_url
        );

        async move {
            // No version parameter: Key Vault returns the latest version
            let response = self.client.get_secret(secret_name, None).await?;
            let secret = serde_json::from_slice::<Secret>(&response.into_body())?;
            debug!(found = secret.value.is_some(), "Key Vault returned secret bundle");
            Ok(secret.value)
        }
        .instrument(span)
        .await
    }
}

/// Builds a fresh `AzureKeyVault` for every request
#[derive(Debug, Clone, Default)]
pub struct AzureKeyVaultConnector {
    pact_mode: Option<PactModeConfig>,
}

impl AzureKeyVaultConnector {
    pub fn new(pact_mode: Option<PactModeConfig>) -> Self {
        Self { pact_mode }
    }

    /// Endpoint the client will actually call
    /// In Pact mode the mock server replaces the configured vault
    pub fn effective_endpoint<'a>(&'a self, configured: &'a str) -> &'a str {
        self.pact_mode
            .as_ref()
            .map_or(configured, |pact| pact.key_vault_endpoint.as_str())
    }
}

impl SecretStoreConnector for AzureKeyVaultConnector {
    fn connect(
        &self,
        endpoint_url: &str,
        credential: Arc<dyn TokenCredential>,
    ) -> Result<Box<dyn SecretStoreClient>, SecretStoreError> {
        let client = AzureKeyVault::new(self.effective_endpoint(endpoint_url), credential)?;
        Ok(Box::new(client))
    }
}
