//! # Azure Key Vault Authentication
//!
//! Chooses how the function proves its identity to Key Vault, including mock
//! credentials for Pact testing.
//!
//! Resolution order mirrors what the Functions platform exposes:
//! 1. `PACT_MODE` set: fixed test token
//! 2. `AZURE_FEDERATED_TOKEN_FILE` present: Workload Identity
//! 3. otherwise: Managed Identity, user-assigned when `AZURE_CLIENT_ID` is set

use crate::config::env_var_non_empty;
use crate::constants::AZURE_CLIENT_ID_ENV;
use crate::provider::{IdentityProvider, SecretStoreError};
use azure_core::credentials::{AccessToken, Secret, TokenCredential, TokenRequestOptions};
use azure_identity::{
    ManagedIdentityCredential, ManagedIdentityCredentialOptions, UserAssignedId,
    WorkloadIdentityCredential, WorkloadIdentityCredentialOptions,
};
use std::sync::Arc;
use tracing::{debug, info};

const FEDERATED_TOKEN_FILE_ENV: &str = "AZURE_FEDERATED_TOKEN_FILE";

/// Mock TokenCredential for Pact testing
/// Returns a dummy token without attempting real Azure authentication
#[derive(Debug)]
pub struct MockTokenCredential;

#[async_trait::async_trait]
impl TokenCredential for MockTokenCredential {
    async fn get_token(
        &self,
        _scopes: &[&str],
        _options: Option<TokenRequestOptions<'_>>,
    ) -> azure_core::Result<AccessToken> {
        use typespec_client_core::time::{Duration, OffsetDateTime};

        Ok(AccessToken::new(
            Secret::new("test-token".to_string()),
            OffsetDateTime::now_utc() + Duration::seconds(3600),
        ))
    }
}

/// Where the credential comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Static token for Pact mock servers
    Mock,
    /// Federated token exchanged for an Entra ID token
    WorkloadIdentity { client_id: Option<String> },
    /// Instance metadata endpoint of the hosting platform
    ManagedIdentity { client_id: Option<String> },
}

/// Identity provider backed by `azure_identity`
#[derive(Debug, Clone)]
pub struct AzureIdentityProvider {
    source: CredentialSource,
}

impl AzureIdentityProvider {
    /// Pick the credential source from the environment
    pub fn from_env(pact_mode: bool) -> Self {
        let client_id = env_var_non_empty(AZURE_CLIENT_ID_ENV);
        let source = if pact_mode {
            CredentialSource::Mock
        } else if env_var_non_empty(FEDERATED_TOKEN_FILE_ENV).is_some() {
            CredentialSource::WorkloadIdentity { client_id }
        } else {
            CredentialSource::ManagedIdentity { client_id }
        };
        Self::new(source)
    }

    pub fn new(source: CredentialSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &CredentialSource {
        &self.source
    }
}

impl IdentityProvider for AzureIdentityProvider {
    fn resolve(&self) -> Result<Arc<dyn TokenCredential>, SecretStoreError> {
        let credential: Arc<dyn TokenCredential> = match &self.source {
            CredentialSource::Mock => {
                debug!("Pact mode: using mock Azure credential");
                Arc::new(MockTokenCredential)
            }
            CredentialSource::WorkloadIdentity { client_id } => {
                info!(
                    client_id = client_id.as_deref().unwrap_or("<from token file>"),
                    "Using Azure Workload Identity authentication"
                );
                let options = WorkloadIdentityCredentialOptions {
                    client_id: client_id.clone(),
                    ..Default::default()
                };
                WorkloadIdentityCredential::new(Some(options)).map_err(|e| {
                    SecretStoreError::Credential(format!(
                        "Failed to create WorkloadIdentityCredential: {e}"
                    ))
                })?
            }
            CredentialSource::ManagedIdentity { client_id } => {
                let options = client_id.as_ref().map(|id| {
                    info!(client_id = %id, "Using user-assigned Managed Identity");
                    ManagedIdentityCredentialOptions {
                        user_assigned_id: Some(UserAssignedId::ClientId(id.clone())),
                        ..Default::default()
                    }
                });
                if options.is_none() {
                    info!("AZURE_CLIENT_ID not set, using system-assigned Managed Identity");
                }
                ManagedIdentityCredential::new(options).map_err(|e| {
                    SecretStoreError::Credential(format!(
                        "Failed to create ManagedIdentityCredential: {e}"
                    ))
                })?
            }
        };

        Ok(credential)
    }
}
