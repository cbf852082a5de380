//! # Provider Modules
//!
//! Collaborators the handler talks to, behind traits so requests can be served
//! against Azure in production and against fakes in tests.
//!
//! - `IdentityProvider` resolves the credential used for outbound calls
//! - `SecretStoreConnector` builds a client bound to an endpoint and credential
//! - `SecretStoreClient` fetches a named secret

use async_trait::async_trait;
use azure_core::credentials::TokenCredential;
use std::sync::Arc;

pub mod azure;
pub mod error;

pub use error::SecretStoreError;

/// Resolves the identity the function presents to Key Vault
pub trait IdentityProvider: Send + Sync {
    /// Build a credential from the ambient environment
    ///
    /// Token acquisition is lazy; a credential returned here can still fail on
    /// first use.
    fn resolve(&self) -> Result<Arc<dyn TokenCredential>, SecretStoreError>;
}

/// Builds secret store clients
pub trait SecretStoreConnector: Send + Sync {
    /// Create a client for `endpoint_url` authenticating with `credential`
    fn connect(
        &self,
        endpoint_url: &str,
        credential: Arc<dyn TokenCredential>,
    ) -> Result<Box<dyn SecretStoreClient>, SecretStoreError>;
}

/// Authenticated access to a secret store
#[async_trait]
pub trait SecretStoreClient: Send + Sync {
    /// Get the latest value of a secret
    /// Returns `Ok(None)` when the store returned the secret without a value
    async fn fetch(&self, secret_name: &str) -> Result<Option<String>, SecretStoreError>;
}
