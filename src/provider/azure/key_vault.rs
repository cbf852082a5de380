//! # Azure Key Vault
//!
//! Key Vault implementation of the provider traits.
//!
//! - `auth`: picks the credential source (managed identity, workload identity, Pact mock)
//! - `client`: `SecretClient` wrapper and the connector that builds it per request

mod auth;
mod client;

pub use auth::{AzureIdentityProvider, CredentialSource, MockTokenCredential};
pub use client::{AzureKeyVault, AzureKeyVaultConnector};
