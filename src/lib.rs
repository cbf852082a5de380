//! Key Vault Secret Function Library
//!
//! Azure Functions custom handler that reads one secret from Azure Key Vault
//! over a private endpoint, authenticating with a managed identity, and
//! returns it as JSON.
//!
//! The request pipeline lives in [`handler`]; Azure specifics sit behind the
//! traits in [`provider`] so the handler can be exercised without a vault.

pub mod config;
pub mod constants;
pub mod handler;
pub mod observability;
pub mod provider;
pub mod runtime;
pub mod server;

pub use handler::{ErrorCode, FunctionResponse, Invocation, SecretRetrievalHandler};
pub use provider::{IdentityProvider, SecretStoreClient, SecretStoreConnector, SecretStoreError};
