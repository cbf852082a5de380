//! # Azure Providers
//!
//! - `key_vault`: Azure Key Vault secrets client and managed identity credential

pub mod key_vault;

// Re-export for convenience
pub use key_vault::{AzureIdentityProvider, AzureKeyVault, AzureKeyVaultConnector, MockTokenCredential};
