//! # Secret Store Errors
//!
//! Failure signal shared by identity providers and secret store clients.
//!
//! Variants keep the structured status or kind the Azure SDK reported so
//! callers can classify on it; `Display` is always the raw underlying message.

use azure_core::error::ErrorKind;
use thiserror::Error;

/// Error raised while resolving a credential, building a client, or fetching a secret
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretStoreError {
    /// The store answered with a non-success HTTP status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never got a response (DNS, connect, TLS, timeout)
    #[error("{0}")]
    Transport(String),

    /// No credential could be obtained for the configured identity
    #[error("{0}")]
    Credential(String),

    /// The client could not be built from the given endpoint
    #[error("{0}")]
    Configuration(String),

    /// Anything without a structured signal
    #[error("{0}")]
    Other(String),
}

impl SecretStoreError {
    /// HTTP status reported by the store, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<azure_core::Error> for SecretStoreError {
    fn from(err: azure_core::Error) -> Self {
        let message = err.to_string();
        if let Some(status) = err.http_status() {
            return Self::Status {
                status: u16::from(status),
                message,
            };
        }
        match err.kind() {
            ErrorKind::Io => Self::Transport(message),
            ErrorKind::Credential => Self::Credential(message),
            _ => Self::Other(message),
        }
    }
}

impl From<serde_json::Error> for SecretStoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(format!("Failed to deserialize Azure secret response: {err}"))
    }
}
