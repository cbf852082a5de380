//! # Error Classification
//!
//! Maps a `SecretStoreError` to the stable code returned to callers.
//!
//! Structured signals (HTTP status, transport or credential failure) are
//! consulted first. Message matching is a fallback for errors that carry no
//! structure; SDK message text varies between versions and locales, so those
//! classifications are best-effort.

use crate::provider::SecretStoreError;
use serde::Serialize;

/// Substrings that identify connectivity problems in raw error text
const NETWORK_INDICATORS: [&str; 5] = [
    "ENOTFOUND",
    "timeout",
    "timed out",
    "dns error",
    "connection refused",
];

/// Stable failure code in the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// DNS, connect or timeout failure, usually a private endpoint problem
    NetworkError,
    /// The identity authenticated but lacks a role on the vault
    AccessDenied,
    /// No valid token could be presented
    AuthenticationFailed,
    UnknownError,
}

impl ErrorCode {
    /// Classify an error, preferring structured status over message text
    pub fn classify(err: &SecretStoreError) -> Self {
        Self::from_structured(err).unwrap_or_else(|| Self::from_message(&err.to_string()))
    }

    fn from_structured(err: &SecretStoreError) -> Option<Self> {
        match err {
            // An unreachable identity endpoint is a network problem, not a rejected identity
            SecretStoreError::Credential(message) if has_network_indicator(message) => {
                Some(Self::NetworkError)
            }
            SecretStoreError::Status { status: 401, .. } | SecretStoreError::Credential(_) => {
                Some(Self::AuthenticationFailed)
            }
            SecretStoreError::Status { status: 403, .. } => Some(Self::AccessDenied),
            SecretStoreError::Status {
                status: 408 | 504, ..
            }
            | SecretStoreError::Transport(_) => Some(Self::NetworkError),
            SecretStoreError::Status { .. }
            | SecretStoreError::Configuration(_)
            | SecretStoreError::Other(_) => None,
        }
    }

    /// Classify from raw message text
    ///
    /// Checked in order: network, forbidden, unauthorized.
    pub fn from_message(message: &str) -> Self {
        if has_network_indicator(message) {
            Self::NetworkError
        } else if message.contains("Forbidden") || message.contains("403") {
            Self::AccessDenied
        } else if message.contains("401") {
            Self::AuthenticationFailed
        } else {
            Self::UnknownError
        }
    }

    /// Guidance shown to the caller
    /// Unclassified errors pass the raw message through.
    pub fn user_message(self, err: &SecretStoreError) -> String {
        match self {
            Self::NetworkError => {
                "Network connectivity issue - check private endpoint configuration".to_string()
            }
            Self::AccessDenied => "Access denied - check managed identity permissions".to_string(),
            Self::AuthenticationFailed => {
                "Authentication failed - check managed identity configuration".to_string()
            }
            Self::UnknownError => {
                let raw = err.to_string();
                if raw.is_empty() {
                    "Unknown error occurred".to_string()
                } else {
                    raw
                }
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NetworkError => "NETWORK_ERROR",
            Self::AccessDenied => "ACCESS_DENIED",
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

fn has_network_indicator(message: &str) -> bool {
    NETWORK_INDICATORS
        .iter()
        .any(|needle| message.contains(needle))
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
