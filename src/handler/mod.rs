//! # Secret Retrieval Handler
//!
//! Per-request pipeline behind `GET|POST /api/getKeyVaultSecret`:
//!
//! 1. Check the Key Vault URL is configured (fail fast, no network)
//! 2. Resolve a credential
//! 3. Build a Key Vault client
//! 4. Fetch the secret
//! 5. Map the outcome to a JSON response
//!
//! Every failure is converted to a response here; nothing escapes to the host.
//! Credential and client are rebuilt for each call, so invocations share no state.

pub mod error_code;
pub mod response;

use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, info_span, Instrument};

use crate::config::FunctionConfig;
use crate::constants::FUNCTION_NAME;
use crate::observability::metrics;
use crate::provider::{IdentityProvider, SecretStoreConnector, SecretStoreError};

pub use error_code::ErrorCode;
pub use response::{FunctionResponse, ResponseBody, SecretResult, SecretValue};

/// Invocation context, used for logging only
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Host-assigned invocation id, or a generated one
    pub id: String,
    /// Request URL as received
    pub url: String,
}

impl Invocation {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }

    /// Invocation with a fresh v4 id, for requests that did not come through the host
    pub fn generated(url: impl Into<String>) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), url)
    }
}

/// Stateless handler for the Key Vault demo function
pub struct SecretRetrievalHandler {
    config: FunctionConfig,
    identity: Arc<dyn IdentityProvider>,
    connector: Arc<dyn SecretStoreConnector>,
}

impl std::fmt::Debug for SecretRetrievalHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretRetrievalHandler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SecretRetrievalHandler {
    pub fn new(
        config: FunctionConfig,
        identity: Arc<dyn IdentityProvider>,
        connector: Arc<dyn SecretStoreConnector>,
    ) -> Self {
        Self {
            config,
            identity,
            connector,
        }
    }

    pub fn config(&self) -> &FunctionConfig {
        &self.config
    }

    /// Serve one invocation. Always returns a response.
    pub async fn handle(&self, invocation: &Invocation) -> FunctionResponse {
        let span = info_span!(
            "function.invocation",
            function = FUNCTION_NAME,
            invocation_id = %invocation.id
        );

        async move {
            info!(
                "HTTP function processed request for url \"{}\"",
                invocation.url
            );

            let Some(vault_url) = self.config.key_vault_url() else {
                error!("KEY_VAULT_URL is not configured, refusing request");
                let response = FunctionResponse::misconfigured();
                metrics::record_request(response.outcome());
                return response;
            };

            info!(vault_url = vault_url, "Connecting to Key Vault: {}", vault_url);

            let result = self.retrieve(vault_url).await;
            if matches!(result, SecretResult::Retrieved { value: Some(ref v), .. } if !v.expose().is_empty())
            {
                info!(
                    secret_name = %self.config.secret_name,
                    "Successfully retrieved secret from Key Vault via private endpoint"
                );
            }

            let response = FunctionResponse::from_result(result, vault_url, iso_timestamp());
            metrics::record_request(response.outcome());
            response
        }
        .instrument(span)
        .await
    }

    /// Credential, client, fetch. Errors are classified, never propagated.
    async fn retrieve(&self, vault_url: &str) -> SecretResult {
        let secret_name = self.config.secret_name.as_str();
        let start = Instant::now();

        let fetched = self.fetch_secret(vault_url, secret_name).await;
        metrics::observe_fetch_duration(start.elapsed().as_secs_f64());

        match fetched {
            Ok(value) => SecretResult::Retrieved {
                name: secret_name.to_string(),
                value: value.map(SecretValue::new),
            },
            Err(err) => Self::classify_failure(&err),
        }
    }

    async fn fetch_secret(
        &self,
        vault_url: &str,
        secret_name: &str,
    ) -> Result<Option<String>, SecretStoreError> {
        let credential = self.identity.resolve()?;
        let client = self.connector.connect(vault_url, credential)?;
        info!(secret_name = secret_name, "Retrieving secret: {}", secret_name);
        client.fetch(secret_name).await
    }

    fn classify_failure(err: &SecretStoreError) -> SecretResult {
        let code = ErrorCode::classify(err);
        error!(
            error_code = %code,
            status = err.status(),
            "Error accessing Key Vault: {err:?}"
        );
        metrics::record_fetch_error(code.as_str());
        SecretResult::Failed {
            code,
            message: code.user_message(err),
        }
    }
}

/// ISO-8601 UTC timestamp with millisecond precision, e.g. `2026-10-19T08:30:00.123Z`
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_timestamp_format() {
        let ts = iso_timestamp();
        assert!(ts.ends_with('Z'), "{ts} should be UTC");
        assert_eq!(ts.len(), "2026-10-19T08:30:00.123Z".len());
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn test_generated_invocation_ids_are_unique() {
        let a = Invocation::generated("/api/getKeyVaultSecret");
        let b = Invocation::generated("/api/getKeyVaultSecret");
        assert_ne!(a.id, b.id);
    }
}
