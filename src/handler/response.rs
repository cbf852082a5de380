//! # Response Bodies
//!
//! JSON payloads returned by the function, one struct per outcome.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::error_code::ErrorCode;
use crate::constants::{
    AUTHENTICATION_METHOD, CONNECTION_METHOD, MISSING_URL_ERROR, MISSING_URL_MESSAGE,
    SECRET_EMPTY_ERROR, SUCCESS_MESSAGE, TROUBLESHOOTING_CHECK_ITEMS,
};

/// Secret value, wiped when dropped and redacted in `Debug`
#[derive(Clone, PartialEq, Eq, Serialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecretValue(String);

impl SecretValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretValue([REDACTED])")
    }
}

/// Outcome of one retrieval attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretResult {
    /// The store answered; `value` is `None` when the secret has no value
    Retrieved {
        name: String,
        value: Option<SecretValue>,
    },
    /// Credential, client or fetch failed
    Failed { code: ErrorCode, message: String },
}

/// `200` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretRetrieved {
    pub success: bool,
    pub message: &'static str,
    pub secret_name: String,
    pub secret_value: SecretValue,
    pub key_vault_url: String,
    pub retrieved_at: String,
    pub connection_method: &'static str,
    pub authentication_method: &'static str,
}

/// `404` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretNotFound {
    pub error: &'static str,
    pub secret_name: String,
}

/// `500` body when the endpoint URL is not configured
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationMissing {
    pub error: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Troubleshooting {
    pub check_items: [&'static str; 5],
}

impl Default for Troubleshooting {
    fn default() -> Self {
        Self {
            check_items: TROUBLESHOOTING_CHECK_ITEMS,
        }
    }
}

/// `500` body when retrieval failed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalFailure {
    pub success: bool,
    pub error: ErrorCode,
    pub message: String,
    pub key_vault_url: String,
    pub timestamp: String,
    pub troubleshooting: Troubleshooting,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Retrieved(SecretRetrieved),
    NotFound(SecretNotFound),
    Misconfigured(ConfigurationMissing),
    Failed(RetrievalFailure),
}

/// Status plus body, serialised as `application/json`
#[derive(Debug, Clone)]
pub struct FunctionResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

impl FunctionResponse {
    pub fn misconfigured() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ResponseBody::Misconfigured(ConfigurationMissing {
                error: MISSING_URL_ERROR,
                message: MISSING_URL_MESSAGE,
            }),
        }
    }

    /// Map a retrieval outcome to a response
    ///
    /// An empty value is treated like a missing one.
    pub fn from_result(result: SecretResult, key_vault_url: &str, now: String) -> Self {
        match result {
            SecretResult::Retrieved {
                name,
                value: Some(value),
            } if !value.expose().is_empty() => Self {
                status: StatusCode::OK,
                body: ResponseBody::Retrieved(SecretRetrieved {
                    success: true,
                    message: SUCCESS_MESSAGE,
                    secret_name: name,
                    secret_value: value,
                    key_vault_url: key_vault_url.to_string(),
                    retrieved_at: now,
                    connection_method: CONNECTION_METHOD,
                    authentication_method: AUTHENTICATION_METHOD,
                }),
            },
            SecretResult::Retrieved { name, .. } => Self {
                status: StatusCode::NOT_FOUND,
                body: ResponseBody::NotFound(SecretNotFound {
                    error: SECRET_EMPTY_ERROR,
                    secret_name: name,
                }),
            },
            SecretResult::Failed { code, message } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: ResponseBody::Failed(RetrievalFailure {
                    success: false,
                    error: code,
                    message,
                    key_vault_url: key_vault_url.to_string(),
                    timestamp: now,
                    troubleshooting: Troubleshooting::default(),
                }),
            },
        }
    }

    /// Label used for the request outcome metric
    pub fn outcome(&self) -> &'static str {
        match self.body {
            ResponseBody::Retrieved(_) => "success",
            ResponseBody::NotFound(_) => "not_found",
            ResponseBody::Misconfigured(_) => "misconfigured",
            ResponseBody::Failed(_) => "error",
        }
    }

    /// Body as a JSON value
    ///
    /// # Errors
    ///
    /// Serialisation of these types cannot fail in practice; the error is
    /// surfaced rather than swallowed.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(&self.body)
    }
}

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://kv-demo.vault.azure.net/";
    const NOW: &str = "2026-01-01T00:00:00.000Z";

    #[test]
    fn test_success_body_shape() {
        let response = FunctionResponse::from_result(
            SecretResult::Retrieved {
                name: "demo-secret".to_string(),
                value: Some(SecretValue::new("s3cr3t")),
            },
            URL,
            NOW.to_string(),
        );
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.to_json().unwrap(),
            json!({
                "success": true,
                "message": "Successfully accessed Key Vault via private endpoint!",
                "secretName": "demo-secret",
                "secretValue": "s3cr3t",
                "keyVaultUrl": URL,
                "retrievedAt": NOW,
                "connectionMethod": "Private Endpoint",
                "authenticationMethod": "User Assigned Managed Identity"
            })
        );
    }

    #[test]
    fn test_empty_and_missing_values_are_not_found() {
        for value in [None, Some(SecretValue::new(""))] {
            let response = FunctionResponse::from_result(
                SecretResult::Retrieved {
                    name: "demo-secret".to_string(),
                    value,
                },
                URL,
                NOW.to_string(),
            );
            assert_eq!(response.status, StatusCode::NOT_FOUND);
            assert_eq!(
                response.to_json().unwrap(),
                json!({"error": "Secret not found or empty", "secretName": "demo-secret"})
            );
        }
    }

    #[test]
    fn test_failure_body_carries_checklist() {
        let response = FunctionResponse::from_result(
            SecretResult::Failed {
                code: ErrorCode::AccessDenied,
                message: "Access denied - check managed identity permissions".to_string(),
            },
            URL,
            NOW.to_string(),
        );
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.to_json().unwrap();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("ACCESS_DENIED"));
        assert_eq!(body["timestamp"], json!(NOW));
        assert_eq!(
            body["troubleshooting"]["checkItems"].as_array().map(Vec::len),
            Some(5)
        );
    }

    #[test]
    fn test_misconfigured_body() {
        let response = FunctionResponse::misconfigured();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.outcome(), "misconfigured");
        assert_eq!(
            response.to_json().unwrap(),
            json!({
                "error": "KEY_VAULT_URL environment variable not found",
                "message": "Ensure the Function App is properly configured with Key Vault URL"
            })
        );
    }

    #[test]
    fn test_secret_value_debug_is_redacted() {
        let value = SecretValue::new("s3cr3t");
        assert!(!format!("{value:?}").contains("s3cr3t"));
    }
}
