//! Pact contract tests for the Azure Key Vault Secrets API
//!
//! Defines what the function expects from Key Vault when it reads `demo-secret`.
//! A Pact mock server plays the vault; with `PACT_MODE=true` and
//! `AZURE_KEY_VAULT_ENDPOINT` pointing at it the function talks to the same server.

mod common;

use common::init_rustls;
use pact_consumer::prelude::*;
use serde_json::json;

const CONSUMER: &str = "KeyVault-Secret-Function";
const PROVIDER: &str = "Azure-Key-Vault";
/// API version sent by `SecretClient`
const API_VERSION: &str = "2025-07-01";

async fn get_secret(base_url: &str, secret_name: &str) -> reqwest::Response {
    // Latest version is an empty trailing segment
    let url = format!("{}/secrets/{secret_name}/", base_url.trim_end_matches('/'));
    reqwest::Client::new()
        .get(url)
        .header("authorization", "Bearer test-token")
        .query(&[("api-version", API_VERSION)])
        .send()
        .await
        .expect("Failed to make request")
}

#[tokio::test]
async fn test_get_demo_secret_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("get the latest version of demo-secret", "", |mut i| {
        i.given("demo-secret exists and the managed identity has Key Vault Secrets User");
        i.request
            .method("GET")
            .path("/secrets/demo-secret/")
            .header("authorization", "Bearer test-token")
            .query_param("api-version", API_VERSION);
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "value": "s3cr3t",
                "id": "https://kv-demo.vault.azure.net/secrets/demo-secret/0f3a9c",
                "attributes": {
                    "enabled": true,
                    "created": 1704067200,
                    "updated": 1704067200,
                    "recoveryLevel": "Recoverable+Purgeable"
                }
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let response = get_secret(mock_server.url().as_str(), "demo-secret").await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["value"], "s3cr3t");
}

#[tokio::test]
async fn test_get_secret_without_value_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("get a secret that has no value", "", |mut i| {
        i.given("demo-secret exists without a value");
        i.request
            .method("GET")
            .path("/secrets/demo-secret/")
            .header("authorization", "Bearer test-token")
            .query_param("api-version", API_VERSION);
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "id": "https://kv-demo.vault.azure.net/secrets/demo-secret/0f3a9c",
                "attributes": { "enabled": true }
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let response = get_secret(mock_server.url().as_str(), "demo-secret").await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body.get("value").is_none());
}

#[tokio::test]
async fn test_get_secret_forbidden_contract() {
    init_rustls();
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("get a secret without the Secrets User role", "", |mut i| {
        i.given("the managed identity has no role assignment on the vault");
        i.request
            .method("GET")
            .path("/secrets/demo-secret/")
            .header("authorization", "Bearer test-token")
            .query_param("api-version", API_VERSION);
        i.response
            .status(403)
            .header("content-type", "application/json")
            .json_body(json!({
                "error": {
                    "code": "Forbidden",
                    "message": "Caller is not authorized to perform action on resource."
                }
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let response = get_secret(mock_server.url().as_str(), "demo-secret").await;

    assert_eq!(response.status(), 403);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["code"], "Forbidden");
}
