//! Common test utilities
//!
//! Shared rustls setup plus scripted stand-ins for the identity provider and
//! Key Vault client, so the handler can be driven without a vault.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use async_trait::async_trait;
use azure_core::credentials::TokenCredential;
use keyvault_secret_function::config::FunctionConfig;
use keyvault_secret_function::provider::azure::MockTokenCredential;
use keyvault_secret_function::{
    IdentityProvider, SecretRetrievalHandler, SecretStoreClient, SecretStoreConnector,
    SecretStoreError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

static RUSTLS_INIT: Once = Once::new();

/// Initialize rustls crypto provider for tests
///
/// Uses a `Once` so it runs a single time per test binary.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        // rustls 0.23+ needs a process-wide provider before any TLS client is built
        rustls::crypto::ring::default_provider()
            .install_default()
            .expect("Failed to install rustls crypto provider");
    });
}

pub const TEST_VAULT_URL: &str = "https://kv-demo.vault.azure.net/";

/// Identity provider that hands out a mock token, or a scripted failure
#[derive(Debug, Default)]
pub struct FakeIdentity {
    pub failure: Option<SecretStoreError>,
    pub calls: AtomicUsize,
}

impl FakeIdentity {
    pub fn failing(err: SecretStoreError) -> Self {
        Self {
            failure: Some(err),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IdentityProvider for FakeIdentity {
    fn resolve(&self) -> Result<Arc<dyn TokenCredential>, SecretStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(Arc::new(MockTokenCredential)),
        }
    }
}

/// Connector whose clients answer every fetch with the same scripted result
#[derive(Debug)]
pub struct FakeVault {
    pub result: Result<Option<String>, SecretStoreError>,
    pub connects: AtomicUsize,
    pub fetches: Arc<AtomicUsize>,
    pub requested: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeVault {
    pub fn returning(result: Result<Option<String>, SecretStoreError>) -> Self {
        Self {
            result,
            connects: AtomicUsize::new(0),
            fetches: Arc::new(AtomicUsize::new(0)),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_value(value: &str) -> Self {
        Self::returning(Ok(Some(value.to_string())))
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// `(endpoint, secret name)` pairs seen by the clients
    pub fn requested(&self) -> Vec<(String, String)> {
        self.requested.lock().expect("lock poisoned").clone()
    }
}

struct FakeClient {
    endpoint: String,
    result: Result<Option<String>, SecretStoreError>,
    fetches: Arc<AtomicUsize>,
    requested: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl SecretStoreClient for FakeClient {
    async fn fetch(&self, secret_name: &str) -> Result<Option<String>, SecretStoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .expect("lock poisoned")
            .push((self.endpoint.clone(), secret_name.to_string()));
        self.result.clone()
    }
}

impl SecretStoreConnector for FakeVault {
    fn connect(
        &self,
        endpoint_url: &str,
        _credential: Arc<dyn TokenCredential>,
    ) -> Result<Box<dyn SecretStoreClient>, SecretStoreError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeClient {
            endpoint: endpoint_url.to_string(),
            result: self.result.clone(),
            fetches: Arc::clone(&self.fetches),
            requested: Arc::clone(&self.requested),
        }))
    }
}

/// Handler wired to the given fakes
pub fn handler(
    config: FunctionConfig,
    identity: Arc<FakeIdentity>,
    vault: Arc<FakeVault>,
) -> SecretRetrievalHandler {
    SecretRetrievalHandler::new(config, identity, vault)
}
