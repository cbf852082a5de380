//! # Initialization
//!
//! Process startup: rustls, tracing, OpenTelemetry, metrics, configuration and
//! the handler wired to Azure collaborators.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{FunctionConfig, LogFormat, PactModeConfig, ServerConfig};
use crate::constants::KEY_VAULT_URL_ENV;
use crate::handler::SecretRetrievalHandler;
use crate::observability::{self, otel::TracerProviderHandle};
use crate::provider::azure::{AzureIdentityProvider, AzureKeyVaultConnector};
use crate::server::ServerState;

/// Everything `main` needs to run the server
pub struct InitializationResult {
    pub server_state: Arc<ServerState>,
    pub server_config: ServerConfig,
    pub otel_tracer_provider: Option<TracerProviderHandle>,
}

impl std::fmt::Debug for InitializationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitializationResult")
            .field("server_config", &self.server_config)
            .finish_non_exhaustive()
    }
}

/// Startup overrides from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct StartupOverrides {
    pub port: Option<u16>,
    pub log_format: Option<LogFormat>,
}

/// Initialize the function runtime
///
/// # Errors
///
/// Fails on invalid Pact mode settings or if metrics cannot be registered.
/// A missing `KEY_VAULT_URL` is not a startup error; requests report it.
pub fn initialize(overrides: StartupOverrides) -> Result<InitializationResult> {
    // Required for rustls 0.23+ when no default provider is set via features.
    // Must run before any client is built.
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        eprintln!("rustls crypto provider already installed");
    }

    let mut server_config = ServerConfig::from_env();
    if let Some(port) = overrides.port {
        server_config.port = port;
    }
    if let Some(log_format) = overrides.log_format {
        server_config.log_format = log_format;
    }

    let otel_tracer_provider =
        observability::otel::init_otel().context("Failed to initialize OpenTelemetry")?;

    if let Err(e) = observability::logging::init_tracing(server_config.log_format) {
        // Datadog export may already own the global subscriber
        if otel_tracer_provider.is_some() {
            warn!("{e}");
        } else {
            return Err(e);
        }
    }

    info!("Starting Key Vault secret function");
    info!(
        "Build info: timestamp={}, datetime={}, git_hash={}",
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_DATETIME"),
        env!("BUILD_GIT_HASH")
    );

    observability::metrics::register_metrics()?;

    let pact_mode =
        PactModeConfig::from_env().context("Failed to initialize PACT_MODE configuration")?;

    let function_config = FunctionConfig::from_env();
    match function_config.key_vault_url() {
        Some(url) => info!(vault_url = url, "Key Vault endpoint configured"),
        None => warn!(
            "{} is not set; every request will return a configuration error",
            KEY_VAULT_URL_ENV
        ),
    }

    let identity = AzureIdentityProvider::from_env(pact_mode.is_some());
    info!(credential_source = ?identity.source(), "Identity provider ready");

    let handler = SecretRetrievalHandler::new(
        function_config,
        Arc::new(identity),
        Arc::new(AzureKeyVaultConnector::new(pact_mode)),
    );

    Ok(InitializationResult {
        server_state: Arc::new(ServerState::new(handler)),
        server_config,
        otel_tracer_provider,
    })
}
