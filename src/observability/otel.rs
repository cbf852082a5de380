//! # OpenTelemetry Support
//!
//! Datadog trace export via `datadog-opentelemetry`.
//!
//! Export is enabled only when `DD_API_KEY` is present. Without it the function
//! logs through the plain `tracing-subscriber` formatter.
//!
//! ## Environment Variables
//!
//! - `DD_API_KEY` (required to enable)
//! - `DD_SERVICE` (default `keyvault-secret-function`)
//! - `DD_VERSION` (default `<crate version>-<git hash>`)
//! - `DD_ENV`, `DD_SITE`, `DD_TRACE_AGENT_URL`

use anyhow::Result;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_SERVICE_NAME: &str = "keyvault-secret-function";

/// Tracer provider handle for graceful shutdown
#[derive(Debug)]
pub enum TracerProviderHandle {
    Datadog(opentelemetry_sdk::trace::SdkTracerProvider),
}

/// Datadog settings resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatadogSettings {
    pub service: String,
    pub version: String,
    pub environment: Option<String>,
    pub site: String,
}

impl DatadogSettings {
    /// Returns `None` when `DD_API_KEY` is not set
    pub fn from_env() -> Option<Self> {
        std::env::var("DD_API_KEY").ok()?;
        Some(Self {
            service: std::env::var("DD_SERVICE")
                .unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string()),
            version: std::env::var("DD_VERSION").unwrap_or_else(|_| {
                format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("BUILD_GIT_HASH"))
            }),
            environment: std::env::var("DD_ENV").ok(),
            site: std::env::var("DD_SITE").unwrap_or_else(|_| "datadoghq.com".to_string()),
        })
    }
}

/// Initialize OpenTelemetry tracing
///
/// Returns `Ok(None)` if Datadog is not configured.
///
/// # Errors
///
/// Reserved for exporter initialisation failures.
pub fn init_otel() -> Result<Option<TracerProviderHandle>> {
    let Some(settings) = DatadogSettings::from_env() else {
        if std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok() {
            warn!("OTEL_EXPORTER_OTLP_ENDPOINT is set but only Datadog export is supported");
        }
        return Ok(None);
    };

    // datadog-opentelemetry reads its settings from DD_* variables; fill in the
    // defaults before it initialises. Runs on the main thread before the runtime
    // spawns any task.
    std::env::set_var("DD_SERVICE", &settings.service);
    std::env::set_var("DD_VERSION", &settings.version);
    std::env::set_var("DD_SITE", &settings.site);
    if std::env::var("DD_TRACE_AGENT_URL").is_err() {
        std::env::set_var("DD_TRACE_AGENT_URL", "http://localhost:8126");
    }

    let tracer_provider = datadog_opentelemetry::tracing().init();

    info!(
        service = %settings.service,
        version = %settings.version,
        env = ?settings.environment,
        site = %settings.site,
        "Datadog OpenTelemetry tracing initialized"
    );

    Ok(Some(TracerProviderHandle::Datadog(tracer_provider)))
}

/// Flush pending spans and shut the tracer provider down
pub fn shutdown_otel(tracer_provider: Option<TracerProviderHandle>) {
    match tracer_provider {
        Some(TracerProviderHandle::Datadog(provider)) => {
            info!("Shutting down Datadog tracer provider...");
            if let Err(e) = provider.shutdown_with_timeout(Duration::from_secs(5)) {
                warn!("Error shutting down Datadog tracer provider: {}", e);
            }
        }
        None => {}
    }
}
