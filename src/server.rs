//! # HTTP Server
//!
//! Azure Functions custom handler endpoint plus metrics and probes.
//!
//! Provides endpoints:
//! - `/api/getKeyVaultSecret` - the function (GET and POST, anonymous)
//! - `/metrics` - Prometheus metrics in text format
//! - `/healthz` - Liveness probe (always returns 200)
//! - `/readyz` - Readiness probe (returns 200 once the handler is built)
//!
//! The Functions host forwards the original request unchanged
//! (`enableForwardingHttpRequest` in `host.json`), so the route matches the
//! public URL.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Router,
};
use prometheus::{Encoder, TextEncoder};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::constants::{FUNCTION_NAME, INVOCATION_ID_HEADER};
use crate::handler::{Invocation, SecretRetrievalHandler};
use crate::observability::metrics;

pub struct ServerState {
    pub is_ready: AtomicBool,
    pub handler: SecretRetrievalHandler,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("is_ready", &self.is_ready.load(Ordering::Relaxed))
            .field("handler", &self.handler)
            .finish()
    }
}

impl ServerState {
    pub fn new(handler: SecretRetrievalHandler) -> Self {
        Self {
            is_ready: AtomicBool::new(false),
            handler,
        }
    }

    pub fn mark_ready(&self) {
        self.is_ready.store(true, Ordering::Relaxed);
    }
}

/// Build the router
pub fn router(state: Arc<ServerState>) -> Router {
    let function_route = format!("/api/{FUNCTION_NAME}");

    Router::new()
        .route(
            &function_route,
            get(function_handler).post(function_handler),
        )
        .route("/metrics", get(metrics_handler))
        .route("/healthz", get(healthz_handler))
        .route("/readyz", get(readyz_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Serve until `shutdown` resolves
///
/// # Errors
///
/// Fails if the port cannot be bound or the server stops with an I/O error.
pub async fn start_server(
    port: u16,
    state: Arc<ServerState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), anyhow::Error> {
    let app = router(Arc::clone(&state));

    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;

    info!("HTTP server listening on {}", addr);
    state.mark_ready();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

/// Request body and query are ignored
async fn function_handler(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    uri: Uri,
) -> impl IntoResponse {
    let url = request_url(&headers, &uri);
    let invocation = match headers
        .get(INVOCATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(id) => Invocation::new(id, url),
        None => Invocation::generated(url),
    };

    state.handler.handle(&invocation).await
}

/// Absolute URL of the request as the caller sent it
///
/// The host forwards the path only; scheme and authority come from
/// `X-Forwarded-Proto` and `Host`.
fn request_url(headers: &HeaderMap, uri: &Uri) -> String {
    if uri.authority().is_some() {
        return uri.to_string();
    }

    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
    match host {
        Some(host) => {
            let scheme = headers
                .get("x-forwarded-proto")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("http");
            format!("{scheme}://{host}{uri}")
        }
        None => uri.to_string(),
    }
}

async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = metrics::gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain")],
            format!("Failed to encode metrics: {e}").into_bytes(),
        );
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        buffer,
    )
}

async fn healthz_handler() -> impl IntoResponse {
    StatusCode::OK
}

async fn readyz_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    if state.is_ready.load(Ordering::Relaxed) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
