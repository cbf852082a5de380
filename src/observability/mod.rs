//! # Observability
//!
//! - `metrics`: Prometheus metrics collection
//! - `otel`: OpenTelemetry tracing integration
//! - `logging`: tracing subscriber setup

pub mod logging;
pub mod metrics;
pub mod otel;
