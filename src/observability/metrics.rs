//! # Metrics
//!
//! Prometheus metrics for the function.
//!
//! ## Metrics Exposed
//!
//! - `keyvault_function_requests_total{outcome}` - Requests by outcome (success, not_found, misconfigured, error)
//! - `keyvault_function_fetch_errors_total{code}` - Failed retrievals by classified error code
//! - `keyvault_function_fetch_duration_seconds` - Time spent resolving the credential and fetching the secret

use anyhow::Result;
use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "keyvault_function_requests_total",
            "Total number of function invocations by outcome",
        ),
        &["outcome"],
    )
    .expect("Failed to create REQUESTS_TOTAL metric - this should never happen")
});

static FETCH_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "keyvault_function_fetch_errors_total",
            "Total number of failed Key Vault retrievals by error code",
        ),
        &["code"],
    )
    .expect("Failed to create FETCH_ERRORS_TOTAL metric - this should never happen")
});

static FETCH_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "keyvault_function_fetch_duration_seconds",
            "Duration of Key Vault secret retrieval in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0]),
    )
    .expect("Failed to create FETCH_DURATION metric - this should never happen")
});

/// Register all metrics with the registry
///
/// # Errors
///
/// Fails if called twice in the same process.
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(REQUESTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(FETCH_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(FETCH_DURATION.clone()))?;
    Ok(())
}

/// Snapshot of every registered metric family
pub fn gather() -> Vec<prometheus::proto::MetricFamily> {
    REGISTRY.gather()
}

pub fn record_request(outcome: &str) {
    REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_fetch_error(code: &str) {
    FETCH_ERRORS_TOTAL.with_label_values(&[code]).inc();
}

pub fn observe_fetch_duration(duration_secs: f64) {
    FETCH_DURATION.observe(duration_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_counter_increments_per_outcome() {
        let before = REQUESTS_TOTAL.with_label_values(&["not_found"]).get();
        record_request("not_found");
        record_request("not_found");
        assert_eq!(
            REQUESTS_TOTAL.with_label_values(&["not_found"]).get(),
            before + 2
        );
    }

    #[test]
    fn test_fetch_errors_are_labelled_by_code() {
        let before = FETCH_ERRORS_TOTAL.with_label_values(&["ACCESS_DENIED"]).get();
        record_fetch_error("ACCESS_DENIED");
        assert_eq!(
            FETCH_ERRORS_TOTAL.with_label_values(&["ACCESS_DENIED"]).get(),
            before + 1
        );
    }
}
