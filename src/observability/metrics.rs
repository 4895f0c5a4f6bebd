//! # Metrics
//!
//! Prometheus metrics for remote control-plane calls and deployments.
//!
//! ## Metrics Exposed
//!
//! - `apim_provisioner_remote_operations_total` - Remote calls by resource kind and operation
//! - `apim_provisioner_remote_operation_errors_total` - Failed remote calls by resource kind
//! - `apim_provisioner_remote_operation_duration_seconds` - Duration of remote calls by resource kind
//! - `apim_provisioner_deployments_total` - Total number of API deployments attempted
//! - `apim_provisioner_deployment_errors_total` - Total number of failed API deployments

use anyhow::Result;
use prometheus::{HistogramVec, IntCounter, IntCounterVec, Registry, TextEncoder};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static REMOTE_OPERATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "apim_provisioner_remote_operations_total",
            "Total number of remote control-plane operations by resource kind",
        ),
        &["resource", "operation"],
    )
    .expect("Failed to create REMOTE_OPERATIONS_TOTAL metric - this should never happen")
});

static REMOTE_OPERATION_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "apim_provisioner_remote_operation_errors_total",
            "Total number of failed remote control-plane operations by resource kind",
        ),
        &["resource"],
    )
    .expect("Failed to create REMOTE_OPERATION_ERRORS_TOTAL metric - this should never happen")
});

static REMOTE_OPERATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "apim_provisioner_remote_operation_duration_seconds",
            "Duration of remote control-plane operations in seconds by resource kind",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
        &["resource"],
    )
    .expect("Failed to create REMOTE_OPERATION_DURATION metric - this should never happen")
});

static DEPLOYMENTS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "apim_provisioner_deployments_total",
        "Total number of API deployments attempted",
    )
    .expect("Failed to create DEPLOYMENTS_TOTAL metric - this should never happen")
});

static DEPLOYMENT_ERRORS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "apim_provisioner_deployment_errors_total",
        "Total number of failed API deployments",
    )
    .expect("Failed to create DEPLOYMENT_ERRORS_TOTAL metric - this should never happen")
});

/// Register all metrics with the registry. Call once at startup.
///
/// # Errors
/// Returns an error if a metric is already registered
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(REMOTE_OPERATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(REMOTE_OPERATION_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(REMOTE_OPERATION_DURATION.clone()))?;
    REGISTRY.register(Box::new(DEPLOYMENTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(DEPLOYMENT_ERRORS_TOTAL.clone()))?;

    Ok(())
}

/// Encode the registry in the Prometheus text exposition format
///
/// # Errors
/// Returns an error if encoding fails
pub fn render_metrics() -> Result<String> {
    Ok(TextEncoder::new().encode_to_string(&REGISTRY.gather())?)
}

pub fn record_remote_operation(resource: &str, operation: &str, duration: f64) {
    REMOTE_OPERATIONS_TOTAL
        .with_label_values(&[resource, operation])
        .inc();
    REMOTE_OPERATION_DURATION
        .with_label_values(&[resource])
        .observe(duration);
}

pub fn increment_remote_operation_errors(resource: &str) {
    REMOTE_OPERATION_ERRORS_TOTAL
        .with_label_values(&[resource])
        .inc();
}

pub fn increment_deployments() {
    DEPLOYMENTS_TOTAL.inc();
}

pub fn increment_deployment_errors() {
    DEPLOYMENT_ERRORS_TOTAL.inc();
}
