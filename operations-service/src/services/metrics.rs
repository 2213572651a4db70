//! Metrics module for operations-service.
//!
//! Two sources end up on `/metrics`: the `prometheus` registry below
//! (resource writes, leave accrual) and the `metrics` facade recorder that
//! collects the shared HTTP middleware and query engine measurements.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use prometheus::{
    histogram_opts, opts, register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec,
    IntCounterVec, TextEncoder,
};
use service_core::error::AppError;
use std::sync::OnceLock;

/// Database query duration histogram
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        histogram_opts!(
            "operations_db_query_duration_seconds",
            "Database query duration"
        ),
        &["operation"]
    )
    .expect("Failed to register DB_QUERY_DURATION")
});

/// Handle to the `metrics` facade recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Resource writes by resource and operation
pub static RESOURCE_OPERATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Accrual runs by trigger and result
pub static ACCRUAL_RUNS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Per-employee accrual outcomes
pub static ACCRUAL_ITEMS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Accrual run duration
pub static ACCRUAL_RUN_DURATION: OnceLock<HistogramVec> = OnceLock::new();

/// Initialize all metrics. Safe to call more than once; only the first call
/// installs the recorder.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| {
        PrometheusBuilder::new()
            .install_recorder()
            .expect("Failed to install Prometheus recorder")
    });

    RESOURCE_OPERATIONS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "operations_resource_operations_total",
                "Total resource writes by resource and operation"
            ),
            &["resource", "operation"]
        )
        .expect("Failed to register RESOURCE_OPERATIONS_TOTAL")
    });

    ACCRUAL_RUNS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "operations_leave_accrual_runs_total",
                "Total leave accrual runs by trigger and result"
            ),
            &["trigger", "result"]
        )
        .expect("Failed to register ACCRUAL_RUNS_TOTAL")
    });

    ACCRUAL_ITEMS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "operations_leave_accrual_items_total",
                "Leave accrual outcomes per employee"
            ),
            &["outcome"]
        )
        .expect("Failed to register ACCRUAL_ITEMS_TOTAL")
    });

    ACCRUAL_RUN_DURATION.get_or_init(|| {
        register_histogram_vec!(
            histogram_opts!(
                "operations_leave_accrual_run_duration_seconds",
                "Leave accrual run duration",
                vec![0.05, 0.1, 0.5, 1.0, 5.0, 15.0, 60.0, 300.0]
            ),
            &["trigger"]
        )
        .expect("Failed to register ACCRUAL_RUN_DURATION")
    });

    let _ = &*DB_QUERY_DURATION;
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> Result<String, AppError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to encode metrics: {}", e)))?;
    let mut text = String::from_utf8(buffer)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Metrics are not UTF-8: {}", e)))?;

    if let Some(handle) = METRICS_HANDLE.get() {
        text.push_str(&handle.render());
    }
    Ok(text)
}

/// Record a create/update/delete on a resource.
pub fn record_resource_operation(resource: &str, operation: &str) {
    if let Some(counter) = RESOURCE_OPERATIONS_TOTAL.get() {
        counter.with_label_values(&[resource, operation]).inc();
    }
}

/// Record a finished accrual run.
pub fn record_accrual_run(trigger: &str, result: &str, duration_secs: f64) {
    if let Some(counter) = ACCRUAL_RUNS_TOTAL.get() {
        counter.with_label_values(&[trigger, result]).inc();
    }
    if let Some(histogram) = ACCRUAL_RUN_DURATION.get() {
        histogram.with_label_values(&[trigger]).observe(duration_secs);
    }
}

/// Record one employee's accrual outcome.
pub fn record_accrual_item(outcome: &str) {
    if let Some(counter) = ACCRUAL_ITEMS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}
