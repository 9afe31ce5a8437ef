//! Metrics definitions for the record service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `rs_` prefix for the record service
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `method`: 3 values (create_record, get_record, update_record)
//! - `status`: "success" or a `RecordError::kind()` label
//! - `operation`: bounded by code (create, find_by_id, save, ping)

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics recorder and return the handle
/// for serving metrics via HTTP.
///
/// # Errors
///
/// Returns error if Prometheus recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("rs_grpc_request".to_string()),
            &[
                0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000,
            ],
        )
        .map_err(|e| format!("Failed to set gRPC request buckets: {e}"))?
        .set_buckets_for_metric(
            Matcher::Prefix("rs_db_query".to_string()),
            &[
                0.001, 0.002, 0.005, 0.010, 0.020, 0.050, 0.100, 0.250, 0.500, 1.000,
            ],
        )
        .map_err(|e| format!("Failed to set DB query buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

/// Record a completed gRPC request.
///
/// Metric: `rs_grpc_requests_total`, `rs_grpc_request_duration_seconds`
/// Labels: `method`, `status`
pub fn record_grpc_request(method: &'static str, status: &'static str, duration: Duration) {
    counter!("rs_grpc_requests_total", "method" => method, "status" => status).increment(1);
    histogram!("rs_grpc_request_duration_seconds", "method" => method)
        .record(duration.as_secs_f64());
}

/// Record a store query.
///
/// Metric: `rs_db_queries_total`, `rs_db_query_duration_seconds`
/// Labels: `operation`, `status`
pub fn record_db_query(operation: &'static str, status: &'static str, duration: Duration) {
    counter!("rs_db_queries_total", "operation" => operation, "status" => status).increment(1);
    histogram!("rs_db_query_duration_seconds", "operation" => operation)
        .record(duration.as_secs_f64());
}
