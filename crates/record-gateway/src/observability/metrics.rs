//! Metrics definitions for the record gateway.
//!
//! All metrics follow Prometheus naming conventions:
//! - `gw_` prefix for the gateway
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `method`: HTTP verbs, or the 3 RPC names
//! - `endpoint`: `/record`, `/record/{id}`, `/health`, `/metrics`, `/other`
//! - `status`: success/error/timeout for HTTP; gRPC code names for RPCs

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use tonic::Code;

/// Initialize Prometheus metrics recorder and return the handle
/// for serving metrics via HTTP.
///
/// # Errors
///
/// Returns error if Prometheus recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("gw_http_request".to_string()),
            &[
                0.005, 0.010, 0.025, 0.050, 0.100, 0.150, 0.200, 0.300, 0.500, 1.000, 2.000,
            ],
        )
        .map_err(|e| format!("Failed to set HTTP request buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

// ============================================================================
// HTTP Request Metrics
// ============================================================================

/// Record HTTP request completion
///
/// Metric: `gw_http_requests_total` (labels `method`, `endpoint`, `status`),
/// `gw_http_request_duration_seconds` (labels `method`, `endpoint`)
pub fn record_http_request(method: &str, endpoint: &str, status_code: u16, duration: Duration) {
    let normalized_endpoint = normalize_endpoint(endpoint);
    let status = categorize_status_code(status_code);

    histogram!("gw_http_request_duration_seconds",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint
    )
    .record(duration.as_secs_f64());

    counter!("gw_http_requests_total",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint,
        "status" => status
    )
    .increment(1);
}

/// Categorize HTTP status code into success/error/timeout
fn categorize_status_code(status_code: u16) -> &'static str {
    match status_code {
        200..=299 => "success",
        408 | 504 => "timeout",
        _ => "error",
    }
}

/// Normalize endpoint path to prevent label cardinality explosion.
///
/// Record ids are replaced with `{id}`; unknown paths become `/other`.
fn normalize_endpoint(path: &str) -> &'static str {
    match path {
        "/record" => "/record",
        "/health" => "/health",
        "/metrics" => "/metrics",
        _ => match path.strip_prefix("/record/") {
            Some(rest) if !rest.is_empty() && !rest.contains('/') => "/record/{id}",
            _ => "/other",
        },
    }
}

// ============================================================================
// Record Service RPC Metrics
// ============================================================================

/// Record an outbound RPC to the record service.
///
/// Metric: `gw_rpc_calls_total`
/// Labels: `method`, `status`
pub fn record_rpc_call(method: &'static str, code: Option<Code>) {
    let status = match code {
        None => "success",
        Some(Code::InvalidArgument) => "invalid_argument",
        Some(Code::Unauthenticated) => "unauthenticated",
        Some(Code::Unknown) => "unknown",
        Some(Code::Internal) => "internal",
        Some(Code::Unavailable) => "unavailable",
        Some(Code::DeadlineExceeded) => "deadline_exceeded",
        Some(_) => "other",
    };

    counter!("gw_rpc_calls_total", "method" => method, "status" => status).increment(1);
}
