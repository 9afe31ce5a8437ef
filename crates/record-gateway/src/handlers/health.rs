//! Liveness probe.

/// Handler for GET /health
///
/// Returns OK while the process is running. Does not call the record
/// service.
pub async fn health_check() -> &'static str {
    "OK"
}
