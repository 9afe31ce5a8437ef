//! HTTP routes for the record service's health listener.
//!
//! The record API itself is served over gRPC; this router only exposes
//! probes and Prometheus metrics.

use crate::handlers;
use crate::services::RecordService;
use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// State shared by the health handlers.
#[derive(Clone)]
pub struct HealthState {
    /// Domain service, used to probe the store.
    pub service: RecordService,
}

/// Build the health router.
///
/// - `/health` - Liveness probe
/// - `/ready` - Readiness probe (store ping)
/// - `/metrics` - Prometheus exposition (when a handle is supplied)
pub fn build_health_routes(
    state: Arc<HealthState>,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .with_state(state);

    if let Some(handle) = metrics_handle {
        router = router.route(
            "/metrics",
            get(move || {
                let handle = handle.clone();
                async move { handle.render() }
            }),
        );
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(10)))
}
