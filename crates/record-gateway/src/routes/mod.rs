//! HTTP routes for the record gateway.
//!
//! Defines the Axum router and application state.

use crate::handlers;
use crate::middleware::http_metrics::http_metrics_middleware;
use crate::services::RecordClient;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record service client.
    pub client: Arc<dyn RecordClient>,
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `POST /record`, `GET /record/:id`, `PUT /record/:id` - Record API
/// - `/health` - Liveness probe
/// - `/metrics` - Prometheus metrics
/// - TraceLayer for request logging
/// - 30 second request timeout
/// - HTTP metrics middleware (outermost)
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let record_routes = Router::new()
        .route("/record", post(handlers::create_record))
        .route(
            "/record/:id",
            get(handlers::get_record).put(handlers::update_record),
        )
        .with_state(state);

    let operational_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    // 3. http_metrics_middleware - Record every response (outermost)
    record_routes
        .merge(operational_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(http_metrics_middleware))
}
