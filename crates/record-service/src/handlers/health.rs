//! Health check handlers.
//!
//! - `/health`: Liveness probe - returns OK if the process is running
//! - `/ready`: Readiness probe - checks the record store

use crate::routes::HealthState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

/// Readiness probe response body.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,

    pub store: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Liveness probe handler.
///
/// Does NOT check any dependencies.
pub async fn health_check() -> &'static str {
    "OK"
}

/// Readiness probe handler.
///
/// Returns 200 if the store answers, 503 otherwise. Error messages are
/// generic; details are logged by the service.
#[tracing::instrument(skip_all, name = "rs.health.readiness")]
pub async fn readiness_check(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    if state.service.is_ready().await {
        (
            StatusCode::OK,
            Json(ReadinessResponse {
                status: "ready",
                store: "healthy",
                error: None,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                status: "not_ready",
                store: "unhealthy",
                error: Some("Service dependencies unavailable".to_string()),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(health_check().await, "OK");
    }
}
