//! Record gateway error types.
//!
//! All errors map to HTTP status codes via the `IntoResponse` impl. Failures
//! reported by the record service are logged server-side; only validation
//! and authentication messages reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tonic::{Code, Status};

/// Client-visible message when no bearer token was supplied.
pub const MISSING_BEARER_MESSAGE: &str = "Bearer token not provided";

/// Client-visible message when the record service rejected the token.
pub const INVALID_BEARER_MESSAGE: &str = "Invalid Bearer token";

/// Record gateway error type.
///
/// Maps to HTTP status codes:
/// - BadRequest: 400 Bad Request
/// - Unauthorized: 401 Unauthorized
/// - Upstream, Internal: 500 Internal Server Error
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The record service failed for a reason the client cannot act on.
    #[error("Record service error: {0}")]
    Upstream(String),

    #[error("Internal server error")]
    Internal,
}

impl GatewayError {
    /// Translate a record service status.
    ///
    /// `InvalidArgument` keeps the service's message; `Unauthenticated`
    /// reports `unauthenticated_message`; every other code is a 500.
    pub fn from_rpc_status(status: &Status, unauthenticated_message: &str) -> Self {
        match status.code() {
            Code::InvalidArgument => GatewayError::BadRequest(status.message().to_string()),
            Code::Unauthenticated => GatewayError::Unauthorized(unauthenticated_message.to_string()),
            code => GatewayError::Upstream(format!("{:?}: {}", code, status.message())),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::BadRequest(_) => 400,
            GatewayError::Unauthorized(_) => 401,
            GatewayError::Upstream(_) | GatewayError::Internal => 500,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            GatewayError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", reason.clone())
            }
            GatewayError::Unauthorized(reason) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", reason.clone())
            }
            GatewayError::Upstream(reason) => {
                // Log actual error server-side, return generic message to client
                tracing::error!(target: "gw.upstream", reason = %reason, "Record service call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal Server Error".to_string(),
                )
            }
            GatewayError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal Server Error".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        let mut response = (status, Json(error_response)).into_response();

        // Add WWW-Authenticate header for 401 responses
        if status == StatusCode::UNAUTHORIZED {
            if let Ok(header_value) = "Bearer realm=\"records-api\"".parse() {
                response
                    .headers_mut()
                    .insert("WWW-Authenticate", header_value);
            }
        }

        response
    }
}
