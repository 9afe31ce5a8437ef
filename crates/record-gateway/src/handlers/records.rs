//! Record handlers for the record gateway.
//!
//! Translates the REST API into record service RPCs:
//!
//! - `POST /record` - Create a record, returns its bearer token
//! - `GET /record/{id}` - Read a record (bearer token required)
//! - `PUT /record/{id}` - Replace name and age (bearer token required)
//!
//! Request bodies are deserialized manually so malformed JSON is a 400
//! rather than axum's default 422.

use crate::auth::extract_bearer_token;
use crate::errors::{GatewayError, INVALID_BEARER_MESSAGE, MISSING_BEARER_MESSAGE};
use crate::models::{CreateRecordResponseBody, RecordBody, UpdateRecordResponseBody};
use crate::routes::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use tracing::{debug, instrument};

// ============================================================================
// Handler: POST /record
// ============================================================================

/// Handler for POST /record
///
/// # Response
///
/// - 200 OK: `{record?, token, message}`
/// - 400 Bad Request: Malformed body or invalid record data
/// - 500 Internal Server Error: Record service failure
#[instrument(skip_all, name = "gw.records.create")]
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<CreateRecordResponseBody>, GatewayError> {
    let request = parse_body(&body)?;

    let response = state
        .client
        .create_record(request.into())
        .await
        .map_err(|status| GatewayError::from_rpc_status(&status, status.message()))?;

    Ok(Json(CreateRecordResponseBody {
        record: response.record.map(RecordBody::from),
        token: response.token,
        message: response.message,
    }))
}

// ============================================================================
// Handler: GET /record/{id}
// ============================================================================

/// Handler for GET /record/{id}
///
/// # Response
///
/// - 200 OK: `{id, first_name, last_name, age}`
/// - 400 Bad Request: Non-numeric id
/// - 401 Unauthorized: Missing or rejected bearer token
/// - 500 Internal Server Error: Unknown id or record service failure
#[instrument(skip_all, name = "gw.records.get")]
pub async fn get_record(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<RecordBody>, GatewayError> {
    let id = parse_id(&raw_id)?;
    let token = require_bearer(&headers)?;

    let response = state
        .client
        .get_record(id, token)
        .await
        .map_err(|status| GatewayError::from_rpc_status(&status, INVALID_BEARER_MESSAGE))?;

    let record = response.record.ok_or_else(|| {
        debug!(target: "gw.handlers.records", "Record service returned no record");
        GatewayError::Internal
    })?;

    Ok(Json(RecordBody::from(record)))
}

// ============================================================================
// Handler: PUT /record/{id}
// ============================================================================

/// Handler for PUT /record/{id}
///
/// The path id selects the record; an `id` in the body is ignored.
///
/// # Response
///
/// - 200 OK: `{record?, message}`
/// - 400 Bad Request: Non-numeric id, malformed body or invalid record data
/// - 401 Unauthorized: Missing or rejected bearer token
/// - 500 Internal Server Error: Unknown id or record service failure
#[instrument(skip_all, name = "gw.records.update")]
pub async fn update_record(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UpdateRecordResponseBody>, GatewayError> {
    let id = parse_id(&raw_id)?;
    let token = require_bearer(&headers)?;
    let request = parse_body(&body)?;

    let response = state
        .client
        .update_record(id, token, request.into())
        .await
        .map_err(|status| GatewayError::from_rpc_status(&status, INVALID_BEARER_MESSAGE))?;

    Ok(Json(UpdateRecordResponseBody {
        record: response.record.map(RecordBody::from),
        message: response.message,
    }))
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_id(raw_id: &str) -> Result<i64, GatewayError> {
    raw_id.parse().map_err(|e| {
        debug!(target: "gw.handlers.records", error = %e, "Invalid record id in path");
        GatewayError::BadRequest("Invalid record id".to_string())
    })
}

fn require_bearer(headers: &HeaderMap) -> Result<&str, GatewayError> {
    extract_bearer_token(headers).ok_or_else(|| {
        debug!(target: "gw.handlers.records", "Bearer token not provided");
        GatewayError::Unauthorized(MISSING_BEARER_MESSAGE.to_string())
    })
}

fn parse_body(body: &[u8]) -> Result<RecordBody, GatewayError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(target: "gw.handlers.records", error = %e, "Invalid request body");
        GatewayError::BadRequest("Error decoding JSON".to_string())
    })
}
