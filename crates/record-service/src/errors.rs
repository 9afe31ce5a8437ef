//! Record service error types.
//!
//! `RecordError` is the domain error returned by the service layer. It maps
//! onto gRPC status codes via `From<RecordError> for tonic::Status`. Store
//! failures are logged server-side and reported to callers with a generic
//! message.

use thiserror::Error;
use tonic::Status;

/// Client-visible message for invalid record payloads.
pub const INVALID_RECORD_MESSAGE: &str = "Invalid record data";

/// Client-visible message for token mismatches.
pub const UNAUTHENTICATED_MESSAGE: &str = "Unauthenticated";

/// Client-visible message for unknown record ids.
pub const NOT_FOUND_MESSAGE: &str = "record not found";

/// Client-visible message when the store accepted a write but persisted nothing.
pub const NOT_PERSISTED_MESSAGE: &str = "cannot create record successfully";

/// Store error type, returned by `RecordStore` implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
}

/// Record service domain error.
///
/// Maps to gRPC status codes:
/// - InvalidRecord: INVALID_ARGUMENT
/// - Unauthenticated: UNAUTHENTICATED
/// - NotFound, NotPersisted: UNKNOWN
/// - Store, Internal: INTERNAL
#[derive(Debug, Error)]
pub enum RecordError {
    /// Missing payload, empty first/last name, or non-positive age.
    #[error("Invalid record data")]
    InvalidRecord,

    /// No record exists for the requested id.
    #[error("Record not found")]
    NotFound,

    /// Supplied token does not match the stored token.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// The store reported success but zero rows were written.
    #[error("Record was not persisted")]
    NotPersisted,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecordError {
    /// Bounded label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RecordError::InvalidRecord => "invalid_argument",
            RecordError::NotFound => "not_found",
            RecordError::Unauthenticated => "unauthenticated",
            RecordError::NotPersisted => "not_persisted",
            RecordError::Store(_) => "store",
            RecordError::Internal(_) => "internal",
        }
    }
}

impl From<RecordError> for Status {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::InvalidRecord => Status::invalid_argument(INVALID_RECORD_MESSAGE),
            RecordError::Unauthenticated => Status::unauthenticated(UNAUTHENTICATED_MESSAGE),
            RecordError::NotFound => Status::unknown(NOT_FOUND_MESSAGE),
            RecordError::NotPersisted => Status::unknown(NOT_PERSISTED_MESSAGE),
            RecordError::Store(e) => {
                // Log actual error server-side, return generic message to client
                tracing::error!(target: "rs.store", error = %e, "Store operation failed");
                Status::internal("An internal store error occurred")
            }
            RecordError::Internal(reason) => {
                tracing::error!(target: "rs.internal", reason = %reason, "Internal error");
                Status::internal("An internal error occurred")
            }
        }
    }
}
