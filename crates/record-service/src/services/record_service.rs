//! Record service business logic.
//!
//! Owns the request-handling contracts:
//!
//! - Create: validate, issue a token, persist
//! - Get: look up, then authorize the supplied token
//! - Update: validate, look up, authorize, apply name/age, persist
//!
//! Validation always precedes the lookup. Authorization needs the stored
//! token, so it is always a post-lookup check; "not found" and "token
//! mismatch" stay distinct errors.
//!
//! The service holds no cached state; every call re-reads from the store.

use crate::crypto;
use crate::errors::RecordError;
use crate::models::{Record, RecordInput};
use crate::repositories::RecordStore;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Confirmation message returned by a successful create.
pub const CREATED_MESSAGE: &str = "Created user successfully";

/// Confirmation message returned by a successful update.
pub const UPDATED_MESSAGE: &str = "User successfully updated";

/// Record service over a shared store.
#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
}

impl RecordService {
    /// Create a new record service.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Check that the backing store is reachable.
    pub async fn is_ready(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(target: "rs.services.records", error = %e, "Store ping failed");
                false
            }
        }
    }

    /// Create a record and issue its token.
    ///
    /// # Errors
    ///
    /// - `InvalidRecord` - empty name or non-positive age (nothing is written)
    /// - `Store` - store failure
    /// - `NotPersisted` - store wrote zero rows (e.g. the id already exists)
    #[instrument(skip_all, name = "rs.records.create", fields(record_id = input.id))]
    pub async fn create(&self, input: RecordInput) -> Result<Record, RecordError> {
        input.validate()?;

        let token = crypto::generate_token()?;
        let record = input.into_record(token);

        let rows_affected = self.store.create(&record).await?;
        if rows_affected == 0 {
            warn!(
                target: "rs.services.records",
                record_id = record.id,
                "Store reported zero rows affected on create"
            );
            return Err(RecordError::NotPersisted);
        }

        info!(target: "rs.services.records", record_id = record.id, "Record created");

        Ok(record)
    }

    /// Fetch a record, proving ownership with its token.
    ///
    /// # Errors
    ///
    /// - `NotFound` - no record for `id`
    /// - `Unauthenticated` - `token` does not match the stored token
    /// - `Store` - store failure
    #[instrument(skip_all, name = "rs.records.get", fields(record_id = id))]
    pub async fn get(&self, id: i64, token: &str) -> Result<Record, RecordError> {
        self.find_authorized(id, token).await
    }

    /// Update a record's names and age, proving ownership with its token.
    ///
    /// `id` and `token` are never changed.
    ///
    /// # Errors
    ///
    /// - `InvalidRecord` - empty name or non-positive age (nothing is written)
    /// - `NotFound` - no record for `id`
    /// - `Unauthenticated` - `token` does not match the stored token
    /// - `Store` - store failure
    #[instrument(skip_all, name = "rs.records.update", fields(record_id = id))]
    pub async fn update(
        &self,
        id: i64,
        token: &str,
        input: RecordInput,
    ) -> Result<Record, RecordError> {
        input.validate()?;

        let mut record = self.find_authorized(id, token).await?;

        // Read-modify-write without a concurrency guard: concurrent updates
        // to the same id are last-writer-wins.
        input.apply_to(&mut record);
        self.store.save(&record).await?;

        info!(target: "rs.services.records", record_id = id, "Record updated");

        Ok(record)
    }

    async fn find_authorized(&self, id: i64, token: &str) -> Result<Record, RecordError> {
        let record = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(RecordError::NotFound)?;

        if !crypto::tokens_match(&record.token, token) {
            warn!(target: "rs.services.records", record_id = id, "Token mismatch");
            return Err(RecordError::Unauthenticated);
        }

        Ok(record)
    }
}
