//! Repository layer for the record service.
//!
//! The service talks to persistence only through the `RecordStore` trait:
//!
//! - `create` reports rows affected, so "nothing written" is distinguishable
//!   from a store failure
//! - `find_by_id` reports absence explicitly with `None`
//! - `save` overwrites the mutable fields of an existing record

pub mod in_memory;
pub mod records;

pub use in_memory::InMemoryRecordStore;
pub use records::PgRecordStore;

use crate::errors::StoreError;
use crate::models::Record;

/// Persistence contract for records.
///
/// Implementations must be safe for concurrent use by in-flight requests.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new record. Returns the number of rows written (0 or 1).
    async fn create(&self, record: &Record) -> Result<u64, StoreError>;

    /// Look up a record by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Record>, StoreError>;

    /// Persist the mutable fields of an existing record.
    async fn save(&self, record: &Record) -> Result<(), StoreError>;

    /// Check store connectivity (readiness probe).
    async fn ping(&self) -> Result<(), StoreError>;
}
