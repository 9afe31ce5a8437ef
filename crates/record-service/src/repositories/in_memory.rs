//! In-memory record store.
//!
//! Used by the test harness and unit tests. Mirrors the PostgreSQL store's
//! contract: duplicate ids report zero rows, `save` never touches `token`.

use crate::errors::StoreError;
use crate::models::Record;
use crate::repositories::RecordStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Record store backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<i64, Record>>,
    writes: AtomicUsize,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful mutations (create + save).
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Insert a record directly, bypassing the service (test seeding).
    pub async fn insert(&self, record: Record) {
        self.records.write().await.insert(record.id, record);
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create(&self, record: &Record) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Ok(0);
        }
        records.insert(record.id, record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(1)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Record>, StoreError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn save(&self, record: &Record) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if let Some(existing) = records.get_mut(&record.id) {
            existing.first_name.clone_from(&record.first_name);
            existing.last_name.clone_from(&record.last_name);
            existing.age = record.age;
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Mock record stores for testing failure paths.
pub mod mock {

    use super::*;

    /// Store whose every operation fails, as if the database were down.
    #[derive(Default)]
    pub struct UnavailableRecordStore;

    #[async_trait::async_trait]
    impl RecordStore for UnavailableRecordStore {
        async fn create(&self, _record: &Record) -> Result<u64, StoreError> {
            Err(StoreError::Database("connection refused".to_string()))
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<Record>, StoreError> {
            Err(StoreError::Database("connection refused".to_string()))
        }

        async fn save(&self, _record: &Record) -> Result<(), StoreError> {
            Err(StoreError::Database("connection refused".to_string()))
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Err(StoreError::Database("connection refused".to_string()))
        }
    }

    /// Store that accepts inserts without persisting anything.
    #[derive(Default)]
    pub struct DiscardingRecordStore;

    #[async_trait::async_trait]
    impl RecordStore for DiscardingRecordStore {
        async fn create(&self, _record: &Record) -> Result<u64, StoreError> {
            Ok(0)
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<Record>, StoreError> {
            Ok(None)
        }

        async fn save(&self, _record: &Record) -> Result<(), StoreError> {
            Ok(())
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample(id: i64, token: &str) -> Record {
        Record {
            id,
            first_name: "Cool".to_string(),
            last_name: "Kid".to_string(),
            age: 10,
            token: token.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = InMemoryRecordStore::new();

        assert_eq!(store.create(&sample(1, "t")).await.unwrap(), 1);
        assert_eq!(store.find_by_id(1).await.unwrap(), Some(sample(1, "t")));
        assert_eq!(store.find_by_id(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_create_reports_zero_rows() {
        let store = InMemoryRecordStore::new();

        store.create(&sample(1, "first")).await.unwrap();
        assert_eq!(store.create(&sample(1, "second")).await.unwrap(), 0);
        assert_eq!(store.find_by_id(1).await.unwrap().unwrap().token, "first");
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_save_keeps_token() {
        let store = InMemoryRecordStore::new();
        store.create(&sample(1, "first")).await.unwrap();

        let mut changed = sample(1, "other");
        changed.age = 42;
        store.save(&changed).await.unwrap();

        let found = store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(found.age, 42);
        assert_eq!(found.token, "first");
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_everything() {
        let store = mock::UnavailableRecordStore;

        assert!(store.create(&sample(1, "t")).await.is_err());
        assert!(store.find_by_id(1).await.is_err());
        assert!(store.save(&sample(1, "t")).await.is_err());
        assert!(store.ping().await.is_err());
    }
}
