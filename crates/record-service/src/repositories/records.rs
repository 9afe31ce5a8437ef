//! PostgreSQL record store.
//!
//! # Security
//!
//! - All queries use parameterized statements (SQL injection safe)
//! - Tokens are never logged

use crate::errors::StoreError;
use crate::models::Record;
use crate::observability::metrics;
use crate::repositories::RecordStore;
use sqlx::PgPool;
use std::time::Instant;
use tracing::instrument;

/// Record store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Create a new store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl RecordStore for PgRecordStore {
    /// Insert a record.
    ///
    /// An existing record with the same id is left untouched and reported as
    /// zero rows affected.
    #[instrument(skip_all, name = "rs.repo.create", fields(record_id = record.id))]
    async fn create(&self, record: &Record) -> Result<u64, StoreError> {
        let start = Instant::now();

        let result = sqlx::query(
            r#"
            INSERT INTO records (id, first_name, last_name, age, token)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(record.id) // $1
        .bind(&record.first_name) // $2
        .bind(&record.last_name) // $3
        .bind(record.age) // $4
        .bind(&record.token) // $5
        .execute(&self.pool)
        .await
        .map_err(|e| {
            metrics::record_db_query("create", "error", start.elapsed());
            StoreError::Database(format!("Failed to create record: {}", e))
        })?;

        metrics::record_db_query("create", "success", start.elapsed());

        Ok(result.rows_affected())
    }

    #[instrument(skip_all, name = "rs.repo.find_by_id", fields(record_id = id))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Record>, StoreError> {
        let start = Instant::now();

        let record = sqlx::query_as::<_, Record>(
            r#"
            SELECT id, first_name, last_name, age, token
            FROM records
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            metrics::record_db_query("find_by_id", "error", start.elapsed());
            StoreError::Database(format!("Failed to fetch record by id: {}", e))
        })?;

        metrics::record_db_query("find_by_id", "success", start.elapsed());

        Ok(record)
    }

    /// Overwrite first_name, last_name and age. `id` and `token` are never
    /// written by this statement.
    #[instrument(skip_all, name = "rs.repo.save", fields(record_id = record.id))]
    async fn save(&self, record: &Record) -> Result<(), StoreError> {
        let start = Instant::now();

        sqlx::query(
            r#"
            UPDATE records
            SET first_name = $2, last_name = $3, age = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(record.id) // $1
        .bind(&record.first_name) // $2
        .bind(&record.last_name) // $3
        .bind(record.age) // $4
        .execute(&self.pool)
        .await
        .map_err(|e| {
            metrics::record_db_query("save", "error", start.elapsed());
            StoreError::Database(format!("Failed to save record: {}", e))
        })?;

        metrics::record_db_query("save", "success", start.elapsed());

        Ok(())
    }

    #[instrument(skip_all, name = "rs.repo.ping")]
    async fn ping(&self) -> Result<(), StoreError> {
        let start = Instant::now();

        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                metrics::record_db_query("ping", "error", start.elapsed());
                StoreError::Database(format!("Failed to ping database: {}", e))
            })?;

        metrics::record_db_query("ping", "success", start.elapsed());

        Ok(())
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

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn test_create_then_find(pool: PgPool) -> Result<(), anyhow::Error> {
        let store = PgRecordStore::new(pool);

        let rows = store.create(&sample(1, "tok-1")).await?;
        assert_eq!(rows, 1);

        let found = store.find_by_id(1).await?.expect("record should exist");
        assert_eq!(found, sample(1, "tok-1"));

        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn test_duplicate_create_reports_zero_rows(pool: PgPool) -> Result<(), anyhow::Error> {
        let store = PgRecordStore::new(pool);

        store.create(&sample(1, "tok-1")).await?;
        let rows = store.create(&sample(1, "tok-2")).await?;
        assert_eq!(rows, 0);

        // Original token is untouched
        let found = store.find_by_id(1).await?.unwrap();
        assert_eq!(found.token, "tok-1");

        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn test_find_missing_returns_none(pool: PgPool) -> Result<(), anyhow::Error> {
        let store = PgRecordStore::new(pool);
        assert!(store.find_by_id(42).await?.is_none());
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn test_save_never_rewrites_token(pool: PgPool) -> Result<(), anyhow::Error> {
        let store = PgRecordStore::new(pool);
        store.create(&sample(1, "tok-1")).await?;

        let mut changed = sample(1, "attacker-token");
        changed.first_name = "Older".to_string();
        changed.age = 11;
        store.save(&changed).await?;

        let found = store.find_by_id(1).await?.unwrap();
        assert_eq!(found.first_name, "Older");
        assert_eq!(found.age, 11);
        assert_eq!(found.token, "tok-1");

        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn test_ping_reports_closed_pool(pool: PgPool) -> Result<(), anyhow::Error> {
        let store = PgRecordStore::new(pool.clone());
        store.ping().await?;

        pool.close().await;
        let err = store.ping().await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));

        Ok(())
    }
}
