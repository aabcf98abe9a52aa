//! Postgres-backed AQ store
//!
//! Every statement is parameterized. Rows map onto `AqRecord` by column
//! name, so a NULL column always lands as `None`.

use async_trait::async_trait;
use sqlx::PgPool;

use super::sql::{self, RecordQuery};
use super::store::{AqStore, StoreError};
use crate::models::{AqKey, AqRecord, ListQuery};

/// AQ store over a sqlx connection pool
#[derive(Clone)]
pub struct PgAqStore {
    pool: PgPool,
}

impl PgAqStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn write_query<'q>(statement: &'q str, record: &'q AqRecord) -> RecordQuery<'q> {
        let query = sqlx::query_as::<_, AqRecord>(statement).bind(&record.aq);
        sql::bind_writable(query, record)
    }
}

#[async_trait]
impl AqStore for PgAqStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<AqRecord>, StoreError> {
        let statement = sql::list_sql(query);
        let mut q = sqlx::query_as::<_, AqRecord>(&statement);
        if let Some(filter) = &query.filter {
            q = q.bind(sql::like_pattern(filter));
        }
        let rows = q
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(rows = rows.len(), filter = ?query.filter, "listed aq records");
        Ok(rows)
    }

    async fn get(&self, key: &AqKey) -> Result<AqRecord, StoreError> {
        sqlx::query_as::<_, AqRecord>(&sql::GET_SQL)
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found(key))
    }

    async fn create(&self, record: &AqRecord) -> Result<AqRecord, StoreError> {
        let created = Self::write_query(&sql::INSERT_SQL, record)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn update(&self, record: &AqRecord) -> Result<AqRecord, StoreError> {
        Self::write_query(&sql::UPDATE_SQL, record)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                resource: "aq",
                id: record.aq.clone(),
            })
    }

    async fn delete(&self, key: &AqKey) -> Result<u64, StoreError> {
        let result = sqlx::query(&sql::DELETE_SQL)
            .bind(key.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    // Integration tests - run with DB_URL set
    // cargo test -p aqctl-server -- --ignored

    const TEST_SCHEMA: &str = r#"
        CREATE SCHEMA IF NOT EXISTS mgl;
        CREATE TABLE IF NOT EXISTS mgl.aq (
            aq text PRIMARY KEY,
            signout_name text,
            prog_id integer,
            migratory_group text,
            cruise_id text,
            comments text,
            sample_types text,
            trip text,
            trip_location text,
            mgl_lead text,
            mgl_samplers text,
            chief_scientist text,
            target text,
            comments_collection_method text,
            vial_series text,
            comments_vial_series text,
            start_date timestamptz,
            end_date timestamptz,
            date_added timestamptz,
            date_updated timestamptz,
            chief_scientist_id bigint
        );
    "#;

    async fn store() -> PgAqStore {
        let url = std::env::var("DB_URL").expect("DB_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        sqlx::raw_sql(TEST_SCHEMA)
            .execute(&pool)
            .await
            .expect("schema setup failed");
        PgAqStore::new(pool)
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_get_round_trips_nulls() {
        let store = store().await;
        let key = AqKey::new("PGTEST-RT-1").unwrap();
        store.delete(&key).await.unwrap();

        let mut record = AqRecord::new(key.as_str());
        record.prog_id = Some(5);
        record.chief_scientist_id = Some(9_000_000_000);
        record.date_added = Some(chrono::Utc::now() - chrono::Duration::days(365));

        let created = store.create(&record).await.unwrap();
        let fetched = store.get(&key).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.prog_id, Some(5));
        assert_eq!(fetched.chief_scientist_id, Some(9_000_000_000));
        assert_eq!(fetched.comments, None);
        assert_ne!(fetched.date_added, record.date_added);
        assert!(fetched.date_updated.is_some());

        store.delete(&key).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_key_is_storage_error() {
        let store = store().await;
        let key = AqKey::new("PGTEST-DUP-1").unwrap();
        store.delete(&key).await.unwrap();

        let record = AqRecord::new(key.as_str());
        store.create(&record).await.unwrap();
        let err = store.create(&record).await.unwrap_err();
        assert!(matches!(err, StoreError::Sqlx(_)));

        store.delete(&key).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_key_is_not_found() {
        let store = store().await;
        let key = AqKey::new("PGTEST-MISSING").unwrap();
        assert!(matches!(
            store.get(&key).await.unwrap_err(),
            StoreError::NotFound { .. }
        ));
        assert_eq!(store.delete(&key).await.unwrap(), 0);
    }
}
