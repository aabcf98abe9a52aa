//! In-memory AQ store
//!
//! Same observable semantics as `PgAqStore`: key ordering, literal
//! case-insensitive substring filter, server-assigned timestamps, and
//! duplicate keys rejected as a storage error.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::sql;
use super::store::{AqStore, StoreError};
use crate::models::{AqKey, AqRecord, ListQuery};

/// AQ store backed by an ordered map
#[derive(Default)]
pub struct MemoryAqStore {
    records: RwLock<BTreeMap<String, AqRecord>>,
}

impl MemoryAqStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl AqStore for MemoryAqStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<AqRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| query.matches(&r.aq))
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn get(&self, key: &AqKey) -> Result<AqRecord, StoreError> {
        self.records
            .read()
            .await
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| StoreError::not_found(key))
    }

    async fn create(&self, record: &AqRecord) -> Result<AqRecord, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.aq) {
            return Err(StoreError::Constraint(format!(
                "duplicate key value violates unique constraint: aq '{}'",
                record.aq
            )));
        }

        let now = Utc::now();
        let mut stored = AqRecord::new(record.aq.clone());
        sql::copy_writable(&mut stored, record);
        stored.date_added = Some(now);
        stored.date_updated = Some(now);

        records.insert(stored.aq.clone(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, record: &AqRecord) -> Result<AqRecord, StoreError> {
        let mut records = self.records.write().await;
        let stored = records.get_mut(&record.aq).ok_or_else(|| StoreError::NotFound {
            resource: "aq",
            id: record.aq.clone(),
        })?;

        sql::copy_writable(stored, record);
        // Never move backwards, even if the wall clock does
        let now = Utc::now();
        stored.date_updated = Some(stored.date_updated.map_or(now, |prev| prev.max(now)));
        Ok(stored.clone())
    }

    async fn delete(&self, key: &AqKey) -> Result<u64, StoreError> {
        let removed = self.records.write().await.remove(key.as_str());
        Ok(u64::from(removed.is_some()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> AqKey {
        AqKey::new(s).unwrap()
    }

    async fn seeded(keys: &[&str]) -> MemoryAqStore {
        let store = MemoryAqStore::new();
        for k in keys {
            store.create(&AqRecord::new(*k)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn list_orders_by_key_and_paginates() {
        let store = seeded(&["C", "A", "E", "B", "D"]).await;

        let all = store.list(&ListQuery::default()).await.unwrap();
        let keys: Vec<_> = all.iter().map(|r| r.aq.as_str()).collect();
        assert_eq!(keys, ["A", "B", "C", "D", "E"]);

        let page = store.list(&ListQuery::new(None, 2, 1)).await.unwrap();
        let keys: Vec<_> = page.iter().map(|r| r.aq.as_str()).collect();
        assert_eq!(keys, ["B", "C"]);

        let past_end = store.list(&ListQuery::new(None, 20, 10)).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn filter_is_literal_substring() {
        let store = seeded(&["GOM-001", "gom-002", "ATL-GoM", "ATL-001", "50%_OFF"]).await;

        let hits = store
            .list(&ListQuery::new(Some("GOM".into()), 20, 0))
            .await
            .unwrap();
        let keys: Vec<_> = hits.iter().map(|r| r.aq.as_str()).collect();
        assert_eq!(keys, ["ATL-GoM", "GOM-001", "gom-002"]);

        let hits = store
            .list(&ListQuery::new(Some("%_".into()), 20, 0))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].aq, "50%_OFF");
    }

    #[tokio::test]
    async fn create_assigns_timestamps_and_ignores_client_values() {
        let store = MemoryAqStore::new();
        let mut record = AqRecord::new("X1");
        record.prog_id = Some(5);
        record.date_added = Some(Utc::now() - chrono::Duration::days(30));
        record.date_updated = Some(Utc::now() - chrono::Duration::days(30));

        let before = Utc::now();
        let created = store.create(&record).await.unwrap();
        assert!(created.date_added.unwrap() >= before);
        assert_eq!(created.date_added, created.date_updated);
        assert_eq!(created.prog_id, Some(5));
        assert_eq!(created.comments, None);

        let fetched = store.get(&key("X1")).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn duplicate_create_is_constraint_error() {
        let store = seeded(&["X1"]).await;
        let err = store.create(&AqRecord::new("X1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_date_added() {
        let store = MemoryAqStore::new();
        let mut record = AqRecord::new("X1");
        record.comments = Some("first".into());
        record.trip = Some("T-9".into());
        let created = store.create(&record).await.unwrap();

        let mut replacement = AqRecord::new("X1");
        replacement.comments = Some("second".into());
        replacement.date_added = Some(Utc::now() + chrono::Duration::days(1));

        let updated = store.update(&replacement).await.unwrap();
        assert_eq!(updated.comments.as_deref(), Some("second"));
        assert_eq!(updated.trip, None);
        assert_eq!(updated.date_added, created.date_added);
        assert!(updated.date_updated >= created.date_updated);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let store = MemoryAqStore::new();
        let err = store.update(&AqRecord::new("nope")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { resource: "aq", .. }));
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store = MemoryAqStore::new();
        let err = store.get(&key("nope")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = seeded(&["X1"]).await;
        assert_eq!(store.delete(&key("X1")).await.unwrap(), 1);
        assert_eq!(store.delete(&key("X1")).await.unwrap(), 0);
        assert!(store.is_empty().await);
    }
}
