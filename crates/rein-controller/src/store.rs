//! Store collaborator boundary
//!
//! The handler persists mutated records through this trait. Optimistic
//! concurrency is the store's job: the handler supplies the record as it
//! read it and the desired replacement, and propagates whatever the store
//! answers without interpreting the failure kind.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use rein_types::ConfigRecord;
use thiserror::Error;

/// Errors answered by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("conflicting write for {namespace}/{name}: {reason}")]
    Conflict {
        namespace: String,
        name: String,
        reason: String,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Write access to the cluster record store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist `desired`, matching `expected` against the stored revision.
    async fn update(
        &self,
        namespace: &str,
        expected: &ConfigRecord,
        desired: &ConfigRecord,
    ) -> Result<(), StoreError>;
}

/// In-memory record store for tests and local development.
pub struct InMemoryRecordStore {
    records: DashMap<(String, String), ConfigRecord>,
    update_calls: AtomicU64,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            update_calls: AtomicU64::new(0),
        }
    }

    /// Seed a record, stamping no particular revision discipline.
    pub fn insert(&self, record: ConfigRecord) {
        self.records
            .insert((record.namespace.clone(), record.name.clone()), record);
    }

    /// Fetch a record by namespace and name.
    pub fn get(&self, namespace: &str, name: &str) -> Option<ConfigRecord> {
        self.records
            .get(&(namespace.to_string(), name.to_string()))
            .map(|r| r.clone())
    }

    /// How many updates were attempted against this store.
    pub fn update_calls(&self) -> u64 {
        self.update_calls.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn update(
        &self,
        namespace: &str,
        expected: &ConfigRecord,
        desired: &ConfigRecord,
    ) -> Result<(), StoreError> {
        self.update_calls.fetch_add(1, Ordering::Relaxed);

        let key = (namespace.to_string(), desired.name.clone());
        match self.records.get_mut(&key) {
            Some(mut current) => {
                if current.resource_version != expected.resource_version {
                    return Err(StoreError::Conflict {
                        namespace: namespace.to_string(),
                        name: desired.name.clone(),
                        reason: "resource version mismatch".to_string(),
                    });
                }
                *current = desired.clone();
                Ok(())
            }
            None => Err(StoreError::Conflict {
                namespace: namespace.to_string(),
                name: desired.name.clone(),
                reason: "record does not exist".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(version: &str) -> ConfigRecord {
        let mut r = ConfigRecord::new("default", "cfg");
        r.resource_version = version.to_string();
        r
    }

    #[tokio::test]
    async fn test_update_replaces_matching_record() {
        let store = InMemoryRecordStore::new();
        store.insert(record("1"));

        let mut desired = record("1");
        desired.data.insert("k".into(), "v".into());

        store.update("default", &record("1"), &desired).await.unwrap();

        assert_eq!(store.get("default", "cfg").unwrap().data["k"], "v");
        assert_eq!(store.update_calls(), 1);
    }

    #[tokio::test]
    async fn test_update_conflicts_on_stale_revision() {
        let store = InMemoryRecordStore::new();
        store.insert(record("2"));

        let err = store
            .update("default", &record("1"), &record("1"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_conflicts_on_missing_record() {
        let store = InMemoryRecordStore::new();
        let err = store
            .update("default", &record("1"), &record("1"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }
}
