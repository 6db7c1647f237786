//! In-memory record store

use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError, Record, RecordStore,
};

/// A record store backed by a `HashMap` behind an async `RwLock`
pub struct InMemoryStore<R: Record> {
    name: String,
    records: RwLock<HashMap<R::Id, R>>,
}

impl<R: Record> InMemoryStore<R> {
    /// Creates an empty store; `name` identifies it in health checks
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a store pre-populated with `records`
    pub fn with_records(name: impl Into<String>, records: Vec<R>) -> Self {
        let map = records
            .into_iter()
            .map(|record| (record.record_id(), record))
            .collect();
        Self {
            name: name.into(),
            records: RwLock::new(map),
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<R: Record> fmt::Debug for InMemoryStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("name", &self.name)
            .field("entity", &R::ENTITY)
            .finish()
    }
}

impl<R: Record> DomainPort for InMemoryStore<R> {}

#[async_trait]
impl<R: Record> HealthCheckable for InMemoryStore<R> {
    async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let count = self.records.read().await.len();

        HealthCheckResult {
            adapter_id: format!("memory-{}", self.name),
            status: AdapterHealth::Healthy,
            latency_ms: started.elapsed().as_millis() as u64,
            message: Some(format!("{} {} record(s)", count, R::ENTITY)),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for InMemoryStore<R> {
    #[instrument(skip(self, record), fields(store = %self.name, id = %record.record_id()))]
    async fn put(&self, record: R) -> Result<(), PortError> {
        debug!("Storing record");
        self.records.write().await.insert(record.record_id(), record);
        Ok(())
    }

    #[instrument(skip(self), fields(store = %self.name, id = %id))]
    async fn get(&self, id: R::Id) -> Result<R, PortError> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found(R::ENTITY, id))
    }

    #[instrument(skip(self), fields(store = %self.name, id = %id))]
    async fn delete(&self, id: R::Id) -> Result<(), PortError> {
        debug!("Deleting record");
        self.records
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found(R::ENTITY, id))
    }

    async fn list_all(&self) -> Result<Vec<R>, PortError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    #[instrument(skip(self), fields(store = %self.name))]
    async fn clear(&self) -> Result<(), PortError> {
        let mut records = self.records.write().await;
        debug!(removed = records.len(), "Clearing store");
        records.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: u32,
        text: String,
    }

    impl Record for Note {
        type Id = u32;
        const ENTITY: &'static str = "Note";

        fn record_id(&self) -> u32 {
            self.id
        }
    }

    fn note(id: u32, text: &str) -> Note {
        Note {
            id,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryStore::new("notes");
        store.put(note(1, "first")).await.unwrap();

        assert_eq!(store.get(1).await.unwrap(), note(1, "first"));
    }

    #[tokio::test]
    async fn test_put_replaces_existing() {
        let store = InMemoryStore::new("notes");
        store.put(note(1, "first")).await.unwrap();
        store.put(note(1, "second")).await.unwrap();

        assert_eq!(store.get(1).await.unwrap().text, "second");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store: InMemoryStore<Note> = InMemoryStore::new("notes");
        let err = store.get(7).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Note"));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryStore::with_records("notes", vec![note(1, "a"), note(2, "b")]);
        store.delete(1).await.unwrap();

        assert!(store.get(1).await.unwrap_err().is_not_found());
        assert!(store.delete(1).await.unwrap_err().is_not_found());
        assert_eq!(store.list_all().await.unwrap(), vec![note(2, "b")]);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = InMemoryStore::with_records("notes", vec![note(1, "a"), note(2, "b")]);
        store.clear().await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let store: Arc<dyn RecordStore<Note>> = Arc::new(InMemoryStore::new("notes"));
        store.put(note(3, "c")).await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);

        let health = store.health_check().await;
        assert_eq!(health.status, AdapterHealth::Healthy);
        assert_eq!(health.adapter_id, "memory-notes");
    }
}
