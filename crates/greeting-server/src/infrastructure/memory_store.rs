//! In-memory [`RecordStore`].
//!
//! Holds the record behind a `tokio::sync::RwLock`.  Concurrent writes are
//! serialized by the lock, so the last writer wins.  Nothing survives a
//! restart; use [`FileStore`](super::FileStore) for durable storage.

use async_trait::async_trait;
use greeting_core::{ConfigRecord, RecordStore, StoreError};
use tokio::sync::RwLock;

/// Record store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: RwLock<Option<ConfigRecord>>,
}

impl MemoryStore {
    /// Creates an empty store (reads resolve to the default pair).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `record`.
    pub fn with_record(record: ConfigRecord) -> Self {
        Self {
            record: RwLock::new(Some(record)),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn read(&self) -> Result<Option<ConfigRecord>, StoreError> {
        Ok(self.record.read().await.clone())
    }

    async fn write(&self, record: &ConfigRecord) -> Result<(), StoreError> {
        *self.record.write().await = Some(record.clone());
        Ok(())
    }
}
