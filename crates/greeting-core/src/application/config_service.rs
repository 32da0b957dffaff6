//! ConfigService: the read and write use cases for the name pair.
//!
//! ```text
//! read()                      write(candidate, credential)
//!   │                           │
//!   ▼                           ▼
//! store.read()              credential.verify() ──✗──► Unauthorized
//!   │                           │ ✓
//!   ▼                           ▼
//! fallback() ──► record     store.write() ──✗──► Storage(StoreError)
//!                               │ ✓
//!                               ▼
//!                              Ok
//! ```
//!
//! The service adds no locking or retries; concurrent writes resolve to
//! whatever the backend does (last write wins for every bundled backend).

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::application::fallback::fallback;
use crate::application::store::{RecordStore, StoreError};
use crate::domain::{AdminCredential, ConfigRecord};

/// Reasons a write can be refused.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The supplied credential did not match.  Storage was not touched.
    #[error("invalid admin credential")]
    Unauthorized,

    /// The credential matched but the backend failed to persist the record.
    #[error("failed to persist config record: {0}")]
    Storage(#[from] StoreError),
}

/// Read/write access to the config record, gated by the admin credential.
pub struct ConfigService {
    store: Arc<dyn RecordStore>,
    credential: AdminCredential,
}

impl ConfigService {
    /// Creates a service over `store`, accepting writes that present
    /// `credential`.
    pub fn new(store: Arc<dyn RecordStore>, credential: AdminCredential) -> Self {
        Self { store, credential }
    }

    /// Returns the current record, or the default pair if none was written
    /// or the store could not be read.
    pub async fn read(&self) -> ConfigRecord {
        let result = self.store.read().await;

        match &result {
            Ok(Some(_)) => debug!("serving stored config record"),
            Ok(None) => debug!("no config record written yet; serving default names"),
            Err(e) => warn!("config store read failed, serving default names: {e}"),
        }

        fallback(result)
    }

    /// Replaces the stored record with `candidate` if `credential` matches.
    ///
    /// # Errors
    ///
    /// - [`WriteError::Unauthorized`] if `credential` is wrong.  The store is
    ///   not called.
    /// - [`WriteError::Storage`] if the backend write fails.
    pub async fn write(&self, candidate: ConfigRecord, credential: &str) -> Result<(), WriteError> {
        if !self.credential.verify(credential) {
            warn!("rejected config write: invalid admin credential");
            return Err(WriteError::Unauthorized);
        }

        if let Err(e) = self.store.write(&candidate).await {
            error!("config store write failed: {e}");
            return Err(WriteError::Storage(e));
        }

        info!("config record updated");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::store::MockRecordStore;

    fn service_with(store: MockRecordStore) -> ConfigService {
        ConfigService::new(Arc::new(store), AdminCredential::new("Akilan").unwrap())
    }

    // ── read ──────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_read_returns_stored_record() {
        // Arrange
        let mut store = MockRecordStore::new();
        store
            .expect_read()
            .times(1)
            .returning(|| Ok(Some(ConfigRecord::new("Sam", "Lee"))));
        let service = service_with(store);

        // Act
        let record = service.read().await;

        // Assert
        assert_eq!(record, ConfigRecord::new("Sam", "Lee"));
    }

    #[tokio::test]
    async fn test_read_on_untouched_store_returns_default_pair() {
        let mut store = MockRecordStore::new();
        store.expect_read().returning(|| Ok(None));
        let service = service_with(store);

        let record = service.read().await;

        assert_eq!(record.birthday_name, "Nanba");
        assert_eq!(record.wisher_name, "Akil");
    }

    #[tokio::test]
    async fn test_read_failure_is_swallowed_into_default_pair() {
        let mut store = MockRecordStore::new();
        store
            .expect_read()
            .returning(|| Err(StoreError::Unavailable("timed out".to_string())));
        let service = service_with(store);

        let record = service.read().await;

        assert_eq!(record, ConfigRecord::default());
    }

    // ── write ─────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_write_with_valid_credential_persists_candidate() {
        // Arrange
        let mut store = MockRecordStore::new();
        store
            .expect_write()
            .withf(|record| record == &ConfigRecord::new("Sam", "Lee"))
            .times(1)
            .returning(|_| Ok(()));
        let service = service_with(store);

        // Act
        let result = service.write(ConfigRecord::new("Sam", "Lee"), "Akilan").await;

        // Assert
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_write_with_wrong_credential_never_reaches_store() {
        // Arrange: any call to write would violate times(0)
        let mut store = MockRecordStore::new();
        store.expect_write().times(0);
        let service = service_with(store);

        // Act
        let result = service.write(ConfigRecord::new("Sam", "Lee"), "wrong").await;

        // Assert
        assert!(matches!(result, Err(WriteError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_write_with_wrong_case_credential_is_unauthorized() {
        let mut store = MockRecordStore::new();
        store.expect_write().times(0);
        let service = service_with(store);

        let result = service.write(ConfigRecord::new("Sam", "Lee"), "akilan").await;

        assert!(matches!(result, Err(WriteError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_write_storage_failure_is_reported() {
        let mut store = MockRecordStore::new();
        store
            .expect_write()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("disk full".to_string())));
        let service = service_with(store);

        let result = service.write(ConfigRecord::new("Sam", "Lee"), "Akilan").await;

        match result {
            Err(WriteError::Storage(StoreError::Unavailable(reason))) => {
                assert_eq!(reason, "disk full");
            }
            other => panic!("expected storage failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_write_accepts_empty_names() {
        let mut store = MockRecordStore::new();
        store
            .expect_write()
            .withf(|record| record.birthday_name.is_empty() && record.wisher_name.is_empty())
            .times(1)
            .returning(|_| Ok(()));
        let service = service_with(store);

        let result = service.write(ConfigRecord::new("", ""), "Akilan").await;

        assert!(result.is_ok());
    }
}
