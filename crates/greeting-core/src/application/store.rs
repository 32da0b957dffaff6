//! Storage seam for the singleton [`ConfigRecord`].
//!
//! The record is addressed by a fixed key, so a backend only needs one get
//! and one set.  Implementations must make `write` atomic: a concurrent
//! `read` sees either the previous record or the new one, never a mix.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ConfigRecord;

/// Failures reported by a [`RecordStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system operation failed.
    #[error("I/O error accessing record at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored bytes could not be decoded into a record.
    #[error("stored record at {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// The backend could not be reached or refused the operation.
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Get/set access to the single persisted record.
///
/// A `MockRecordStore` is generated for unit tests so use-case tests can
/// inject failures and assert that rejected writes never reach storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the stored record, or `Ok(None)` if nothing was ever written.
    async fn read(&self) -> Result<Option<ConfigRecord>, StoreError>;

    /// Replaces the stored record with `record`.
    async fn write(&self, record: &ConfigRecord) -> Result<(), StoreError>;
}
