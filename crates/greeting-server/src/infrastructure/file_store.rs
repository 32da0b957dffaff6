//! JSON-file [`RecordStore`].
//!
//! Mirrors a blob key-value service on the local file system: a record named
//! `key` in store `store_name` lives at
//!
//! ```text
//! <data_dir>/<store_name>/<key>.json
//! ```
//!
//! The default layout is `data/birthday-config/names.json`.
//!
//! # Atomic replacement
//!
//! Writes go to a uniquely named temporary file in the same directory, which
//! is then renamed over the target.  A rename within one directory replaces
//! the file in a single step, so a concurrent read sees either the old record
//! or the new one and the last rename wins.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use greeting_core::{ConfigRecord, RecordStore, StoreError};
use tracing::debug;
use uuid::Uuid;

/// Record store kept as a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    path: PathBuf,
}

impl FileStore {
    /// Creates a store for `<data_dir>/<store_name>/<key>.json`.
    ///
    /// Nothing is created on disk until the first write.
    pub fn new(data_dir: impl AsRef<Path>, store_name: &str, key: &str) -> Self {
        let dir = data_dir.as_ref().join(store_name);
        let path = dir.join(format!("{key}.json"));
        Self { dir, path }
    }

    /// Full path of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn read(&self) -> Result<Option<ConfigRecord>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::io_error(&self.path)(e)),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }

    async fn write(&self, record: &ConfigRecord) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(Self::io_error(&self.dir))?;

        let content = serde_json::to_vec_pretty(record)
            .map_err(|e| StoreError::Unavailable(format!("failed to encode record: {e}")))?;

        let tmp = self.dir.join(format!(".{}.tmp", Uuid::new_v4()));
        tokio::fs::write(&tmp, &content)
            .await
            .map_err(Self::io_error(&tmp))?;

        if let Err(source) = tokio::fs::rename(&tmp, &self.path).await {
            // Best effort: the temp file is garbage either way.
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::Io {
                path: self.path.clone(),
                source,
            });
        }

        debug!("wrote config record to {}", self.path.display());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_data_dir() -> PathBuf {
        std::env::temp_dir().join(format!("greeting_store_{}", Uuid::new_v4()))
    }

    #[test]
    fn test_path_follows_store_and_key_layout() {
        let store = FileStore::new("/srv/data", "birthday-config", "names");
        assert_eq!(
            store.path(),
            Path::new("/srv/data/birthday-config/names.json")
        );
    }

    #[tokio::test]
    async fn test_read_before_any_write_is_none() {
        // Arrange: the data directory does not even exist yet
        let data_dir = temp_data_dir();
        let store = FileStore::new(&data_dir, "birthday-config", "names");

        // Act
        let result = store.read().await;

        // Assert
        assert_eq!(result.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_creates_directories_and_round_trips() {
        // Arrange
        let data_dir = temp_data_dir();
        let store = FileStore::new(&data_dir, "birthday-config", "names");

        // Act
        store.write(&ConfigRecord::new("Sam", "Lee")).await.unwrap();
        let read_back = store.read().await.unwrap();

        // Assert
        assert_eq!(read_back, Some(ConfigRecord::new("Sam", "Lee")));
        assert!(store.path().exists());

        std::fs::remove_dir_all(&data_dir).ok();
    }

    #[tokio::test]
    async fn test_file_holds_camel_case_json() {
        let data_dir = temp_data_dir();
        let store = FileStore::new(&data_dir, "birthday-config", "names");

        store.write(&ConfigRecord::new("Sam", "Lee")).await.unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json["birthdayName"], "Sam");
        assert_eq!(json["wisherName"], "Lee");
        std::fs::remove_dir_all(&data_dir).ok();
    }

    #[tokio::test]
    async fn test_record_survives_new_store_instance() {
        // Arrange: simulate a restart by opening a second store on the same dir
        let data_dir = temp_data_dir();
        FileStore::new(&data_dir, "birthday-config", "names")
            .write(&ConfigRecord::new("Priya", "Ravi"))
            .await
            .unwrap();

        // Act
        let reopened = FileStore::new(&data_dir, "birthday-config", "names");
        let record = reopened.read().await.unwrap();

        // Assert
        assert_eq!(record, Some(ConfigRecord::new("Priya", "Ravi")));
        std::fs::remove_dir_all(&data_dir).ok();
    }

    #[tokio::test]
    async fn test_overwrite_leaves_no_temp_files() {
        let data_dir = temp_data_dir();
        let store = FileStore::new(&data_dir, "birthday-config", "names");

        store.write(&ConfigRecord::new("A", "B")).await.unwrap();
        store.write(&ConfigRecord::new("C", "D")).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(data_dir.join("birthday-config"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("names.json")]);
        assert_eq!(
            store.read().await.unwrap(),
            Some(ConfigRecord::new("C", "D"))
        );
        std::fs::remove_dir_all(&data_dir).ok();
    }

    #[tokio::test]
    async fn test_malformed_file_is_corrupt_error() {
        // Arrange
        let data_dir = temp_data_dir();
        let store = FileStore::new(&data_dir, "birthday-config", "names");
        std::fs::create_dir_all(data_dir.join("birthday-config")).unwrap();
        std::fs::write(store.path(), "{ not json").unwrap();

        // Act
        let result = store.read().await;

        // Assert
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
        std::fs::remove_dir_all(&data_dir).ok();
    }

    #[tokio::test]
    async fn test_separate_keys_do_not_collide() {
        let data_dir = temp_data_dir();
        let names = FileStore::new(&data_dir, "birthday-config", "names");
        let other = FileStore::new(&data_dir, "birthday-config", "staging");

        names.write(&ConfigRecord::new("Sam", "Lee")).await.unwrap();

        assert_eq!(other.read().await.unwrap(), None);
        std::fs::remove_dir_all(&data_dir).ok();
    }
}
