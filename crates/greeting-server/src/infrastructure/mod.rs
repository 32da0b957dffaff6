//! Infrastructure layer for greeting-server.
//!
//! Handles all I/O: the HTTP listener and the storage backends behind the
//! [`RecordStore`] seam.
//!
//! # Sub-modules
//!
//! - **`http`** – axum router for `GET`/`POST /config`, request and response
//!   bodies, and the mapping from use-case errors to status codes.
//! - **`server`** – binds the listener and serves the router until a shutdown
//!   signal arrives.
//! - **`memory_store`** – record kept in process memory.
//! - **`file_store`** – record kept as a JSON file, replaced atomically.

pub mod file_store;
pub mod http;
pub mod memory_store;
pub mod server;

use std::sync::Arc;

use greeting_core::RecordStore;
use tracing::info;

use crate::settings::{StorageBackend, StorageSettings};

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use server::{run_server, serve, shutdown_signal};

/// Builds the configured storage backend.
pub fn build_store(settings: &StorageSettings) -> Arc<dyn RecordStore> {
    match settings.backend {
        StorageBackend::Memory => {
            info!("using in-memory record store; names reset on restart");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::File => {
            let store = FileStore::new(&settings.data_dir, &settings.store_name, &settings.key);
            info!("using file record store at {}", store.path().display());
            Arc::new(store)
        }
    }
}
