//! Application layer for greeting-core.
//!
//! The application layer knows *what* happens on a read or a write; the
//! storage backends that decide *how* the record is kept live in the
//! infrastructure layer of `greeting-server`.
//!
//! # Responsibilities
//!
//! - Defining the [`RecordStore`] seam and its [`StoreError`] type
//! - Resolving read outcomes through the [`fallback`] policy
//! - Checking the admin credential before any write reaches storage
//!
//! # What does NOT belong here?
//!
//! - HTTP status codes or JSON bodies (that is the server's HTTP module)
//! - File paths, sockets, or environment variables

pub mod config_service;
pub mod fallback;
pub mod store;

pub use config_service::{ConfigService, WriteError};
pub use fallback::fallback;
pub use store::{RecordStore, StoreError};
