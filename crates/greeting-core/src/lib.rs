//! greeting-core library crate.
//!
//! Shared domain types and the application use case for the greeting page's
//! remote configuration store: a single record holding two display names
//! (the birthday person and the person sending the wishes).
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! greeting-core
//!   ├── domain/        ConfigRecord, AdminCredential
//!   └── application/   RecordStore trait (storage seam), read fallback policy,
//!                      ConfigService
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async code.
//! - `application` depends on `domain` and defines the [`RecordStore`] trait
//!   that infrastructure crates implement (in-memory map, JSON file, ...).
//!
//! The HTTP surface and the concrete backends live in `greeting-server`.

/// Domain layer: pure types with no I/O.
pub mod domain;

/// Application layer: storage seam and the read/write use case.
pub mod application;

pub use application::{ConfigService, RecordStore, StoreError, WriteError};
pub use domain::{AdminCredential, ConfigRecord, CredentialError};
