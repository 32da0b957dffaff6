//! Domain layer for greeting-core.
//!
//! Contains the persisted record and the admin credential.  Nothing here
//! performs I/O, so every type can be tested without a runtime.

pub mod credential;
pub mod record;

pub use credential::{AdminCredential, CredentialError};
pub use record::{ConfigRecord, DEFAULT_BIRTHDAY_NAME, DEFAULT_WISHER_NAME};
