//! Read fallback policy.
//!
//! A read never fails from the caller's point of view: an absent record and
//! an unreadable backing store both resolve to [`ConfigRecord::default`].
//! Keeping the policy as a pure function lets it be tested without a store.

use crate::application::store::StoreError;
use crate::domain::ConfigRecord;

/// Resolves the outcome of a storage read into the record to display.
///
/// | Storage outcome  | Result                      |
/// |------------------|-----------------------------|
/// | `Ok(Some(r))`    | `r`                         |
/// | `Ok(None)`       | [`ConfigRecord::default`]   |
/// | `Err(_)`         | [`ConfigRecord::default`]   |
pub fn fallback(result: Result<Option<ConfigRecord>, StoreError>) -> ConfigRecord {
    match result {
        Ok(Some(record)) => record,
        Ok(None) | Err(_) => ConfigRecord::default(),
    }
}
