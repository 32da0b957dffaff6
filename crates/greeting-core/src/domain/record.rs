//! The persisted name pair.
//!
//! [`ConfigRecord`] is the only entity the store ever holds.  It is a
//! singleton: there is never more than one, it is replaced wholesale on every
//! successful write, and it is never deleted.
//!
//! On the wire (and in the JSON file backend) the fields use camelCase so the
//! presentation layer can read them without a mapping step:
//!
//! ```json
//! { "birthdayName": "Nanba", "wisherName": "Akil" }
//! ```

use serde::{Deserialize, Serialize};

/// Name shown for the birthday person until a record is written.
pub const DEFAULT_BIRTHDAY_NAME: &str = "Nanba";

/// Name shown for the sender until a record is written.
pub const DEFAULT_WISHER_NAME: &str = "Akil";

/// The pair of display names rendered by the greeting page.
///
/// Both fields are plain strings.  Empty strings are valid and stored
/// verbatim.
///
/// # Example
///
/// ```rust
/// use greeting_core::ConfigRecord;
///
/// let record = ConfigRecord::default();
/// assert_eq!(record.birthday_name, "Nanba");
/// assert_eq!(record.wisher_name, "Akil");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRecord {
    /// Name of the person whose birthday it is.
    pub birthday_name: String,
    /// Name of the person sending the wishes.
    pub wisher_name: String,
}

impl ConfigRecord {
    /// Creates a record from any pair of string-like values.
    pub fn new(birthday_name: impl Into<String>, wisher_name: impl Into<String>) -> Self {
        Self {
            birthday_name: birthday_name.into(),
            wisher_name: wisher_name.into(),
        }
    }
}

impl Default for ConfigRecord {
    /// The pair returned whenever no record has been written (or the backing
    /// store could not be read).
    fn default() -> Self {
        Self::new(DEFAULT_BIRTHDAY_NAME, DEFAULT_WISHER_NAME)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
