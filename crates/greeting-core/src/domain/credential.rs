//! The shared admin credential that gates writes.
//!
//! The expected secret is supplied at startup (CLI flag, environment variable
//! or secret file) and held in a [`SecretString`] so it never shows up in
//! `Debug` output or logs.  Candidates are compared with
//! [`subtle::ConstantTimeEq`] so the comparison time does not depend on how
//! many leading bytes match.
//!
//! The comparison is still an exact, case-sensitive string match: `"Akilan"`
//! and `"akilan"` are different credentials.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Errors raised while constructing an [`AdminCredential`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The configured secret was empty or only whitespace.  A blank secret
    /// would let a blank password through.
    #[error("admin credential must not be empty")]
    Empty,
}

/// The expected admin password.
pub struct AdminCredential {
    secret: SecretString,
}

impl AdminCredential {
    /// Wraps `secret` as the expected credential.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Empty`] if `secret` is empty or contains
    /// only whitespace.  A non-blank secret is kept verbatim, surrounding
    /// whitespace included.
    pub fn new(secret: impl Into<String>) -> Result<Self, CredentialError> {
        let secret: String = secret.into();
        if secret.trim().is_empty() {
            return Err(CredentialError::Empty);
        }
        Ok(Self {
            secret: SecretString::from(secret),
        })
    }

    /// Returns `true` when `candidate` is exactly the configured secret.
    ///
    /// Inputs of a different length are rejected without inspecting their
    /// contents; inputs of the same length are compared in constant time.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        let expected = self.secret.expose_secret().as_bytes();
        bool::from(expected.ct_eq(candidate.as_bytes()))
    }
}

impl fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredential")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
