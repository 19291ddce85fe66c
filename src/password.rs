//! This file defines types that handle password hashing and verification.
//! `RawPassword` wraps a plaintext password so it cannot be logged by accident.
//! `PasswordHash` holds a salted and hashed password.

use std::fmt::Display;

use bcrypt::{hash, verify};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A plaintext password as entered by the user.
///
/// This struct exists so that plaintext passwords are redacted when printed
/// or logged. Use [PasswordHash::from_raw_password] to turn one into a
/// storable hash.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPassword(String);

impl RawPassword {
    /// Wrap a plaintext password string.
    pub fn new(raw_password_string: &str) -> Self {
        Self(raw_password_string.to_string())
    }

    /// Borrow the underlying plaintext.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the user left the password input empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for RawPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", str::repeat("*", 8))
    }
}

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// An alias for the default encryption cost for hashing passwords.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Hash a raw password with the specified `cost`.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed
    /// to verify a password. Pass in [PasswordHash::DEFAULT_COST] to use the
    /// recommended cost; tests may use a lower cost to stay fast.
    ///
    /// # Errors
    ///
    /// Returns [Error::HashingError] if the password could not be hashed.
    pub fn from_raw_password(password: &RawPassword, cost: u32) -> Result<Self, Error> {
        match hash(&password.0, cost) {
            Ok(password_hash) => Ok(Self(password_hash)),
            Err(e) => Err(Error::HashingError(e.to_string())),
        }
    }

    /// Create a new `PasswordHash` without any validation.
    ///
    /// The caller should ensure that `raw_password_hash` is a valid bcrypt
    /// hash string, e.g. one previously produced by
    /// [PasswordHash::from_raw_password].
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_string())
    }

    /// Check that `raw_password` matches the stored password.
    ///
    /// # Errors
    ///
    /// Returns [Error::HashingError] if the stored hash could not be parsed.
    pub fn verify(&self, raw_password: &RawPassword) -> Result<bool, Error> {
        verify(&raw_password.0, &self.0).map_err(|e| Error::HashingError(e.to_string()))
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
