//! This file defines a registered user of the application and its supporting types.

use std::fmt::Display;
use std::path::PathBuf;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, PasswordHash, RawPassword};

/// A newtype wrapper for user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh, random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A 6-digit account number assigned at registration.
///
/// Account numbers are drawn uniformly from 100000..=999999 and are NOT
/// guaranteed to be unique across users. [UserId] is the unique key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountNumber(u32);

impl AccountNumber {
    /// Draw a random 6-digit account number.
    pub fn generate() -> Self {
        Self(rand::rng().random_range(100_000..=999_999))
    }

    /// Create an account number from a known value.
    ///
    /// The caller should ensure the value has exactly six digits.
    pub fn new_unchecked(number: u32) -> Self {
        Self(number)
    }

    /// Cast the account number to a 32 bit integer.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl Display for AccountNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered user of the application.
///
/// Records are created once by [crate::registry::UserRegistry::register] and
/// never updated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// The user's unique ID.
    pub id: UserId,
    /// The user's first name.
    pub first_name: String,
    /// The user's last name.
    pub last_name: String,
    /// The email address the user logs in with.
    pub email: String,
    /// The user's postal address.
    pub address: String,
    /// The user's password hash.
    #[serde(rename = "password")]
    pub password_hash: PasswordHash,
    /// The user's 6-digit account number.
    pub account_number: AccountNumber,
    /// Path to the user's profile image, relative to the document directory.
    #[serde(rename = "image")]
    pub image_path: PathBuf,
}

/// The raw fields submitted by the registration form.
///
/// Call [Registration::validate] before using the fields; the registry does
/// this as its first step.
#[derive(Debug, Clone)]
pub struct Registration {
    /// First name as entered.
    pub first_name: String,
    /// Last name as entered.
    pub last_name: String,
    /// Email address as entered.
    pub email: String,
    /// Password as entered.
    pub password: RawPassword,
    /// The password repeated for confirmation.
    pub confirm_password: RawPassword,
    /// Postal address as entered.
    pub address: String,
    /// Path to the photo selected from the device library, to be copied into
    /// the profile image directory.
    pub image_source: PathBuf,
}

impl Registration {
    /// Check that every field was filled in and that the password matches
    /// its confirmation.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingField] naming the first empty field, or
    /// [Error::PasswordMismatch] if the two passwords differ.
    pub fn validate(&self) -> Result<(), Error> {
        if self.first_name.is_empty() {
            return Err(Error::MissingField("first name"));
        }

        if self.last_name.is_empty() {
            return Err(Error::MissingField("last name"));
        }

        if self.email.is_empty() {
            return Err(Error::MissingField("email"));
        }

        if self.password.is_empty() {
            return Err(Error::MissingField("password"));
        }

        if self.confirm_password.is_empty() {
            return Err(Error::MissingField("confirm password"));
        }

        if self.address.is_empty() {
            return Err(Error::MissingField("address"));
        }

        if self.image_source.as_os_str().is_empty() {
            return Err(Error::MissingField("image"));
        }

        if self.password != self.confirm_password {
            return Err(Error::PasswordMismatch);
        }

        Ok(())
    }
}
