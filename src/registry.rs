//! Registration and login against the persisted list of user records.

use std::path::{Path, PathBuf};

use crate::{
    Error, PasswordHash, RawPassword,
    stores::FileStore,
    user::{AccountNumber, Registration, UserId, UserRecord},
};

/// The file under the document directory holding the JSON array of user
/// records.
pub const USER_DATA_FILE: &str = "data.json";

/// The directory under the document directory holding one profile image per
/// user, named by the user's ID.
pub const IMAGE_DIR: &str = "images";

/// The append-only collection of registered users.
///
/// Records are appended at registration and looked up at login; they are
/// never updated or deleted. The whole list is rewritten on every append.
#[derive(Debug, Clone)]
pub struct UserRegistry<F> {
    store: F,
    hash_cost: u32,
}

impl<F: FileStore> UserRegistry<F> {
    /// Create a registry backed by `store`, hashing passwords with the
    /// recommended bcrypt cost.
    pub fn new(store: F) -> Self {
        Self::with_hash_cost(store, PasswordHash::DEFAULT_COST)
    }

    /// Create a registry that hashes passwords with `hash_cost`.
    ///
    /// Tests use a low cost to keep hashing fast; production code should
    /// prefer [UserRegistry::new].
    pub fn with_hash_cost(store: F, hash_cost: u32) -> Self {
        Self { store, hash_cost }
    }

    /// Register a new user.
    ///
    /// Validates the form, hashes the password, copies the selected photo
    /// into the profile image directory under the new user's ID, and appends
    /// the finished record to the persisted user list.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [Error::MissingField] or [Error::PasswordMismatch] if the form is
    ///   incomplete. Nothing is written in that case.
    /// - [Error::DuplicateEmail] if the email is already registered.
    /// - [Error::HashingError] if the password could not be hashed.
    /// - [Error::StorageError] if the image copy or the list write failed.
    pub async fn register(&self, registration: Registration) -> Result<UserRecord, Error> {
        registration.validate()?;

        let mut users = self.load_users().await?;
        if users.iter().any(|user| user.email == registration.email) {
            return Err(Error::DuplicateEmail(registration.email));
        }

        let password_hash = PasswordHash::from_raw_password(&registration.password, self.hash_cost)?;
        let id = UserId::new();

        self.store.ensure_directory(Path::new(IMAGE_DIR)).await?;
        let image_path = PathBuf::from(IMAGE_DIR).join(format!("{id}.jpg"));
        self.store
            .copy_file(&registration.image_source, &image_path)
            .await?;

        let record = UserRecord {
            id,
            first_name: registration.first_name,
            last_name: registration.last_name,
            email: registration.email,
            address: registration.address,
            password_hash,
            account_number: AccountNumber::generate(),
            image_path,
        };

        users.push(record.clone());
        self.save_users(&users).await?;

        tracing::info!("registered user {id}");

        Ok(record)
    }

    /// Look up a user by email and password.
    ///
    /// Scans the persisted list in insertion order and returns the first
    /// record whose email matches exactly and whose stored hash verifies
    /// against `password`. Has no side effects.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [Error::InvalidCredentials] if no record matches. A registry that
    ///   has never been written to behaves as an empty one.
    /// - [Error::HashingError] if a stored hash could not be parsed.
    /// - [Error::StorageError] if the user list could not be read.
    pub async fn login(
        &self,
        email: &str,
        password: &RawPassword,
    ) -> Result<UserRecord, Error> {
        let users = self.load_users().await?;

        for user in users {
            if user.email == email && user.password_hash.verify(password)? {
                tracing::info!("user {} logged in", user.id);
                return Ok(user);
            }
        }

        Err(Error::InvalidCredentials)
    }

    async fn load_users(&self) -> Result<Vec<UserRecord>, Error> {
        match self.store.read_text(Path::new(USER_DATA_FILE)).await? {
            Some(content) => Ok(serde_json::from_str(&content)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_users(&self, users: &[UserRecord]) -> Result<(), Error> {
        let content = serde_json::to_string(users)?;

        self.store
            .write_text(Path::new(USER_DATA_FILE), &content)
            .await
    }
}
