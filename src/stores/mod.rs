//! Contains traits and implementations for the durable stores that back the
//! [registry](crate::registry) and [ledger](crate::ledger).
//!
//! Two seams are defined:
//! - [KvStore]: an opaque string key-value store, used by the ledger for the
//!   transaction list and balance.
//! - [FileStore]: an opaque document directory, used by the registry for the
//!   user record file and profile images.
//!
//! The process assumes it is the sole writer of its own keys and files; no
//! locking or versioning is performed against external writers.

use std::path::Path;

use async_trait::async_trait;

use crate::Error;

mod disk;
mod memory;

pub use disk::{DiskFileStore, DiskKvStore};
pub use memory::{MemoryFileStore, MemoryKvStore};

/// A durable store of string values keyed by string names.
///
/// Writes are whole-value replace-on-write; there is no append or partial
/// update. A write either completes or fails from the caller's point of
/// view, no partial-write recovery is attempted.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been set.
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), Error>;
}

/// A durable store of text files and copied binaries under a document
/// directory.
///
/// Relative paths are resolved against the store's document root; absolute
/// paths (e.g. an image picked from the device library) are used as given.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Read the contents of the text file at `path`.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    async fn read_text(&self, path: &Path) -> Result<Option<String>, Error>;

    /// Write `content` to the file at `path`, replacing any previous
    /// contents.
    async fn write_text(&self, path: &Path, content: &str) -> Result<(), Error>;

    /// Copy the file at `from` to `to`.
    async fn copy_file(&self, from: &Path, to: &Path) -> Result<(), Error>;

    /// Create the directory at `path` (and any missing parents) if it does
    /// not already exist.
    async fn ensure_directory(&self, path: &Path) -> Result<(), Error>;
}
