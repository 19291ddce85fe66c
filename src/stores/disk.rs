//! Disk-backed implementations of the durable store traits using `tokio::fs`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::Error;

use super::{FileStore, KvStore};

/// A [KvStore] that keeps one flat file per key under a storage directory.
#[derive(Debug, Clone)]
pub struct DiskKvStore {
    dir: PathBuf,
}

impl DiskKvStore {
    /// Open a key-value store rooted at `dir`, creating the directory if it
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [Error::StorageError] if the directory could not be created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, Error> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;

        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

#[async_trait]
impl KvStore for DiskKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        match fs::read_to_string(self.key_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        fs::write(self.key_path(key), value)
            .await
            .map_err(|error| error.into())
    }
}

/// A [FileStore] rooted at a document directory on disk.
#[derive(Debug, Clone)]
pub struct DiskFileStore {
    root: PathBuf,
}

impl DiskFileStore {
    /// Open a file store rooted at `root`, creating the directory if it does
    /// not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [Error::StorageError] if the directory could not be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();
        fs::create_dir_all(&root).await?;

        Ok(Self { root })
    }

    /// Resolve `path` against the document root.
    ///
    /// Absolute paths are returned unchanged, which is what lets
    /// [FileStore::copy_file] read a source image from outside the document
    /// directory.
    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait]
impl FileStore for DiskFileStore {
    async fn read_text(&self, path: &Path) -> Result<Option<String>, Error> {
        match fs::read_to_string(self.resolve(path)).await {
            Ok(content) => Ok(Some(content)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn write_text(&self, path: &Path, content: &str) -> Result<(), Error> {
        fs::write(self.resolve(path), content)
            .await
            .map_err(|error| error.into())
    }

    async fn copy_file(&self, from: &Path, to: &Path) -> Result<(), Error> {
        fs::copy(self.resolve(from), self.resolve(to)).await?;

        Ok(())
    }

    async fn ensure_directory(&self, path: &Path) -> Result<(), Error> {
        fs::create_dir_all(self.resolve(path))
            .await
            .map_err(|error| error.into())
    }
}
