//! In-memory implementations of the durable store traits.
//!
//! Suitable for tests and for embedding the ledger without touching disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;

use crate::Error;

use super::{FileStore, KvStore};

/// A [KvStore] over a shared in-memory map.
///
/// Cloning yields a second handle to the same map, so a test can keep a
/// handle while handing the store to a ledger.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryKvStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// When `fail` is true, every subsequent [KvStore::set] fails with
    /// [Error::StorageError] until switched back off.
    ///
    /// Used to exercise the no-rollback behaviour of the ledger.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let entries = self.entries.lock().expect("kv store lock poisoned");

        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::StorageError(
                "simulated write failure".to_string(),
            ));
        }

        let mut entries = self.entries.lock().expect("kv store lock poisoned");
        entries.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

/// A [FileStore] over a shared in-memory map from path to file contents.
///
/// Directories are implicit; [FileStore::ensure_directory] is a no-op.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileStore {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MemoryFileStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a file, e.g. the source image a test "picks" during
    /// registration.
    pub fn insert(&self, path: impl Into<PathBuf>, content: &str) {
        let mut files = self.files.lock().expect("file store lock poisoned");
        files.insert(path.into(), content.to_string());
    }

    /// Whether a file exists at `path`.
    pub fn contains(&self, path: &Path) -> bool {
        let files = self.files.lock().expect("file store lock poisoned");
        files.contains_key(path)
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn read_text(&self, path: &Path) -> Result<Option<String>, Error> {
        let files = self.files.lock().expect("file store lock poisoned");

        Ok(files.get(path).cloned())
    }

    async fn write_text(&self, path: &Path, content: &str) -> Result<(), Error> {
        let mut files = self.files.lock().expect("file store lock poisoned");
        files.insert(path.to_path_buf(), content.to_string());

        Ok(())
    }

    async fn copy_file(&self, from: &Path, to: &Path) -> Result<(), Error> {
        let mut files = self.files.lock().expect("file store lock poisoned");

        let content = files
            .get(from)
            .cloned()
            .ok_or_else(|| Error::StorageError(format!("no file at {}", from.display())))?;
        files.insert(to.to_path_buf(), content);

        Ok(())
    }

    async fn ensure_directory(&self, _path: &Path) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod memory_kv_store_tests {
    use crate::Error;
    use crate::stores::{KvStore, MemoryKvStore};

    #[tokio::test]
    async fn clones_share_entries() {
        let store = MemoryKvStore::new();
        let handle = store.clone();

        store.set("transactions", "[]").await.unwrap();

        assert_eq!(
            handle.get("transactions").await.unwrap(),
            Some("[]".to_string())
        );
    }

    #[tokio::test]
    async fn fail_writes_switch_rejects_sets() {
        let store = MemoryKvStore::new();
        store.set_fail_writes(true);

        let result = store.set("transactions", "[]").await;

        assert!(matches!(result, Err(Error::StorageError(_))));
        assert_eq!(store.get("transactions").await.unwrap(), None);
    }
}

#[cfg(test)]
mod memory_file_store_tests {
    use std::path::Path;

    use crate::Error;
    use crate::stores::{FileStore, MemoryFileStore};

    #[tokio::test]
    async fn copy_file_duplicates_contents() {
        let store = MemoryFileStore::new();
        store.insert("/device/photo.jpg", "jpeg bytes");

        store
            .copy_file(Path::new("/device/photo.jpg"), Path::new("images/user.jpg"))
            .await
            .unwrap();

        assert_eq!(
            store.read_text(Path::new("images/user.jpg")).await.unwrap(),
            Some("jpeg bytes".to_string())
        );
    }

    #[tokio::test]
    async fn copy_file_fails_for_missing_source() {
        let store = MemoryFileStore::new();

        let result = store
            .copy_file(Path::new("/device/missing.jpg"), Path::new("images/user.jpg"))
            .await;

        assert!(matches!(result, Err(Error::StorageError(_))));
    }
}
