//! Configuration for where the app keeps its data on device.

use std::path::{Path, PathBuf};

/// Locates the directories used by the disk-backed stores.
///
/// Everything lives under a single data directory: the document directory
/// (user records and profile images) and the key-value directory (the
/// transaction list and balance files).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    data_dir: PathBuf,
}

impl Config {
    /// Create a config rooted at `data_dir`.
    ///
    /// The directory does not need to exist yet; the stores create it on
    /// open.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The root data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The document directory, holding `data.json` and the profile images.
    pub fn document_dir(&self) -> PathBuf {
        self.data_dir.join("documents")
    }

    /// The directory holding one file per key-value store key.
    pub fn kv_dir(&self) -> PathBuf {
        self.data_dir.join("storage")
    }
}
