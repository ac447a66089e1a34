//! services/cli/src/adapters/fs.rs
//!
//! This module contains the filesystem adapter, the concrete
//! implementation of the `StorageAdapter` port from the core crate for
//! the local-first desktop target. Each storage key maps to one
//! `<key>.json` file inside the configured data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use invoicer_core::ports::{StorageAdapter, StorageError, StorageResult};
use tracing::warn;

/// A `StorageAdapter` persisting each key as a standalone file.
#[derive(Clone)]
pub struct JsonFileAdapter {
    root: PathBuf,
}

impl JsonFileAdapter {
    /// Creates the adapter, making sure the data directory exists. A
    /// directory that cannot be created yields an adapter that reports
    /// itself unavailable, so every store degrades instead of erroring.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        if let Err(e) = fs::create_dir_all(&root) {
            warn!(root = %root.display(), error = %e, "could not create data directory");
        }
        Self { root }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl StorageAdapter for JsonFileAdapter {
    fn is_available(&self) -> bool {
        self.root.is_dir()
    }

    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        // Write-then-rename so a crash mid-write cannot truncate the blob.
        let target = self.path_for(key);
        let staging = self.root.join(format!("{}.json.tmp", key));
        fs::write(&staging, value).map_err(|e| StorageError::Backend(e.to_string()))?;
        fs::rename(&staging, &target).map_err(|e| StorageError::Backend(e.to_string()))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }
}
