//! crates/invoicer_core/src/memory.rs
//!
//! An in-memory implementation of the `StorageAdapter` port. Used by the
//! test suites and as a throwaway backing store when no durable medium is
//! configured.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::ports::{StorageAdapter, StorageError, StorageResult};

/// A `StorageAdapter` backed by a mutex-guarded map.
#[derive(Default)]
pub struct MemoryAdapter {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds the adapter, for tests that start from existing blobs.
    pub fn with_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }
}

impl StorageAdapter for MemoryAdapter {
    fn is_available(&self) -> bool {
        true
    }

    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
