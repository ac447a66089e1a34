//! crates/invoicer_core/src/ports.rs
//!
//! Defines the storage contract (trait) for the persistence layer.
//! The trait forms the boundary of the architecture: the stores are written
//! against it, so the real key-value medium (local files, browser storage,
//! an in-memory map in tests) is injected from the outside.

/// A generic error type for all storage operations.
/// This abstracts away the specific failures of the underlying medium.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage backend is unavailable")]
    Unavailable,
    #[error("Serialization failed: {0}")]
    Serialization(String),
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// A convenience type alias for `Result<T, StorageError>`.
pub type StorageResult<T> = Result<T, StorageError>;

/// A synchronous key-value storage medium holding one serialized blob per
/// fixed key. Every store operation is a whole-blob read or write; there
/// are no partial updates and no transactions across keys.
pub trait StorageAdapter: Send + Sync {
    /// Whether the backing medium can be used at all. Stores probe this up
    /// front and short-circuit every operation to its safe default when it
    /// reports false.
    fn is_available(&self) -> bool;

    /// Reads the raw blob stored under `key`, `None` if absent.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous blob.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes the blob under `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
