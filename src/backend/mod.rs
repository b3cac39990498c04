//! Durable key-value storage seam.
//!
//! `ShelfStore` persists each shelf as a string value (a JSON array) under
//! its configured key. Backends only move strings; they never interpret the
//! shelf contents.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::StorageError;

/// Durable key-value storage for serialized shelves.
///
/// The default `MemoryBackend` keeps values in a shared `HashMap`; the
/// `FileBackend` writes one file per key so independent processes can share
/// shelves. Custom backends might talk to sled, SQLite, etc.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`. `None` when the key was never
    /// written.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn store(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// A cheap change stamp for `key`: any mutation must produce a different
    /// value than the one before it. `None` when the key was never written.
    ///
    /// The watcher polls this to detect writes from other contexts without
    /// re-reading and re-parsing whole shelves.
    fn fingerprint(&self, key: &str) -> Result<Option<u64>, StorageError>;
}
