//! Per-shopper key-value storage.
//!
//! Each shopper owns a small key-value space holding named text slots (the
//! cart lives in the `cart` slot). Two backends are provided:
//!
//! - [`FileStore`] - one directory per shopper, one file per key
//! - [`MemoryStore`] - process-local, used for tests and ephemeral runs
//!
//! Stores are synchronous: slots are a few hundred bytes and every write
//! happens under the owning cart store's lock.

mod file;
mod memory;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use sketchshop_core::ShopperId;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A named-slot text store.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. Absent slots are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace a slot's contents.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a slot. Removing an absent slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Which backend holds shopper slots.
#[derive(Clone)]
pub enum StorageBackend {
    /// Files under `root/<shopper id>/`.
    File { root: PathBuf },
    /// One in-process map shared across registry evictions. Shoppers with
    /// no stored slots have no entry.
    Memory(Arc<Mutex<HashMap<ShopperId, HashMap<String, String>>>>),
}

impl StorageBackend {
    /// File backend rooted at `root`.
    #[must_use]
    pub fn file(root: impl Into<PathBuf>) -> Self {
        Self::File { root: root.into() }
    }

    /// Empty in-memory backend.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Arc::default())
    }

    /// The key-value space belonging to one shopper.
    #[must_use]
    pub fn store_for(&self, shopper: ShopperId) -> Arc<dyn KeyValueStore> {
        match self {
            Self::File { root } => Arc::new(FileStore::new(root.join(shopper.to_string()))),
            Self::Memory(spaces) => Arc::new(MemoryStore::within(Arc::clone(spaces), shopper)),
        }
    }

    #[cfg(test)]
    pub(crate) fn memory_spaces(&self) -> usize {
        match self {
            Self::File { .. } => 0,
            Self::Memory(spaces) => spaces.lock().unwrap_or_else(std::sync::PoisonError::into_inner).len(),
        }
    }
}

impl std::fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File { root } => f.debug_struct("File").field("root", root).finish(),
            Self::Memory(_) => f.write_str("Memory"),
        }
    }
}
