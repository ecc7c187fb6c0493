//! Durable key-value storage for the progress store.
//!
//! A backend holds named slots of UTF-8 text. Reads and writes replace the
//! whole value; there is no partial update format.

mod file;
mod in_memory;

use std::io;

use thiserror::Error;

pub use file::FileStorage;
pub use in_memory::InMemoryStorage;

/// Error type for storage backend operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage lock poisoned during {0}")]
    LockPoisoned(&'static str),

    #[error("storage I/O error on slot {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("could not encode slot value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Trait for durable slot persistence. One value per key (latest write wins).
pub trait StorageBackend {
    /// Read the value stored under `key`. Returns None if the slot is empty.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Clear the slot. Returns true if a value existed.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
}

impl<S: StorageBackend + ?Sized> StorageBackend for &S {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        (**self).remove(key)
    }
}
