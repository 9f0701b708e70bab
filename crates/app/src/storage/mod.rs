//! Durable storage
//!
//! The client keeps a handful of single-valued slots: the bearer token, the
//! persisted session, the cart and the last placed order. Every write fully
//! overwrites its slot.

pub mod errors;
mod file;
pub mod keys;
mod memory;
pub mod records;

use mockall::automock;

pub use errors::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use records::{RecordVersion, StoredRecord, read_record, remove_record, write_record};

/// A string-keyed store of string blobs.
#[automock]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
