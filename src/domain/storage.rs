//! Storage port used by the collection store.
//!
//! A storage backend is a set of named slots, each holding one string.
//! The store never touches the filesystem directly; adapters live in
//! the infrastructure layer.

use super::errors::StorageError;

pub trait KeyValueStorage {
    /// Returns the slot contents, or `None` when the slot was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the slot contents in full.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}
