//! Durable key-value storage abstraction.

use crate::error::StorageError;

/// Keys of the values the client persists.
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    pub const CURRENT_USER: &str = "currentUser";
    pub const PREFERRED_LANGUAGE: &str = "preferredLanguage";
}

/// Origin-scoped string storage that survives restarts.
///
/// Writes are synchronous: when `set` or `remove` returns `Ok`, the change is
/// durable and fully visible to the next `get`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
