//! Persisted key/value storage for client-side state.
//!
//! Values are plain strings addressed by string keys. Every mutation goes through a [`Batch`],
//! and a batch is applied all-or-nothing: a reader never observes half of it. This is what lets
//! the session layer keep its token and profile keys in lockstep.
//!
//! Two engines are provided:
//! 1. **[`MemoryStore`]**: process-local map, for tests and ephemeral sessions.
//! 2. **[`FileStore`]**: the whole key map persisted as one JSON document, replaced through an
//!    atomic swap (unique temp file + `fsync` + `rename`). Orphaned temp files from a crash are
//!    purged on open.
//!
//! # Examples
//!
//! ```rust
//! use resbook_storage::{Batch, FileStore, KeyValueStore, StorageError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     let store = FileStore::builder().root(tmp.path()).name("session").open().await?;
//!
//!     store.apply(Batch::new().put("token", "abc").put("user", "{}")).await?;
//!     assert_eq!(store.get("token").await?.as_deref(), Some("abc"));
//!
//!     store.apply(Batch::new().remove("token").remove("user")).await?;
//!     assert!(store.get("user").await?.is_none());
//!     Ok(())
//! }
//! ```

mod batch;
mod error;
mod file;
mod maintenance;
mod memory;

pub use batch::{Batch, Op};
pub use error::{StorageError, StorageErrorExt};
pub use file::{FileStore, FileStoreBuilder};
pub use memory::MemoryStore;

use async_trait::async_trait;
use std::fmt::Debug;

/// A string key/value store with atomic batched writes.
#[async_trait]
pub trait KeyValueStore: Debug + Send + Sync {
    /// Reads a single key.
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidKey`] for an empty key, or an engine-specific error.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Reads several keys from one consistent view of the store.
    ///
    /// # Errors
    /// Same as [`KeyValueStore::get`].
    async fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError>;

    /// Applies every operation of `batch`, or none of them.
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidKey`] if any key is invalid (nothing is applied), or an
    /// engine-specific error if persisting fails (the previous state stays visible).
    async fn apply(&self, batch: Batch) -> Result<(), StorageError>;
}

pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.trim().is_empty() || key.chars().any(char::is_control) {
        return Err(StorageError::InvalidKey { message: format!("{key:?}").into(), context: None });
    }
    Ok(())
}
