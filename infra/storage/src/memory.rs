use crate::batch::Batch;
use crate::error::StorageError;
use crate::{KeyValueStore, validate_key};
use async_trait::async_trait;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<FxHashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { entries: Arc::new(RwLock::new(map)) }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.entries.read().get(key).cloned())
    }

    async fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        keys.iter().try_for_each(|key| validate_key(key))?;
        let entries = self.entries.read();
        Ok(keys.iter().map(|key| entries.get(*key).cloned()).collect())
    }

    async fn apply(&self, batch: Batch) -> Result<(), StorageError> {
        batch.validate()?;
        batch.apply_to(&mut self.entries.write());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn batch_is_visible_as_a_whole() {
        let store = MemoryStore::new();
        store.apply(Batch::new().put("token", "t").put("user", "u")).await.unwrap();

        let values = store.get_many(&["token", "user"]).await.unwrap();
        assert_eq!(values, vec![Some("t".to_owned()), Some("u".to_owned())]);
    }

    #[tokio::test]
    async fn rejected_batch_leaves_store_untouched() {
        let store = MemoryStore::with_entries([("token", "t")]);
        let err = store.apply(Batch::new().remove("token").put(" ", "x")).await.unwrap_err();

        assert!(matches!(err, StorageError::InvalidKey { .. }));
        assert_eq!(store.get("token").await.unwrap().as_deref(), Some("t"));
    }
}
