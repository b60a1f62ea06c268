//! File-backed engine: one JSON document per store, replaced atomically on every batch.

use crate::batch::Batch;
use crate::error::{StorageError, StorageErrorExt};
use crate::{KeyValueStore, maintenance, validate_key};
use async_trait::async_trait;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use private::Sealed;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub(crate) const TMP_MARKER: &str = ".rbtmp.";
const DOCUMENT_SUFFIX: &str = "json";
const DEFAULT_NAME: &str = "store";

/// A key/value store persisted as a single JSON document.
///
/// Reads are served from an in-memory copy; writes are serialized, persisted through an
/// atomic swap and only then published to readers. The handle is cheap to clone.
#[resbook_derive::shared_handle]
pub struct FileStore {
    document: PathBuf,
    cache: RwLock<FxHashMap<String, String>>,
    writer: Mutex<()>,
    tmp_counter: AtomicU64,
}

impl FileStore {
    #[must_use = "The store is not opened until you call .open()"]
    pub fn builder() -> FileStoreBuilder {
        FileStoreBuilder::default()
    }

    /// Path of the backing JSON document.
    #[must_use]
    pub fn document(&self) -> &Path {
        &self.document
    }

    async fn persist(&self, entries: &FxHashMap<String, String>) -> Result<(), StorageError> {
        let ordered: BTreeMap<&str, &str> =
            entries.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let payload = serde_json::to_vec_pretty(&ordered).context("Encoding store document")?;

        let temp = unique_tmp_path(&self.document, &self.tmp_counter);
        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .await
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(&payload).await.context("Write failed")?;
            file.sync_all().await.context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, &self.document).await {
            if err.kind() != std::io::ErrorKind::AlreadyExists {
                let _ = fs::remove_file(&temp).await;
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Atomic swap failed: {}", temp.display()).into()),
                });
            }
            fs::remove_file(&self.document).await.context("Failed to replace store document")?;
            fs::rename(&temp, &self.document).await.context("Atomic swap failed")?;
        }

        debug!(path = %self.document.display(), keys = entries.len(), "Store document saved");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.cache.read().get(key).cloned())
    }

    async fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        keys.iter().try_for_each(|key| validate_key(key))?;
        let cache = self.cache.read();
        Ok(keys.iter().map(|key| cache.get(*key).cloned()).collect())
    }

    async fn apply(&self, batch: Batch) -> Result<(), StorageError> {
        batch.validate()?;
        if batch.is_empty() {
            return Ok(());
        }

        let _writer = self.writer.lock().await;
        let mut next = self.cache.read().clone();
        batch.apply_to(&mut next);

        self.persist(&next).await?;
        *self.cache.write() = next;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

/// Typestate builder for [`FileStore`]; a root directory is mandatory.
#[derive(Debug, Default)]
pub struct FileStoreBuilder<S: Sealed = NoRoot> {
    state: S,
    name: Option<String>,
    create: Option<bool>,
}

impl<S: Sealed> FileStoreBuilder<S> {
    /// Document name without extension (defaults to `store`).
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether a missing root directory is created (defaults to `true`).
    #[must_use]
    pub const fn create(mut self, enable: bool) -> Self {
        self.create = Some(enable);
        self
    }
}

impl FileStoreBuilder<NoRoot> {
    #[must_use]
    pub fn root(self, path: impl Into<PathBuf>) -> FileStoreBuilder<WithRoot> {
        FileStoreBuilder { state: WithRoot(path.into()), name: self.name, create: self.create }
    }
}

impl FileStoreBuilder<WithRoot> {
    /// Opens the store, loading the existing document if there is one.
    ///
    /// Stale temp files left by an interrupted write are removed first.
    ///
    /// # Errors
    /// Returns [`StorageError::Io`] if the root cannot be created or read,
    /// [`StorageError::InvalidKey`] for an unusable document name, and
    /// [`StorageError::Corrupted`] if the document is not a JSON string map.
    pub async fn open(self) -> Result<FileStore, StorageError> {
        let root = self.state.0;
        let name = self.name.unwrap_or_else(|| DEFAULT_NAME.to_owned());
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(StorageError::InvalidKey {
                message: name.into(),
                context: Some("Store name must be a plain file stem".into()),
            });
        }

        if self.create.unwrap_or(true) {
            fs::create_dir_all(&root)
                .await
                .context(format!("Failed to bootstrap store root: {}", root.display()))?;
        }

        maintenance::purge_tmp(&root, &name).await;

        let document = root.join(format!("{name}.{DOCUMENT_SUFFIX}"));
        let entries = load_document(&document).await?;
        info!(path = %document.display(), keys = entries.len(), "Opened file store");

        Ok(FileStore::new(FileStoreInner {
            document,
            cache: RwLock::new(entries),
            writer: Mutex::new(()),
            tmp_counter: AtomicU64::new(1),
        }))
    }
}

async fn load_document(path: &Path) -> Result<FxHashMap<String, String>, StorageError> {
    let raw = match fs::read(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(FxHashMap::default()),
        Err(err) => {
            return Err(StorageError::Io {
                source: err,
                context: Some(format!("Read failed: {}", path.display()).into()),
            });
        },
    };

    let parsed: BTreeMap<String, String> =
        serde_json::from_slice(&raw).map_err(|e| StorageError::Corrupted {
            message: e.to_string().into(),
            context: Some(path.display().to_string().into()),
        })?;
    Ok(parsed.into_iter().collect())
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or(DEFAULT_NAME);
    target.with_file_name(format!("{file_name}{TMP_MARKER}{}.{counter}", std::process::id()))
}
