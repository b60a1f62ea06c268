use crate::constants::{PROFILE_KEY, SESSION_STORE, TOKEN_KEY};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level client configuration shared across slices.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfigInner {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub booking: BookingConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(flatten, default)]
    inner: Arc<ClientConfigInner>,
}

impl Deref for ClientConfig {
    type Target = ClientConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ClientConfig {
    fn deref_mut(&mut self) -> &mut ClientConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Backend endpoint settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

/// Where the session is persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: PathBuf,
    pub name: String,
    pub token_key: String,
    pub profile_key: String,
}

/// How many days ahead each resource kind can be booked.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub equipment_advance_days: u32,
    pub cage_advance_days: u32,
    pub experiment_advance_days: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub console: bool,
    /// Rolling log directory; file logging is off when absent.
    pub dir: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: "http://127.0.0.1:8080/api".to_owned(), timeout_ms: 15_000 }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".resbook"),
            name: SESSION_STORE.to_owned(),
            token_key: TOKEN_KEY.to_owned(),
            profile_key: PROFILE_KEY.to_owned(),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self { equipment_advance_days: 7, cage_advance_days: 7, experiment_advance_days: 7 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), console: true, dir: None, json: false }
    }
}
