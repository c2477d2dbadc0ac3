mod config;
mod json_file;
mod memory;
mod sqlite;
mod store;

pub use config::{Config, PlannerConfig, ProfileConfig, StorageConfig, TimerConfig};
pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use store::{Collection, Store};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, StoreError};

/// The persistence port.
///
/// A backend maps string keys to whole JSON documents. Both operations are
/// synchronous; the store above it handles encoding and defaults.
pub trait KvBackend {
    /// Raw document for `key`, or `None` if nothing has been written yet.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the document stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<B: KvBackend + ?Sized> KvBackend for Box<B> {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }
}

/// Backend chosen at runtime from configuration.
pub type DynBackend = Box<dyn KvBackend + Send>;

/// Which [`KvBackend`] the application opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Sqlite,
    Json,
    Memory,
}

impl BackendKind {
    /// Open the backend rooted at `dir`.
    pub fn open(self, dir: &std::path::Path) -> Result<DynBackend, StoreError> {
        let backend: DynBackend = match self {
            BackendKind::Sqlite => Box::new(SqliteBackend::open(&dir.join("focusflow.db"))?),
            BackendKind::Json => Box::new(JsonFileBackend::new(dir)),
            BackendKind::Memory => Box::new(MemoryBackend::new()),
        };
        tracing::debug!(backend = ?self, dir = %dir.display(), "storage backend opened");
        Ok(backend)
    }
}

/// Returns `~/.config/focusflow[-dev]/`.
///
/// `FOCUSFLOW_DATA_DIR` overrides the location outright; otherwise
/// `FOCUSFLOW_ENV=dev` selects the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("FOCUSFLOW_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("FOCUSFLOW_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("focusflow-dev")
            } else {
                base_dir.join("focusflow")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
