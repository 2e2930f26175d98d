//! Settings store implementation

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::Result;
use crate::models::Settings;

/// Key the settings record lives under inside the store document
pub const SETTINGS_STORE_KEY: &str = "settings";

/// Trait for settings storage operations (async)
#[allow(async_fn_in_trait)]
pub trait SettingsStore {
    /// Load the settings record; `Ok(None)` means nothing was ever saved
    async fn load(&self) -> Result<Option<Settings>>;

    /// Persist the complete settings record
    async fn persist(&self, settings: &Settings) -> Result<()>;
}

/// JSON-file implementation of `SettingsStore`
///
/// The store is a single JSON object document; the settings record lives
/// under [`SETTINGS_STORE_KEY`] and unrelated sibling keys survive persists.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given document path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Option<Map<String, Value>>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }
}

impl SettingsStore for JsonFileStore {
    async fn load(&self) -> Result<Option<Settings>> {
        let Some(document) = self.read_document().await? else {
            return Ok(None);
        };
        match document.get(SETTINGS_STORE_KEY) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    async fn persist(&self, settings: &Settings) -> Result<()> {
        let mut document = match self.read_document().await {
            Ok(Some(document)) => document,
            Ok(None) => Map::new(),
            Err(error) => {
                tracing::warn!("Rewriting unreadable settings store: {}", error);
                Map::new()
            }
        };
        document.insert(
            SETTINGS_STORE_KEY.to_string(),
            serde_json::to_value(settings)?,
        );
        let serialized = serde_json::to_string_pretty(&Value::Object(document))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        // Write the full document to a sidecar and swap it in, so a reader
        // never observes a partial record.
        let staged = self.path.with_extension("json.tmp");
        tokio::fs::write(&staged, serialized).await?;
        tokio::fs::rename(&staged, &self.path).await?;
        Ok(())
    }
}
