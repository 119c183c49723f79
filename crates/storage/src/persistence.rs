//! Settings persistence
//!
//! Stores [`OneClickSettings`] as a JSON file. A missing file loads as the
//! defaults, and writes go through a temp file that is renamed into place.

use crate::settings::OneClickSettings;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

/// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Settings were not loaded before use
    #[error("Settings not loaded")]
    NotLoaded,
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Settings store backed by a JSON file
///
/// # Example
///
/// ```no_run
/// use storage::SettingsStore;
///
/// # async fn example() -> storage::Result<()> {
/// let store = SettingsStore::new("data.json");
/// store.load().await?;
/// store.update(|s| s.auto_play = false).await?;
/// assert!(!store.get().await?.auto_play);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Arc<RwLock<Option<OneClickSettings>>>,
}

impl SettingsStore {
    /// Create a store for the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), settings: Arc::new(RwLock::new(None)) }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings from disk, falling back to defaults when no file exists
    pub async fn load(&self) -> Result<OneClickSettings> {
        let loaded = match self.read_from_disk().await {
            Ok(settings) => settings,
            Err(StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no settings file, using defaults");
                OneClickSettings::default()
            }
            Err(e) => return Err(e),
        };

        let mut settings = self.settings.write().await;
        *settings = Some(loaded);
        Ok(loaded)
    }

    /// Get the current settings
    pub async fn get(&self) -> Result<OneClickSettings> {
        let settings = self.settings.read().await;
        settings.ok_or(StorageError::NotLoaded)
    }

    /// Update the settings and persist to disk
    pub async fn update<F>(&self, f: F) -> Result<OneClickSettings>
    where
        F: FnOnce(&mut OneClickSettings),
    {
        let mut settings = self.settings.write().await;

        let current = settings.as_mut().ok_or(StorageError::NotLoaded)?;
        f(current);
        let updated = *current;
        self.write_to_disk(&updated).await?;
        Ok(updated)
    }

    /// Replace the settings and persist
    pub async fn set(&self, new_settings: OneClickSettings) -> Result<()> {
        let mut settings = self.settings.write().await;
        *settings = Some(new_settings);
        self.write_to_disk(&new_settings).await
    }

    /// Persist the current settings
    pub async fn save(&self) -> Result<()> {
        let settings = self.settings.read().await;
        let current = settings.ok_or(StorageError::NotLoaded)?;
        self.write_to_disk(&current).await
    }

    /// Reset to defaults and remove the backing file
    pub async fn clear(&self) -> Result<()> {
        let mut settings = self.settings.write().await;
        *settings = Some(OneClickSettings::default());

        if fs::try_exists(&self.path).await? {
            fs::remove_file(&self.path).await?;
        }

        Ok(())
    }

    async fn read_from_disk(&self) -> Result<OneClickSettings> {
        let contents = fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    async fn write_to_disk(&self, settings: &OneClickSettings) -> Result<()> {
        let json = serde_json::to_string_pretty(settings)?;
        let temp_path = self.path.with_extension("tmp");

        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &self.path).await?;
        tracing::debug!(path = %self.path.display(), "settings saved");

        Ok(())
    }
}
