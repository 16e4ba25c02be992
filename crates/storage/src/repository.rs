use async_trait::async_trait;
use centurion_core::model::Theme;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::record::ProgressRecord;

/// Key the progress record is stored under.
pub const PROGRESS_KEY: &str = "centurionUser";

/// Key the theme preference is stored under.
pub const THEME_KEY: &str = "theme";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the single progress record.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the stored record, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored value is not a
    /// progress record, or other storage errors.
    async fn get_progress(&self) -> Result<Option<ProgressRecord>, StorageError>;

    /// Overwrite the stored record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError>;

    /// Remove the record. Returns `false` when nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the delete fails.
    async fn delete_progress(&self) -> Result<bool, StorageError>;
}

/// Repository contract for UI preferences kept outside the progress record.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Stored theme. Unknown values read as `None`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the lookup fails.
    async fn get_theme(&self) -> Result<Option<Theme>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the theme cannot be stored.
    async fn save_theme(&self, theme: Theme) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Values are kept as the same strings the `SQLite` backend writes.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn write(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value);
        Ok(())
    }

    /// Store a raw value, bypassing serialization. Used to load foreign payloads.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_raw(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        self.write(key, value.into())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
        self.read(PROGRESS_KEY)?
            .map(|raw| ProgressRecord::from_json(&raw))
            .transpose()
    }

    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        self.write(PROGRESS_KEY, record.to_json()?)
    }

    async fn delete_progress(&self) -> Result<bool, StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.remove(PROGRESS_KEY).is_some())
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryRepository {
    async fn get_theme(&self) -> Result<Option<Theme>, StorageError> {
        Ok(self
            .read(THEME_KEY)?
            .and_then(|raw| raw.parse::<Theme>().ok()))
    }

    async fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.write(THEME_KEY, theme.as_str().to_owned())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub preferences: Arc<dyn PreferenceRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    /// Wrap an existing in-memory repository, keeping a handle for seeding.
    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let preferences: Arc<dyn PreferenceRepository> = Arc::new(repo);
        Self {
            progress,
            preferences,
        }
    }
}
