use std::env;
use std::sync::Arc;

use centurion_core::model::Theme;
use storage::repository::{PreferenceRepository, StorageError};
use tracing::{info, warn};

/// Reads and writes the display theme.
///
/// Without a stored choice the platform default applies, taken from
/// `CENTURION_THEME` or dark.
#[derive(Clone)]
pub struct PreferenceService {
    preferences: Arc<dyn PreferenceRepository>,
    default_theme: Theme,
}

impl PreferenceService {
    #[must_use]
    pub fn new(preferences: Arc<dyn PreferenceRepository>, default_theme: Theme) -> Self {
        Self {
            preferences,
            default_theme,
        }
    }

    #[must_use]
    pub fn from_env(preferences: Arc<dyn PreferenceRepository>) -> Self {
        Self::new(preferences, default_theme_from_env())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the preference cannot be read.
    pub async fn theme(&self) -> Result<Theme, StorageError> {
        Ok(self
            .preferences
            .get_theme()
            .await?
            .unwrap_or(self.default_theme))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the preference cannot be stored.
    pub async fn set_theme(&self, theme: Theme) -> Result<Theme, StorageError> {
        self.preferences.save_theme(theme).await?;
        info!(%theme, "theme saved");
        Ok(theme)
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the preference cannot be read or stored.
    pub async fn toggle_theme(&self) -> Result<Theme, StorageError> {
        let next = self.theme().await?.toggled();
        self.set_theme(next).await
    }
}

fn default_theme_from_env() -> Theme {
    match env::var("CENTURION_THEME") {
        Ok(raw) => raw.parse().unwrap_or_else(|err| {
            warn!(%err, "ignoring CENTURION_THEME");
            Theme::default()
        }),
        Err(_) => Theme::default(),
    }
}
