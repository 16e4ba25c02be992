use async_trait::async_trait;
use centurion_core::model::Theme;

use crate::repository::{PreferenceRepository, StorageError, THEME_KEY};

use super::SqliteRepository;

#[async_trait]
impl PreferenceRepository for SqliteRepository {
    async fn get_theme(&self) -> Result<Option<Theme>, StorageError> {
        Ok(self
            .get_value(THEME_KEY)
            .await?
            .and_then(|raw| raw.parse::<Theme>().ok()))
    }

    async fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.put_value(THEME_KEY, theme.as_str()).await
    }
}
