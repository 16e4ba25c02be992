use async_trait::async_trait;

use crate::record::ProgressRecord;
use crate::repository::{PROGRESS_KEY, ProgressRepository, StorageError};

use super::SqliteRepository;

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn get_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
        self.get_value(PROGRESS_KEY)
            .await?
            .map(|raw| ProgressRecord::from_json(&raw))
            .transpose()
    }

    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let raw = record.to_json()?;
        self.put_value(PROGRESS_KEY, &raw).await
    }

    async fn delete_progress(&self) -> Result<bool, StorageError> {
        self.delete_value(PROGRESS_KEY).await
    }
}
