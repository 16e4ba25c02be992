use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::coach::{CoachBackend, CoachSession, GeminiCoach};
use crate::error::AppServicesError;
use crate::preference_service::PreferenceService;
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    progress: Arc<ProgressService>,
    preferences: Arc<PreferenceService>,
    coach: Arc<dyn CoachBackend>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage, with the coach configured from env.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(
            &storage,
            clock,
            Arc::new(GeminiCoach::from_env()),
        ))
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, coach: Arc<dyn CoachBackend>) -> Self {
        let progress = Arc::new(ProgressService::new(clock, Arc::clone(&storage.progress)));
        let preferences = Arc::new(PreferenceService::from_env(Arc::clone(
            &storage.preferences,
        )));
        Self {
            progress,
            preferences,
            coach,
        }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn preferences(&self) -> Arc<PreferenceService> {
        Arc::clone(&self.preferences)
    }

    /// A fresh coach conversation.
    #[must_use]
    pub fn coach_session(&self) -> CoachSession {
        CoachSession::new(Arc::clone(&self.coach))
    }
}
