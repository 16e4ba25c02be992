//! Shared error types for the services crate.

use thiserror::Error;

use centurion_core::ProgressError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the AI coach backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoachError {
    #[error("AI coach is not configured")]
    Disabled,
    #[error("AI coach returned an empty response")]
    EmptyResponse,
    #[error("AI coach request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error("no progress record yet, run onboarding first")]
    NotOnboarded,
    #[error("onboarding already completed")]
    AlreadyOnboarded,
    #[error("today's workout is already done, come back tomorrow")]
    AlreadyTrainedToday,
    #[error("reset needs explicit confirmation")]
    ResetNotConfirmed,
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("export failed: {0}")]
    Export(#[from] std::io::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
