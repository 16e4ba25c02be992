#![forbid(unsafe_code)]

pub mod app_services;
pub mod coach;
pub mod error;
pub mod preference_service;
pub mod progress_service;

pub use centurion_core::Clock;

pub use app_services::AppServices;
pub use coach::{
    Citation, CoachBackend, CoachConfig, CoachMessage, CoachReply, CoachSession, GeminiCoach,
    Speaker,
};
pub use error::{AppServicesError, CoachError, ProgressServiceError};
pub use preference_service::PreferenceService;
pub use progress_service::{ChartView, ProgressService};
