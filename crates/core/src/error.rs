use thiserror::Error;

/// Validation errors raised by user-facing progress operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("invalid rep count: {raw:?} (expected a non-negative whole number)")]
    InvalidRepCount { raw: String },

    #[error("invalid reminder time: {raw:?} (expected HH:MM)")]
    InvalidReminderTime { raw: String },

    #[error("weekday index must be between 0 and 6, got {0}")]
    InvalidWeekday(u8),

    #[error("unknown theme: {0:?}")]
    UnknownTheme(String),

    #[error("unknown guide topic: {0:?}")]
    UnknownGuideTopic(String),
}
