mod progress;
mod reminders;
mod theme;
mod workout;

pub use progress::{DEFAULT_DAILY_GOAL, MaxRepsEntry, UserProgress};
pub use reminders::{Reminders, weekday_index};
pub use theme::Theme;
pub use workout::{WorkoutKind, WorkoutLog, WorkoutPrescription};
