use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ProgressError;

const DEFAULT_TIME: &str = "09:00";
const DEFAULT_DAYS: [u8; 3] = [1, 3, 5];

/// Training-day schedule used for reminders and the calendar.
///
/// `days` holds weekday indices with 0 = Sunday, kept sorted and unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminders {
    pub enabled: bool,
    pub time: String,
    pub days: Vec<u8>,
}

impl Default for Reminders {
    fn default() -> Self {
        Self {
            enabled: false,
            time: DEFAULT_TIME.to_owned(),
            days: DEFAULT_DAYS.to_vec(),
        }
    }
}

impl Reminders {
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Set the reminder time of day.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidReminderTime` unless `raw` is `HH:MM`.
    pub fn set_time(&mut self, raw: &str) -> Result<(), ProgressError> {
        let parsed = NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|_| {
            ProgressError::InvalidReminderTime {
                raw: raw.to_owned(),
            }
        })?;
        self.time = parsed.format("%H:%M").to_string();
        Ok(())
    }

    /// Replace the scheduled weekdays.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidWeekday` if any index is above 6.
    pub fn set_days(&mut self, days: &[u8]) -> Result<(), ProgressError> {
        if let Some(bad) = days.iter().find(|day| **day > 6) {
            return Err(ProgressError::InvalidWeekday(*bad));
        }
        let mut days = days.to_vec();
        days.sort_unstable();
        days.dedup();
        self.days = days;
        Ok(())
    }

    #[must_use]
    pub fn is_scheduled(&self, weekday: Weekday) -> bool {
        self.days.contains(&weekday_index(weekday))
    }

    /// The last scheduled day of the week, where max tests are placed on the calendar.
    #[must_use]
    pub fn last_day(&self) -> Option<u8> {
        self.days.last().copied()
    }
}

/// Weekday index with 0 = Sunday.
#[must_use]
pub fn weekday_index(weekday: Weekday) -> u8 {
    // num_days_from_sunday is always < 7
    u8::try_from(weekday.num_days_from_sunday()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_launch() {
        let reminders = Reminders::default();
        assert!(!reminders.enabled);
        assert_eq!(reminders.time, "09:00");
        assert_eq!(reminders.days, vec![1, 3, 5]);
    }

    #[test]
    fn set_time_normalizes_and_rejects_garbage() {
        let mut reminders = Reminders::default();
        reminders.set_time(" 7:05 ").unwrap();
        assert_eq!(reminders.time, "07:05");

        let err = reminders.set_time("25:00").unwrap_err();
        assert!(matches!(err, ProgressError::InvalidReminderTime { .. }));
        assert_eq!(reminders.time, "07:05");
    }

    #[test]
    fn set_days_sorts_and_dedups() {
        let mut reminders = Reminders::default();
        reminders.set_days(&[6, 0, 6, 2]).unwrap();
        assert_eq!(reminders.days, vec![0, 2, 6]);
        assert_eq!(reminders.last_day(), Some(6));
        assert!(reminders.is_scheduled(Weekday::Sun));
        assert!(!reminders.is_scheduled(Weekday::Mon));

        assert_eq!(
            reminders.set_days(&[1, 7]).unwrap_err(),
            ProgressError::InvalidWeekday(7)
        );
    }

    #[test]
    fn toggle_flips_enabled() {
        let mut reminders = Reminders::default();
        reminders.toggle();
        assert!(reminders.enabled);
        reminders.toggle();
        assert!(!reminders.enabled);
    }
}
