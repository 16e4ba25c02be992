use centurion_core::model::{
    DEFAULT_DAILY_GOAL, MaxRepsEntry, Reminders, UserProgress, WorkoutLog,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::repository::StorageError;

/// Persisted shape of the progress record.
///
/// Fields added after the first release are optional so records written by
/// older versions still load; [`ProgressRecord::into_progress`] fills them
/// with defaults. Field names follow the camelCase layout of exported files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub max_reps: u32,
    pub current_phase: u8,
    pub current_week: u32,
    pub current_day: u8,
    #[serde(default)]
    pub history: Vec<WorkoutLog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_reps_history: Option<Vec<MaxRepsEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_goal: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_progress: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_progress_update: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Reminders>,
    #[serde(default = "default_onboarding_complete")]
    pub onboarding_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
}

fn default_onboarding_complete() -> bool {
    true
}

/// Accepts ISO dates and the `Mon Jan 01 2024` form older records used.
/// Anything unreadable is treated as missing.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_calendar_date))
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%a %b %d %Y"))
        .ok()
}

impl ProgressRecord {
    #[must_use]
    pub fn from_progress(progress: &UserProgress) -> Self {
        Self {
            max_reps: progress.max_reps,
            current_phase: progress.current_phase,
            current_week: progress.current_week,
            current_day: progress.current_day,
            history: progress.history.clone(),
            max_reps_history: Some(progress.max_reps_history.clone()),
            daily_goal: Some(progress.daily_goal),
            daily_progress: Some(progress.daily_progress),
            last_progress_update: Some(progress.last_progress_update),
            reminders: Some(progress.reminders.clone()),
            onboarding_complete: progress.onboarding_complete,
            start_date: Some(progress.start_date),
        }
    }

    /// Convert into the domain record, patching fields older versions did not store.
    ///
    /// `now` stands in for a missing start date.
    #[must_use]
    pub fn into_progress(self, now: DateTime<Utc>) -> UserProgress {
        let start_date = self.start_date.unwrap_or(now);
        let max_reps_history = self
            .max_reps_history
            .unwrap_or_else(|| vec![MaxRepsEntry::new(start_date, self.max_reps)]);

        UserProgress {
            max_reps: self.max_reps,
            current_phase: self.current_phase,
            current_week: self.current_week,
            current_day: self.current_day,
            history: self.history,
            max_reps_history,
            daily_goal: self.daily_goal.unwrap_or(DEFAULT_DAILY_GOAL),
            daily_progress: self.daily_progress.unwrap_or(0),
            last_progress_update: self
                .last_progress_update
                .unwrap_or_else(|| start_date.date_naive()),
            reminders: self.reminders.unwrap_or_default(),
            onboarding_complete: self.onboarding_complete,
            start_date,
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the payload is not a progress record.
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        serde_json::from_str(raw).map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Indented JSON used for exports.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn to_pretty_json(&self) -> Result<String, StorageError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use centurion_core::progression::advance_after_workout;
    use centurion_core::time::fixed_now;

    #[test]
    fn domain_record_survives_storage_shape() {
        let now = fixed_now();
        let progress = advance_after_workout(UserProgress::onboard(25, now), now);

        let json = ProgressRecord::from_progress(&progress).to_json().unwrap();
        let restored = ProgressRecord::from_json(&json).unwrap().into_progress(now);

        assert_eq!(restored, progress);
    }

    #[test]
    fn uses_camel_case_field_names() {
        let record = ProgressRecord::from_progress(&UserProgress::onboard(12, fixed_now()));
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        for key in [
            "maxReps",
            "currentPhase",
            "currentWeek",
            "currentDay",
            "maxRepsHistory",
            "dailyGoal",
            "lastProgressUpdate",
            "onboardingComplete",
            "startDate",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn legacy_record_gets_defaults() {
        let raw = r#"{
            "maxReps": 18,
            "currentPhase": 1,
            "currentWeek": 3,
            "currentDay": 2,
            "startDate": "2024-03-04T08:00:00.000Z"
        }"#;
        let now = fixed_now();
        let progress = ProgressRecord::from_json(raw).unwrap().into_progress(now);

        let start = DateTime::parse_from_rfc3339("2024-03-04T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(progress.daily_goal, DEFAULT_DAILY_GOAL);
        assert_eq!(progress.daily_progress, 0);
        assert_eq!(progress.reminders, Reminders::default());
        assert_eq!(progress.max_reps_history, vec![MaxRepsEntry::new(start, 18)]);
        assert!(progress.history.is_empty());
        assert!(progress.onboarding_complete);
        assert_eq!(progress.last_progress_update, start.date_naive());
    }

    #[test]
    fn missing_start_date_falls_back_to_now() {
        let raw = r#"{"maxReps":5,"currentPhase":1,"currentWeek":1,"currentDay":1}"#;
        let now = fixed_now();
        let progress = ProgressRecord::from_json(raw).unwrap().into_progress(now);
        assert_eq!(progress.start_date, now);
        assert_eq!(progress.max_reps_history, vec![MaxRepsEntry::new(now, 5)]);
    }

    #[test]
    fn reads_both_date_layouts() {
        assert_eq!(
            parse_calendar_date("2024-03-04"),
            NaiveDate::from_ymd_opt(2024, 3, 4)
        );
        assert_eq!(
            parse_calendar_date("Mon Mar 04 2024"),
            NaiveDate::from_ymd_opt(2024, 3, 4)
        );
        assert_eq!(parse_calendar_date("yesterday"), None);

        let raw = r#"{"maxReps":5,"currentPhase":1,"currentWeek":1,"currentDay":1,
                      "lastProgressUpdate":"garbage"}"#;
        let record = ProgressRecord::from_json(raw).unwrap();
        assert_eq!(record.last_progress_update, None);
    }

    #[test]
    fn rejects_non_records() {
        assert!(matches!(
            ProgressRecord::from_json("[1,2,3]"),
            Err(StorageError::Serialization(_))
        ));
    }
}
