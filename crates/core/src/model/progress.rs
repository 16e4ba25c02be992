use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Reminders, WorkoutLog, WorkoutPrescription};
use crate::program::{TrainingPhase, phase_by_id, rest_interval_for};
use crate::progression::{Position, daily_workout, determine_start_week};

/// Daily volume target given to new users and to records saved before goals existed.
pub const DEFAULT_DAILY_GOAL: u32 = 50;

/// One max-test result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxRepsEntry {
    pub date: DateTime<Utc>,
    pub reps: u32,
}

impl MaxRepsEntry {
    #[must_use]
    pub fn new(date: DateTime<Utc>, reps: u32) -> Self {
        Self { date, reps }
    }
}

/// The single mutable progress record of the user.
///
/// `history` and `max_reps_history` are append-only and kept in
/// chronological (insertion) order. Transitions live in
/// [`crate::progression`]; this type only carries state and small setters.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProgress {
    pub max_reps: u32,
    pub current_phase: u8,
    pub current_week: u32,
    pub current_day: u8,
    pub history: Vec<WorkoutLog>,
    pub max_reps_history: Vec<MaxRepsEntry>,
    pub daily_goal: u32,
    pub daily_progress: u32,
    pub last_progress_update: NaiveDate,
    pub reminders: Reminders,
    pub onboarding_complete: bool,
    pub start_date: DateTime<Utc>,
}

impl UserProgress {
    /// Build the initial record from the entry assessment.
    #[must_use]
    pub fn onboard(max_reps: u32, now: DateTime<Utc>) -> Self {
        let start = determine_start_week(max_reps);
        Self {
            max_reps,
            current_phase: start.phase,
            current_week: start.week,
            current_day: 1,
            history: Vec::new(),
            max_reps_history: vec![MaxRepsEntry::new(now, max_reps)],
            daily_goal: DEFAULT_DAILY_GOAL,
            daily_progress: 0,
            last_progress_update: now.date_naive(),
            reminders: Reminders::default(),
            onboarding_complete: true,
            start_date: now,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            phase: self.current_phase,
            week: self.current_week,
            day: self.current_day,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Option<&'static TrainingPhase> {
        phase_by_id(self.current_phase)
    }

    /// Rest interval between sets for the current phase.
    #[must_use]
    pub fn rest_interval_secs(&self) -> u32 {
        rest_interval_for(self.current_phase)
    }

    /// Prescription for the current program position.
    #[must_use]
    pub fn todays_workout(&self) -> WorkoutPrescription {
        daily_workout(
            self.current_phase,
            self.current_week,
            self.current_day,
            self.max_reps,
        )
    }

    /// Reset the daily volume counter when the calendar day changed.
    ///
    /// Returns `true` if a reset happened.
    pub fn sync_day(&mut self, today: NaiveDate) -> bool {
        if self.last_progress_update == today {
            return false;
        }
        self.daily_progress = 0;
        self.last_progress_update = today;
        true
    }

    /// Whether a workout was logged on the given calendar date.
    #[must_use]
    pub fn trained_on(&self, date: NaiveDate) -> bool {
        self.history.iter().any(|log| log.date.date_naive() == date)
    }

    pub fn set_daily_goal(&mut self, goal: u32) {
        self.daily_goal = goal;
    }

    /// Compact context line handed to the AI coach.
    #[must_use]
    pub fn stats_summary(&self) -> String {
        format!(
            "Max reps: {}, Phase: {}, Week: {}",
            self.max_reps, self.current_phase, self.current_week
        )
    }
}
