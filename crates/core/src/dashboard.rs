use chrono::NaiveDate;

use crate::model::{UserProgress, WorkoutPrescription};
use crate::program::TrainingPhase;
use crate::progression::{Position, SessionState, session_state};

/// Everything the home screen shows for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub state: SessionState,
    pub position: Position,
    pub phase: Option<&'static TrainingPhase>,
    pub workout: WorkoutPrescription,
    pub planned_reps: u32,
    pub daily_goal: u32,
    pub daily_progress: u32,
    pub goal_percent: u32,
    pub remaining_for_goal: u32,
}

impl DashboardSummary {
    #[must_use]
    pub fn build(progress: &UserProgress, today: NaiveDate) -> Self {
        let workout = progress.todays_workout();
        let planned_reps = workout.total_reps();
        let goal = progress.daily_goal.max(1);
        let percent = u64::from(progress.daily_progress) * 100 / u64::from(goal);

        Self {
            state: session_state(Some(progress), today),
            position: progress.position(),
            phase: progress.phase(),
            workout,
            planned_reps,
            daily_goal: progress.daily_goal,
            daily_progress: progress.daily_progress,
            goal_percent: u32::try_from(percent.min(100)).unwrap_or(100),
            remaining_for_goal: progress.daily_goal.saturating_sub(progress.daily_progress),
        }
    }

    #[must_use]
    pub fn trained_today(&self) -> bool {
        self.state == SessionState::RecoveryDay
    }

    /// One-line nudge toward the daily volume goal.
    #[must_use]
    pub fn coach_hint(&self) -> String {
        if self.remaining_for_goal > 0 {
            format!(
                "You still need {} push-ups. Spread them over 2-3 easy sets this afternoon (GtG).",
                self.remaining_for_goal
            )
        } else {
            "Daily quota reached. Focus on recovery!".to_owned()
        }
    }
}
