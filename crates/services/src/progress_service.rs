use std::path::Path;
use std::sync::Arc;

use centurion_core::calendar::{MonthView, month_view};
use centurion_core::chart::MaxHistoryStats;
use centurion_core::dashboard::DashboardSummary;
use centurion_core::model::{MaxRepsEntry, UserProgress};
use centurion_core::program_map::{WeekCell, program_map};
use centurion_core::progression::{
    SessionState, advance_after_workout, parse_rep_count, record_new_max, session_state,
};
use storage::ProgressRecord;
use storage::repository::ProgressRepository;
use tracing::{debug, info};

use crate::Clock;
use crate::error::ProgressServiceError;

/// Max-test history together with its summary, if there are enough tests.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub history: Vec<MaxRepsEntry>,
    pub stats: Option<MaxHistoryStats>,
}

/// Loads, transforms and saves the single progress record.
///
/// Every mutating call reads the whole record, applies one pure transition
/// and writes the whole record back.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    progress: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { clock, progress }
    }

    /// Load the record, applying defaults for older records and the daily reset.
    ///
    /// A daily reset is written back immediately.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the record cannot be read or written.
    pub async fn load(&self) -> Result<Option<UserProgress>, ProgressServiceError> {
        let Some(record) = self.progress.get_progress().await? else {
            debug!("no progress record stored");
            return Ok(None);
        };

        let mut progress = record.into_progress(self.clock.now());
        if progress.sync_day(self.clock.today()) {
            self.save(&progress).await?;
            debug!(date = %progress.last_progress_update, "daily progress reset");
        }
        debug!(
            phase = progress.current_phase,
            week = progress.current_week,
            day = progress.current_day,
            "progress loaded"
        );
        Ok(Some(progress))
    }

    async fn require(&self) -> Result<UserProgress, ProgressServiceError> {
        self.load().await?.ok_or(ProgressServiceError::NotOnboarded)
    }

    async fn save(&self, progress: &UserProgress) -> Result<(), ProgressServiceError> {
        self.progress
            .save_progress(&ProgressRecord::from_progress(progress))
            .await?;
        Ok(())
    }

    /// What the user should see today.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the record cannot be read.
    pub async fn session_state(&self) -> Result<SessionState, ProgressServiceError> {
        let progress = self.load().await?;
        Ok(session_state(progress.as_ref(), self.clock.today()))
    }

    /// Create the record from an assessment result typed by the user.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRepCount` for bad input, `AlreadyOnboarded` if a record
    /// exists, or storage errors.
    pub async fn onboard(&self, raw_reps: &str) -> Result<UserProgress, ProgressServiceError> {
        let max_reps = parse_rep_count(raw_reps)?;
        if self.progress.get_progress().await?.is_some() {
            return Err(ProgressServiceError::AlreadyOnboarded);
        }

        let progress = UserProgress::onboard(max_reps, self.clock.now());
        self.save(&progress).await?;
        info!(
            max_reps,
            phase = progress.current_phase,
            week = progress.current_week,
            "onboarding complete"
        );
        Ok(progress)
    }

    /// Mark today's workout as done and move to the next day.
    ///
    /// # Errors
    ///
    /// Returns `NotOnboarded` without a record, `AlreadyTrainedToday` once a
    /// workout is logged for the current day, or storage errors.
    pub async fn complete_workout(&self) -> Result<UserProgress, ProgressServiceError> {
        let current = self.require().await?;
        if session_state(Some(&current), self.clock.today()) == SessionState::RecoveryDay {
            debug!(date = %self.clock.today(), "workout already logged today");
            return Err(ProgressServiceError::AlreadyTrainedToday);
        }
        let progress = advance_after_workout(current, self.clock.now());
        self.save(&progress).await?;
        info!(
            phase = progress.current_phase,
            week = progress.current_week,
            day = progress.current_day,
            "workout completed"
        );
        Ok(progress)
    }

    /// Store a max-test result typed by the user.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRepCount` for bad input, `NotOnboarded` without a
    /// record, or storage errors.
    pub async fn record_max(
        &self,
        raw_reps: &str,
        recalculate: bool,
    ) -> Result<UserProgress, ProgressServiceError> {
        let reps = parse_rep_count(raw_reps)?;
        let progress = record_new_max(self.require().await?, reps, recalculate, self.clock.now());
        self.save(&progress).await?;
        info!(reps, "new max recorded");
        if recalculate {
            info!(
                phase = progress.current_phase,
                week = progress.current_week,
                "plan adapted"
            );
        }
        Ok(progress)
    }

    /// # Errors
    ///
    /// Returns `NotOnboarded` without a record, or storage errors.
    pub async fn set_daily_goal(&self, goal: u32) -> Result<UserProgress, ProgressServiceError> {
        self.update(|progress| {
            progress.set_daily_goal(goal);
            Ok(())
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `NotOnboarded` without a record, or storage errors.
    pub async fn set_reminders_enabled(
        &self,
        enabled: bool,
    ) -> Result<UserProgress, ProgressServiceError> {
        self.update(|progress| {
            progress.reminders.enabled = enabled;
            Ok(())
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `NotOnboarded` without a record, or storage errors.
    pub async fn toggle_reminders(&self) -> Result<UserProgress, ProgressServiceError> {
        self.update(|progress| {
            progress.reminders.toggle();
            Ok(())
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `InvalidReminderTime` unless the input is `HH:MM`,
    /// `NotOnboarded` without a record, or storage errors.
    pub async fn set_reminder_time(&self, raw: &str) -> Result<UserProgress, ProgressServiceError> {
        self.update(|progress| progress.reminders.set_time(raw)).await
    }

    /// # Errors
    ///
    /// Returns `InvalidWeekday` for indices above 6, `NotOnboarded` without a
    /// record, or storage errors.
    pub async fn set_reminder_days(
        &self,
        days: &[u8],
    ) -> Result<UserProgress, ProgressServiceError> {
        self.update(|progress| progress.reminders.set_days(days))
            .await
    }

    async fn update<F>(&self, apply: F) -> Result<UserProgress, ProgressServiceError>
    where
        F: FnOnce(&mut UserProgress) -> Result<(), centurion_core::ProgressError>,
    {
        let mut progress = self.require().await?;
        apply(&mut progress)?;
        self.save(&progress).await?;
        Ok(progress)
    }

    /// # Errors
    ///
    /// Returns `NotOnboarded` without a record, or storage errors.
    pub async fn dashboard(&self) -> Result<DashboardSummary, ProgressServiceError> {
        let progress = self.require().await?;
        Ok(DashboardSummary::build(&progress, self.clock.today()))
    }

    /// # Errors
    ///
    /// Returns `NotOnboarded` without a record, or storage errors.
    pub async fn calendar(&self) -> Result<MonthView, ProgressServiceError> {
        let progress = self.require().await?;
        Ok(month_view(&progress, self.clock.today()))
    }

    /// # Errors
    ///
    /// Returns `NotOnboarded` without a record, or storage errors.
    pub async fn program_map(&self) -> Result<Vec<WeekCell>, ProgressServiceError> {
        let progress = self.require().await?;
        Ok(program_map(&progress))
    }

    /// # Errors
    ///
    /// Returns `NotOnboarded` without a record, or storage errors.
    pub async fn chart(&self) -> Result<ChartView, ProgressServiceError> {
        let progress = self.require().await?;
        let stats = MaxHistoryStats::from_history(&progress.max_reps_history);
        Ok(ChartView {
            history: progress.max_reps_history,
            stats,
        })
    }

    /// Full record as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns `NotOnboarded` without a record, or storage errors.
    pub async fn export_json(&self) -> Result<String, ProgressServiceError> {
        let progress = self.require().await?;
        Ok(ProgressRecord::from_progress(&progress).to_pretty_json()?)
    }

    /// Write the exported record to `path`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `Export` if the file cannot be written, plus the errors of
    /// [`Self::export_json`].
    pub async fn export_to(&self, path: &Path) -> Result<usize, ProgressServiceError> {
        let json = self.export_json().await?;
        tokio::fs::write(path, json.as_bytes()).await?;
        info!(path = %path.display(), bytes = json.len(), "progress exported");
        Ok(json.len())
    }

    /// Delete the record so the next start goes through onboarding.
    ///
    /// Returns whether a record existed.
    ///
    /// # Errors
    ///
    /// Returns `ResetNotConfirmed` unless `confirmed`, or storage errors.
    pub async fn reset(&self, confirmed: bool) -> Result<bool, ProgressServiceError> {
        if !confirmed {
            return Err(ProgressServiceError::ResetNotConfirmed);
        }
        let existed = self.progress.delete_progress().await?;
        info!(existed, "progress reset");
        Ok(existed)
    }
}
