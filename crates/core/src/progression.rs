use chrono::{DateTime, NaiveDate, Utc};

use crate::error::ProgressError;
use crate::model::{MaxRepsEntry, UserProgress, WorkoutKind, WorkoutLog, WorkoutPrescription};
use crate::program::{final_phase, is_test_week, phase_for_week};

//
// ─── CONSTANTS ────────────────────────────────────────────────────────────────
//

/// Training days per program week.
pub const DAYS_PER_WEEK: u8 = 3;

/// Day of a test week on which the max test happens.
pub const MAX_TEST_DAY: u8 = 3;

/// Fixed credit added to the daily volume counter for every completed workout.
pub const WORKOUT_DAILY_CREDIT: u32 = 20;

//
// ─── POSITION ─────────────────────────────────────────────────────────────────
//

/// Where the user stands in the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub phase: u8,
    pub week: u32,
    pub day: u8,
}

impl Position {
    /// Position after finishing the current day.
    ///
    /// The day wraps from 3 back to 1 and bumps the week. On a week rollover
    /// the phase advances when the new week leaves the phase containing the
    /// old week; the final phase never advances, so the program keeps running
    /// in that phase past its last week.
    #[must_use]
    pub fn next(self) -> Self {
        if self.day < DAYS_PER_WEEK {
            return Self {
                day: self.day + 1,
                ..self
            };
        }

        let week = self.week.saturating_add(1);
        let containing = phase_for_week(self.week);
        let phase = if week > containing.last_week && !containing.is_final() {
            self.phase.saturating_add(1).min(final_phase().id)
        } else {
            self.phase
        };

        Self { phase, week, day: 1 }
    }

    #[must_use]
    pub fn is_max_test_day(self) -> bool {
        is_max_test_day(self.week, self.day)
    }
}

/// Phase and week assigned from a max-rep assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartPosition {
    pub phase: u8,
    pub week: u32,
}

//
// ─── ENGINE ───────────────────────────────────────────────────────────────────
//

/// Map a max-rep count to the phase and week the user should start at.
#[must_use]
pub fn determine_start_week(max_reps: u32) -> StartPosition {
    let (phase, week) = match max_reps {
        0..=9 => (1, 1),
        10..=19 => (1, 3),
        20..=29 => (2, 5),
        30..=39 => (2, 8),
        _ => (3, 11),
    };
    StartPosition { phase, week }
}

/// True only on day 3 of a test week.
#[must_use]
pub fn is_max_test_day(week: u32, day: u8) -> bool {
    is_test_week(week) && day == MAX_TEST_DAY
}

/// `floor(reps * percent / 100)` in integer arithmetic.
fn percent_of(reps: u32, percent: u32) -> u32 {
    let scaled = u64::from(reps) * u64::from(percent) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Derive the set scheme for a day of the program.
///
/// Pure: identical inputs always produce identical prescriptions. Set targets
/// never go below zero.
#[must_use]
pub fn daily_workout(phase_id: u8, week: u32, day: u8, max_reps: u32) -> WorkoutPrescription {
    if is_max_test_day(week, day) {
        return WorkoutPrescription {
            title: "MAX TEST: NEW RECORD".to_owned(),
            sets: Vec::new(),
            description: "No sets today. One goal only: as many push-ups as possible in a \
                          single set to failure. The result decides your next phase."
                .to_owned(),
            kind: WorkoutKind::Test,
        };
    }

    let base = percent_of(max_reps, 60);
    let heading = |label: &str| format!("Week {week} - Day {day}: {label}");

    match phase_id {
        1 => WorkoutPrescription {
            title: heading("Foundations"),
            sets: vec![base, base, base.saturating_sub(1), base.saturating_sub(2)],
            description: "Keep 2-3 reps in reserve on every set. Slow two-second negatives."
                .to_owned(),
            kind: WorkoutKind::Standard,
        },
        2 if day == 2 => WorkoutPrescription {
            title: heading("Grease the Groove"),
            sets: vec![percent_of(max_reps, 40); 8],
            description: "Sub-maximal sets spread through the whole day. One set every hour."
                .to_owned(),
            kind: WorkoutKind::GreaseTheGroove,
        },
        2 => {
            let half = percent_of(base, 50);
            let three_quarters = percent_of(base, 75);
            WorkoutPrescription {
                title: heading("Pyramid"),
                sets: vec![half, three_quarters, base, three_quarters, half],
                description: "Pyramid session. Short breaks between the lighter sets.".to_owned(),
                kind: WorkoutKind::Pyramid,
            }
        }
        3 => WorkoutPrescription {
            title: heading("EMOM Density"),
            sets: vec![percent_of(max_reps, 30); 10],
            description: "Every Minute on the Minute. Do the target reps at the top of each \
                          minute and rest for the remainder."
                .to_owned(),
            kind: WorkoutKind::Emom,
        },
        4 => WorkoutPrescription {
            title: heading("Peaking"),
            sets: vec![
                percent_of(max_reps, 80),
                percent_of(max_reps, 90),
                percent_of(max_reps, 50),
            ],
            description: "High intensity. Long rests (3+ minutes) for full recovery.".to_owned(),
            kind: WorkoutKind::Peaking,
        },
        _ => WorkoutPrescription {
            title: "Rest".to_owned(),
            sets: Vec::new(),
            description: "Today is for rest and recovery.".to_owned(),
            kind: WorkoutKind::Rest,
        },
    }
}

/// Log the current day as completed and move to the next program position.
///
/// The log records the position the workout was performed at together with
/// the prescribed sets and their total.
#[must_use]
pub fn advance_after_workout(mut progress: UserProgress, now: DateTime<Utc>) -> UserProgress {
    let performed = progress.position();
    let prescription = progress.todays_workout();
    let next = performed.next();

    progress.history.push(WorkoutLog::completed(
        now,
        performed.phase,
        performed.week,
        &prescription,
    ));
    progress.current_phase = next.phase;
    progress.current_week = next.week;
    progress.current_day = next.day;
    progress.daily_progress = progress.daily_progress.saturating_add(WORKOUT_DAILY_CREDIT);
    progress
}

/// Store a new max-test result.
///
/// With `recalculate` the program position jumps to the start position for
/// the new max and the week restarts at day 1; otherwise only the max and its
/// history change.
#[must_use]
pub fn record_new_max(
    mut progress: UserProgress,
    rep_count: u32,
    recalculate: bool,
    now: DateTime<Utc>,
) -> UserProgress {
    progress
        .max_reps_history
        .push(MaxRepsEntry::new(now, rep_count));
    progress.max_reps = rep_count;

    if recalculate {
        let start = determine_start_week(rep_count);
        progress.current_phase = start.phase;
        progress.current_week = start.week;
        progress.current_day = 1;
    }
    progress
}

/// Parse a rep count typed by the user.
///
/// # Errors
///
/// Returns `ProgressError::InvalidRepCount` for empty, non-numeric or negative input.
pub fn parse_rep_count(raw: &str) -> Result<u32, ProgressError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ProgressError::InvalidRepCount {
            raw: raw.to_owned(),
        })
}

//
// ─── SESSION STATE ────────────────────────────────────────────────────────────
//

/// What the user should see for a given calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No progress record exists yet.
    Onboarding,
    /// A regular workout is due.
    NormalDay,
    /// The max test is due instead of a workout.
    MaxTestDay,
    /// A workout was already logged today.
    RecoveryDay,
}

#[must_use]
pub fn session_state(progress: Option<&UserProgress>, today: NaiveDate) -> SessionState {
    match progress {
        None => SessionState::Onboarding,
        Some(progress) if progress.trained_on(today) => SessionState::RecoveryDay,
        Some(progress) if progress.position().is_max_test_day() => SessionState::MaxTestDay,
        Some(_) => SessionState::NormalDay,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
