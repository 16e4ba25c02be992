use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//
// ─── WORKOUT KIND ─────────────────────────────────────────────────────────────
//

/// Type tag attached to a daily prescription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutKind {
    /// One set to failure; no regular sets are prescribed.
    Test,
    /// Straight sets with reps in reserve.
    Standard,
    /// Many sub-maximal sets spread through the day.
    #[serde(rename = "GtG")]
    GreaseTheGroove,
    /// Symmetric pyramid around the base rep count.
    Pyramid,
    /// Every minute on the minute.
    #[serde(rename = "EMOM")]
    Emom,
    /// Heavy, low-volume sets with long rests.
    Peaking,
    /// Nothing prescribed.
    Rest,
}

impl WorkoutKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Test => "Test",
            WorkoutKind::Standard => "Standard",
            WorkoutKind::GreaseTheGroove => "GtG",
            WorkoutKind::Pyramid => "Pyramid",
            WorkoutKind::Emom => "EMOM",
            WorkoutKind::Peaking => "Peaking",
            WorkoutKind::Rest => "Rest",
        }
    }
}

//
// ─── PRESCRIPTION ─────────────────────────────────────────────────────────────
//

/// The set scheme for one training day.
///
/// An empty `sets` list means there is no regular workout: either a max test
/// (`WorkoutKind::Test`) or a rest day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutPrescription {
    pub title: String,
    pub sets: Vec<u32>,
    pub description: String,
    pub kind: WorkoutKind,
}

impl WorkoutPrescription {
    /// Sum of all prescribed reps.
    #[must_use]
    pub fn total_reps(&self) -> u32 {
        self.sets.iter().fold(0_u32, |acc, reps| acc.saturating_add(*reps))
    }

    #[must_use]
    pub fn is_test(&self) -> bool {
        self.kind == WorkoutKind::Test
    }

    /// True when nothing has to be performed (test or rest day).
    #[must_use]
    pub fn has_no_sets(&self) -> bool {
        self.sets.is_empty()
    }
}

//
// ─── WORKOUT LOG ──────────────────────────────────────────────────────────────
//

/// Record of one completed training day. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    pub date: DateTime<Utc>,
    pub phase: u8,
    pub week: u32,
    #[serde(default)]
    pub reps: Vec<u32>,
    pub completed: bool,
    #[serde(default)]
    pub total_reps: u32,
}

impl WorkoutLog {
    /// Log a completed day from the prescription that was performed.
    #[must_use]
    pub fn completed(
        date: DateTime<Utc>,
        phase: u8,
        week: u32,
        prescription: &WorkoutPrescription,
    ) -> Self {
        Self {
            date,
            phase,
            week,
            reps: prescription.sets.clone(),
            completed: true,
            total_reps: prescription.total_reps(),
        }
    }
}
