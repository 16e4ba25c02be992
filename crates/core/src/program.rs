//! Static definition of the 20-week program.

use std::ops::RangeInclusive;

//
// ─── CONSTANTS ────────────────────────────────────────────────────────────────
//

/// Length of the program in weeks.
pub const PROGRAM_WEEKS: u32 = 20;

/// Weeks whose third day is a max test instead of a normal workout.
pub const MAX_TEST_WEEKS: [u32; 4] = [4, 10, 16, 20];

/// Rest interval used when a phase id is not part of the table.
pub const DEFAULT_REST_INTERVAL_SECS: u32 = 90;

//
// ─── PHASES ───────────────────────────────────────────────────────────────────
//

/// One of the four sequential training blocks.
///
/// Each phase covers a contiguous, inclusive range of weeks and carries the
/// rest interval used between sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingPhase {
    pub id: u8,
    pub name: &'static str,
    pub description: &'static str,
    pub focus: &'static str,
    pub first_week: u32,
    pub last_week: u32,
    pub rest_interval_secs: u32,
}

impl TrainingPhase {
    /// Weeks belonging to this phase.
    #[must_use]
    pub fn weeks(&self) -> RangeInclusive<u32> {
        self.first_week..=self.last_week
    }

    #[must_use]
    pub fn contains_week(&self, week: u32) -> bool {
        self.weeks().contains(&week)
    }

    /// Whether this is the last phase of the program.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.id == final_phase().id
    }
}

/// The program table. Phases partition weeks `1..=20` in id order.
pub const PHASES: [TrainingPhase; 4] = [
    TrainingPhase {
        id: 1,
        name: "Phase 1: Foundations & Form",
        description: "Focus on strict form and neuromuscular adaptation.",
        focus: "Hypertrophy / Form",
        first_week: 1,
        last_week: 4,
        rest_interval_secs: 90,
    },
    TrainingPhase {
        id: 2,
        name: "Phase 2: Volume Accumulation",
        description: "Grease the Groove (GtG) and pyramid sets.",
        focus: "Volume",
        first_week: 5,
        last_week: 10,
        rest_interval_secs: 120,
    },
    TrainingPhase {
        id: 3,
        name: "Phase 3: Training Density",
        description: "Shorter rest periods and EMOM sets.",
        focus: "Endurance",
        first_week: 11,
        last_week: 16,
        rest_interval_secs: 45,
    },
    TrainingPhase {
        id: 4,
        name: "Phase 4: Peaking & Tapering",
        description: "High intensity, long rests, preparation for the final test.",
        focus: "Strength / Test",
        first_week: 17,
        last_week: 20,
        rest_interval_secs: 180,
    },
];

//
// ─── LOOKUPS ──────────────────────────────────────────────────────────────────
//

/// The last phase of the program.
#[must_use]
pub fn final_phase() -> &'static TrainingPhase {
    &PHASES[PHASES.len() - 1]
}

/// Find a phase by id.
#[must_use]
pub fn phase_by_id(id: u8) -> Option<&'static TrainingPhase> {
    PHASES.iter().find(|phase| phase.id == id)
}

/// Resolve the phase a week belongs to.
///
/// Total over all weeks: week 0 maps to the first phase and every week past
/// the end of the program keeps resolving to the final phase.
#[must_use]
pub fn phase_for_week(week: u32) -> &'static TrainingPhase {
    if week == 0 {
        return &PHASES[0];
    }
    PHASES
        .iter()
        .find(|phase| phase.contains_week(week))
        .unwrap_or_else(final_phase)
}

/// Rest interval for a phase id, falling back to the default for unknown ids.
#[must_use]
pub fn rest_interval_for(phase_id: u8) -> u32 {
    phase_by_id(phase_id).map_or(DEFAULT_REST_INTERVAL_SECS, |phase| phase.rest_interval_secs)
}

#[must_use]
pub fn is_test_week(week: u32) -> bool {
    MAX_TEST_WEEKS.contains(&week)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_partition_program_weeks() {
        let mut expected_first = 1;
        for (idx, phase) in PHASES.iter().enumerate() {
            assert_eq!(usize::from(phase.id), idx + 1);
            assert_eq!(phase.first_week, expected_first);
            assert!(phase.last_week >= phase.first_week);
            expected_first = phase.last_week + 1;
        }
        assert_eq!(expected_first, PROGRAM_WEEKS + 1);
    }

    #[test]
    fn every_test_week_closes_a_phase() {
        for week in MAX_TEST_WEEKS {
            assert!(PHASES.iter().any(|phase| phase.last_week == week));
        }
    }

    #[test]
    fn phase_for_week_resolves_ranges() {
        assert_eq!(phase_for_week(1).id, 1);
        assert_eq!(phase_for_week(4).id, 1);
        assert_eq!(phase_for_week(5).id, 2);
        assert_eq!(phase_for_week(10).id, 2);
        assert_eq!(phase_for_week(11).id, 3);
        assert_eq!(phase_for_week(16).id, 3);
        assert_eq!(phase_for_week(17).id, 4);
        assert_eq!(phase_for_week(20).id, 4);
    }

    #[test]
    fn phase_for_week_is_total() {
        assert_eq!(phase_for_week(0).id, 1);
        assert_eq!(phase_for_week(21).id, 4);
        assert_eq!(phase_for_week(u32::MAX).id, 4);
    }

    #[test]
    fn rest_interval_falls_back_for_unknown_phase() {
        assert_eq!(rest_interval_for(1), 90);
        assert_eq!(rest_interval_for(2), 120);
        assert_eq!(rest_interval_for(3), 45);
        assert_eq!(rest_interval_for(4), 180);
        assert_eq!(rest_interval_for(0), DEFAULT_REST_INTERVAL_SECS);
        assert_eq!(rest_interval_for(9), DEFAULT_REST_INTERVAL_SECS);
    }

    #[test]
    fn only_final_phase_is_final() {
        assert!(final_phase().is_final());
        assert!(!PHASES[0].is_final());
        assert_eq!(final_phase().id, 4);
    }
}
