use crate::model::UserProgress;
use crate::program::{PROGRAM_WEEKS, is_test_week, phase_for_week};

/// One week on the 20-week program map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekCell {
    pub week: u32,
    pub phase_id: u8,
    pub test_week: bool,
    pub current: bool,
    pub past: bool,
    /// Phase name, present on the first week of each phase.
    pub phase_header: Option<&'static str>,
}

#[must_use]
pub fn program_map(progress: &UserProgress) -> Vec<WeekCell> {
    (1..=PROGRAM_WEEKS)
        .map(|week| {
            let phase = phase_for_week(week);
            WeekCell {
                week,
                phase_id: phase.id,
                test_week: is_test_week(week),
                current: week == progress.current_week,
                past: week < progress.current_week,
                phase_header: (week == phase.first_week).then_some(phase.name),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn map_covers_program_with_current_marker() {
        let progress = UserProgress::onboard(31, fixed_now());
        let cells = program_map(&progress);

        assert_eq!(cells.len(), 20);
        assert_eq!(cells.iter().filter(|cell| cell.current).count(), 1);
        assert!(cells[7].current);
        assert_eq!(cells.iter().filter(|cell| cell.past).count(), 7);
        assert_eq!(cells.iter().filter(|cell| cell.test_week).count(), 4);
    }

    #[test]
    fn headers_mark_phase_starts() {
        let progress = UserProgress::onboard(0, fixed_now());
        let headers: Vec<u32> = program_map(&progress)
            .iter()
            .filter(|cell| cell.phase_header.is_some())
            .map(|cell| cell.week)
            .collect();
        assert_eq!(headers, vec![1, 5, 11, 17]);
    }

    #[test]
    fn past_program_end_marks_everything_done() {
        let mut progress = UserProgress::onboard(0, fixed_now());
        progress.current_week = 23;
        let cells = program_map(&progress);
        assert!(cells.iter().all(|cell| cell.past && !cell.current));
    }
}
