//! Month calendar of completed, scheduled and max-test days.

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::{UserProgress, weekday_index};
use crate::program::is_test_week;

/// How a single calendar day should be highlighted, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Completed,
    MaxTest,
    Missed,
    Upcoming,
    Rest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub completed: bool,
    pub scheduled: bool,
    pub past: bool,
    pub today: bool,
    pub max_test: bool,
}

impl CalendarDay {
    #[must_use]
    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    #[must_use]
    pub fn status(&self) -> DayStatus {
        if self.completed {
            DayStatus::Completed
        } else if self.max_test {
            DayStatus::MaxTest
        } else if self.scheduled && self.past {
            DayStatus::Missed
        } else if self.scheduled {
            DayStatus::Upcoming
        } else {
            DayStatus::Rest
        }
    }
}

/// A Monday-first month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the first day so it lands under its weekday.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

/// Program week a calendar date falls into, counted from the start date.
///
/// Weeks are aligned to Monday: the start week is padded by the start
/// date's ISO weekday.
#[must_use]
pub fn program_week_on(start: NaiveDate, date: NaiveDate) -> u32 {
    let elapsed = (date - start).num_days().unsigned_abs();
    let offset = u64::from(start.weekday().number_from_monday());
    u32::try_from((elapsed + offset).div_ceil(7)).unwrap_or(u32::MAX)
}

/// Build the calendar for the month containing `today`.
#[must_use]
pub fn month_view(progress: &UserProgress, today: NaiveDate) -> MonthView {
    let first = today - Duration::days(i64::from(today.day0()));
    let start = progress.start_date.date_naive();
    let test_weekday = progress.reminders.last_day();

    let days = first
        .iter_days()
        .take_while(|date| date.month() == first.month())
        .map(|date| {
            let weekday = weekday_index(date.weekday());
            let max_test = is_test_week(program_week_on(start, date))
                && test_weekday == Some(weekday);
            CalendarDay {
                date,
                completed: progress.trained_on(date),
                scheduled: progress.reminders.is_scheduled(date.weekday()),
                past: date < today,
                today: date == today,
                max_test,
            }
        })
        .collect();

    MonthView {
        year: first.year(),
        month: first.month(),
        leading_blanks: first.weekday().num_days_from_monday(),
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::advance_after_workout;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn program_week_counts_from_monday_aligned_start() {
        // 2024-01-01 is a Monday.
        let start = date(2024, 1, 1);
        assert_eq!(program_week_on(start, start), 1);
        assert_eq!(program_week_on(start, date(2024, 1, 7)), 1);
        assert_eq!(program_week_on(start, date(2024, 1, 8)), 2);
        assert_eq!(program_week_on(start, date(2024, 1, 22)), 4);

        // Starting on a Sunday puts the start date at the end of week 1.
        let sunday = date(2024, 1, 7);
        assert_eq!(program_week_on(sunday, sunday), 1);
        assert_eq!(program_week_on(sunday, date(2024, 1, 8)), 2);
    }

    #[test]
    fn month_grid_starts_on_monday() {
        let now = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
        let progress = UserProgress::onboard(12, now);
        let view = month_view(&progress, now.date_naive());

        assert_eq!((view.year, view.month), (2024, 2));
        assert_eq!(view.days.len(), 29);
        // 2024-02-01 is a Thursday.
        assert_eq!(view.leading_blanks, 3);
        assert!(view.days[9].today);
        assert!(view.days[0].past);
        assert!(!view.days[20].past);
    }

    #[test]
    fn marks_completed_scheduled_and_test_days() {
        // Program starts on Monday 2024-01-01; week 4 spans Jan 22-28.
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();
        let mut progress = UserProgress::onboard(12, start);
        let workout_day = Utc.with_ymd_and_hms(2024, 1, 3, 18, 0, 0).unwrap();
        progress = advance_after_workout(progress, workout_day);

        let today = date(2024, 1, 15);
        let view = month_view(&progress, today);

        let jan_3 = &view.days[2];
        assert!(jan_3.completed);
        assert_eq!(jan_3.status(), DayStatus::Completed);

        // Monday the 8th was scheduled and skipped.
        assert_eq!(view.days[7].status(), DayStatus::Missed);
        // Tuesday the 9th is not a training day.
        assert_eq!(view.days[8].status(), DayStatus::Rest);
        // Wednesday the 17th is still ahead.
        assert_eq!(view.days[16].status(), DayStatus::Upcoming);
        // Friday of week 4 is the max test.
        assert_eq!(view.days[25].status(), DayStatus::MaxTest);
        assert_eq!(view.days.iter().filter(|day| day.max_test).count(), 1);
    }
}
