//! Plain-text views printed by the CLI.

use centurion_core::calendar::{DayStatus, MonthView};
use centurion_core::chart::chart_points;
use centurion_core::dashboard::DashboardSummary;
use centurion_core::guide::GuideTopic;
use centurion_core::model::{Reminders, UserProgress, WorkoutPrescription};
use centurion_core::program::phase_by_id;
use centurion_core::program_map::WeekCell;
use centurion_core::progression::SessionState;
use centurion_core::tools::{RestTimer, TempoCue};
use services::{ChartView, CoachMessage, Speaker};

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CHART_COLS: usize = 40;
const CHART_ROWS: usize = 10;

fn sets_line(sets: &[u32]) -> String {
    sets.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" / ")
}

pub fn workout(prescription: &WorkoutPrescription, rest_secs: u32) -> String {
    let mut lines = vec![
        format!("{} [{}]", prescription.title, prescription.kind.as_str()),
        prescription.description.clone(),
    ];
    if prescription.has_no_sets() {
        return lines.join("\n");
    }
    lines.push(format!("Sets:  {}", sets_line(&prescription.sets)));
    lines.push(format!(
        "Total: {} reps, rest {}s between sets",
        prescription.total_reps(),
        rest_secs
    ));
    lines.join("\n")
}

pub fn dashboard(summary: &DashboardSummary) -> String {
    let phase = summary.phase.map_or("Unknown phase", |phase| phase.name);
    let mut lines = vec![
        format!(
            "{phase} | week {} | day {}",
            summary.position.week, summary.position.day
        ),
        format!(
            "Daily goal: {}/{} ({}%)",
            summary.daily_progress, summary.daily_goal, summary.goal_percent
        ),
    ];

    match summary.state {
        SessionState::RecoveryDay => {
            lines.push("Workout done today. Recovery mode.".to_owned());
        }
        SessionState::MaxTestDay => {
            lines.push("MAX TEST DAY: do one set to failure, then run `centurion max <reps>`."
                .to_owned());
        }
        SessionState::NormalDay | SessionState::Onboarding => {
            lines.push(format!(
                "Today: {} ({} reps planned)",
                summary.workout.title, summary.planned_reps
            ));
        }
    }
    lines.push(summary.coach_hint());
    lines.join("\n")
}

pub fn reminders(reminders: &Reminders) -> String {
    let days = reminders
        .days
        .iter()
        .filter_map(|day| WEEKDAY_NAMES.get(usize::from(*day)).copied())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Reminders {} at {} on {}",
        if reminders.enabled { "on" } else { "off" },
        reminders.time,
        if days.is_empty() { "no days" } else { &days }
    )
}

pub fn progress_line(progress: &UserProgress) -> String {
    format!(
        "Max {} | phase {} | week {} | day {}",
        progress.max_reps, progress.current_phase, progress.current_week, progress.current_day
    )
}

fn day_marker(status: DayStatus) -> char {
    match status {
        DayStatus::Completed => '*',
        DayStatus::MaxTest => '!',
        DayStatus::Missed => 'x',
        DayStatus::Upcoming => '+',
        DayStatus::Rest => ' ',
    }
}

/// Monday-first month grid. Each cell is the day number and a status marker.
pub fn calendar(view: &MonthView) -> String {
    let mut lines = vec![
        format!("{:04}-{:02}", view.year, view.month),
        " Mo  Tu  We  Th  Fr  Sa  Su".to_owned(),
    ];
    let mut row = "    ".repeat(view.leading_blanks as usize);
    let mut filled = view.leading_blanks as usize;

    for day in &view.days {
        let open = if day.today { '[' } else { ' ' };
        row.push(open);
        row.push_str(&format!("{:>2}", day.day_of_month()));
        row.push(day_marker(day.status()));
        filled += 1;
        if filled % 7 == 0 {
            lines.push(row.trim_end().to_owned());
            row.clear();
        }
    }
    if !row.is_empty() {
        lines.push(row.trim_end().to_owned());
    }
    lines.push("* done  ! max test  x missed  + planned  [today".to_owned());
    lines.join("\n")
}

pub fn program_map(cells: &[WeekCell]) -> String {
    let mut lines = Vec::new();
    let mut row = String::new();
    for cell in cells {
        if let Some(header) = cell.phase_header {
            if !row.is_empty() {
                lines.push(std::mem::take(&mut row));
            }
            let rest = phase_by_id(cell.phase_id).map_or(0, |phase| phase.rest_interval_secs);
            lines.push(format!("{header} (rest {rest}s)"));
        }
        let marker = if cell.current {
            '>'
        } else if cell.past {
            '#'
        } else {
            ' '
        };
        let test = if cell.test_week { 'T' } else { ' ' };
        row.push_str(&format!(" {marker}W{:02}{test}", cell.week));
    }
    if !row.is_empty() {
        lines.push(row);
    }
    lines.push("> current  # done  T max test week".to_owned());
    lines.join("\n")
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn chart(view: &ChartView) -> String {
    let Some(stats) = view.stats else {
        return "Record at least two max tests to see your progress chart.".to_owned();
    };

    let points = chart_points(
        &view.history,
        (CHART_COLS - 1) as f64,
        (CHART_ROWS - 1) as f64,
        0.0,
    );
    let mut grid = vec![vec![' '; CHART_COLS]; CHART_ROWS];
    for (x, y) in points {
        let col = (x.round().max(0.0) as usize).min(CHART_COLS - 1);
        let row = (y.round().max(0.0) as usize).min(CHART_ROWS - 1);
        grid[row][col] = '*';
    }

    let mut lines: Vec<String> = grid
        .into_iter()
        .map(|row| format!("|{}", row.into_iter().collect::<String>().trim_end()))
        .collect();
    lines.push(format!("+{}", "-".repeat(CHART_COLS)));
    lines.push(format!(
        "Start {} | current {} | best {} | growth {:+} ({:+}%) over {} tests",
        stats.start, stats.current, stats.best, stats.growth, stats.growth_percent, stats.tests
    ));
    lines.join("\n")
}

pub fn timer_line(timer: &RestTimer, cue: TempoCue) -> String {
    format!("Rest {}  | tempo 2-0-1: {}", timer.display(), cue.label())
}

pub fn coach_message(message: &CoachMessage) -> String {
    let who = match message.speaker {
        Speaker::User => "You",
        Speaker::Coach => "Coach",
    };
    let mut lines = vec![format!("{who}: {}", message.content)];
    for citation in &message.citations {
        lines.push(format!("  - {} <{}>", citation.title, citation.uri));
    }
    lines.join("\n")
}

pub fn guide(topic: GuideTopic) -> String {
    let page = topic.page();
    let tabs = GuideTopic::ALL
        .iter()
        .map(|tab| {
            if *tab == topic {
                format!("[{tab}]")
            } else {
                tab.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    let mut lines = vec![tabs, String::new(), page.title.to_uppercase()];
    for entry in page.entries {
        lines.push(String::new());
        lines.push(entry.heading.to_owned());
        lines.push(format!("  {}", entry.body));
    }
    if let Some(closing) = page.closing {
        lines.push(String::new());
        lines.push(format!("\"{closing}\""));
    }
    lines.join("\n")
}
