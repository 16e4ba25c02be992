//! Max-test history statistics and chart geometry.

use crate::model::MaxRepsEntry;

/// Smallest value the chart's vertical axis reaches up to.
const MIN_AXIS_CEILING: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxHistoryStats {
    pub start: u32,
    pub current: u32,
    pub best: u32,
    pub growth: i64,
    pub growth_percent: i64,
    pub tests: usize,
}

impl MaxHistoryStats {
    /// Summarize the max history. Needs at least two entries.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_history(entries: &[MaxRepsEntry]) -> Option<Self> {
        let (first, last) = match entries {
            [first, .., last] => (first, last),
            _ => return None,
        };

        let growth = i64::from(last.reps) - i64::from(first.reps);
        let ratio = growth as f64 / f64::from(first.reps.max(1)) * 100.0;
        // Half-way values round up, also for negative growth.
        let growth_percent = (ratio + 0.5).floor() as i64;

        Some(Self {
            start: first.reps,
            current: last.reps,
            best: entries.iter().map(|entry| entry.reps).max().unwrap_or(last.reps),
            growth,
            growth_percent,
            tests: entries.len(),
        })
    }
}

/// Screen coordinates of each history point inside a `width` x `height` box.
///
/// The vertical axis runs from 0 to the larger of the best result and 10.
/// Returns an empty list with fewer than two entries.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn chart_points(
    entries: &[MaxRepsEntry],
    width: f64,
    height: f64,
    padding: f64,
) -> Vec<(f64, f64)> {
    if entries.len() < 2 {
        return Vec::new();
    }
    let ceiling = entries
        .iter()
        .map(|entry| entry.reps)
        .max()
        .unwrap_or(0)
        .max(MIN_AXIS_CEILING);
    let span = (entries.len() - 1) as f64;
    let inner_width = width - 2.0 * padding;
    let inner_height = height - 2.0 * padding;

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let x = padding + (idx as f64 / span) * inner_width;
            let y = (height - padding) - f64::from(entry.reps) / f64::from(ceiling) * inner_height;
            (x, y)
        })
        .collect()
}
