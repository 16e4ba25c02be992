//! Workout helpers: the rest countdown and the 2-0-1 tempo cue.

use std::time::Duration;

use crate::program::rest_interval_for;

/// Length of one tempo cycle: two seconds down, one second up.
const TEMPO_CYCLE_MS: u128 = 3000;
const TEMPO_DOWN_MS: u128 = 2000;

/// Result of advancing the rest timer by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Timer is paused; nothing changed.
    Idle,
    Running { remaining: u32 },
    /// The countdown just hit zero and stopped.
    Finished,
}

/// Countdown between sets, driven one second at a time by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestTimer {
    duration: u32,
    remaining: u32,
    running: bool,
}

impl RestTimer {
    #[must_use]
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration: duration_secs,
            remaining: duration_secs,
            running: false,
        }
    }

    /// Timer preset to the rest interval of a phase.
    #[must_use]
    pub fn for_phase(phase_id: u8) -> Self {
        Self::new(rest_interval_for(phase_id))
    }

    /// Start or pause. A finished timer restarts from the full duration.
    pub fn toggle(&mut self) {
        if self.running {
            self.running = false;
            return;
        }
        if self.remaining == 0 {
            self.remaining = self.duration;
        }
        self.running = self.remaining > 0;
    }

    pub fn tick(&mut self) -> TimerTick {
        if !self.running {
            return TimerTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TimerTick::Finished
        } else {
            TimerTick::Running {
                remaining: self.remaining,
            }
        }
    }

    /// Stop and restore the full duration.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.duration;
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        !self.running && self.remaining == 0
    }

    /// Remaining time as `m:ss`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

/// Phase of the 2-0-1 tempo: two seconds lowering, one second pushing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempoCue {
    Down,
    Up,
}

impl TempoCue {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Down => "DOWN (2s)",
            Self::Up => "UP (1s)",
        }
    }
}

#[must_use]
pub fn tempo_cue(elapsed: Duration) -> TempoCue {
    if elapsed.as_millis() % TEMPO_CYCLE_MS < TEMPO_DOWN_MS {
        TempoCue::Down
    } else {
        TempoCue::Up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_presets_follow_rest_intervals() {
        assert_eq!(RestTimer::for_phase(1).remaining(), 90);
        assert_eq!(RestTimer::for_phase(3).remaining(), 45);
        assert_eq!(RestTimer::for_phase(4).display(), "3:00");
        assert_eq!(RestTimer::for_phase(9).remaining(), 90);
    }

    #[test]
    fn paused_timer_does_not_move() {
        let mut timer = RestTimer::new(5);
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert_eq!(timer.remaining(), 5);
    }

    #[test]
    fn countdown_finishes_and_stops() {
        let mut timer = RestTimer::new(2);
        timer.toggle();
        assert!(timer.is_running());
        assert_eq!(timer.tick(), TimerTick::Running { remaining: 1 });
        assert_eq!(timer.tick(), TimerTick::Finished);
        assert!(timer.is_finished());
        assert_eq!(timer.tick(), TimerTick::Idle);

        timer.toggle();
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), 2);
    }

    #[test]
    fn pause_and_reset() {
        let mut timer = RestTimer::new(65);
        timer.toggle();
        timer.tick();
        timer.toggle();
        assert!(!timer.is_running());
        assert_eq!(timer.display(), "1:04");

        timer.reset();
        assert_eq!(timer.remaining(), timer.duration());
        assert!(!timer.is_running());
    }

    #[test]
    fn zero_length_timer_never_runs() {
        let mut timer = RestTimer::new(0);
        timer.toggle();
        assert!(!timer.is_running());
        assert!(timer.is_finished());
    }

    #[test]
    fn tempo_is_two_down_one_up() {
        assert_eq!(tempo_cue(Duration::from_millis(0)), TempoCue::Down);
        assert_eq!(tempo_cue(Duration::from_millis(1999)), TempoCue::Down);
        assert_eq!(tempo_cue(Duration::from_millis(2000)), TempoCue::Up);
        assert_eq!(tempo_cue(Duration::from_millis(2999)), TempoCue::Up);
        assert_eq!(tempo_cue(Duration::from_millis(3000)), TempoCue::Down);
        assert_eq!(TempoCue::Up.label(), "UP (1s)");
    }
}
