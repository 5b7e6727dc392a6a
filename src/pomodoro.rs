//! Pomodoro work sessions.
//!
//! A session is a plain blocking countdown: the store is only touched
//! after the work interval completes, when the elapsed time is logged to
//! the task. Interrupting the process mid-session therefore logs nothing
//! and cannot corrupt the data file.

use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_WORK_MINUTES: u64 = 25;
pub const DEFAULT_BREAK_MINUTES: u64 = 5;

#[derive(Debug, Clone, Copy)]
pub struct PomodoroTimer {
    work_minutes: u64,
    break_minutes: u64,
}

impl PomodoroTimer {
    pub fn new(work_minutes: u64, break_minutes: u64) -> Result<Self> {
        if work_minutes == 0 {
            return Err(Error::Validation(
                "work minutes must be at least 1".to_string(),
            ));
        }
        if break_minutes == 0 {
            return Err(Error::Validation(
                "break minutes must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            work_minutes,
            break_minutes,
        })
    }

    pub fn work_minutes(&self) -> u64 {
        self.work_minutes
    }

    pub fn break_minutes(&self) -> u64 {
        self.break_minutes
    }

    /// Hours to log against the task once the work interval completes
    pub fn work_hours(&self) -> f64 {
        self.work_minutes as f64 / 60.0
    }

    /// Block through the work interval, invoking `tick` with the remaining
    /// minutes before each one elapses.
    pub fn run_work_interval<F>(&self, mut tick: F)
    where
        F: FnMut(u64),
    {
        for remaining in (1..=self.work_minutes).rev() {
            tick(remaining);
            thread::sleep(Duration::from_secs(60));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_durations_are_rejected() {
        assert!(PomodoroTimer::new(0, 5).is_err());
        assert!(PomodoroTimer::new(25, 0).is_err());
    }

    #[test]
    fn work_hours_converts_minutes() {
        let timer = PomodoroTimer::new(25, 5).expect("timer");
        assert!((timer.work_hours() - 25.0 / 60.0).abs() < 1e-9);

        let timer = PomodoroTimer::new(90, 10).expect("timer");
        assert_eq!(timer.work_hours(), 1.5);
    }
}
