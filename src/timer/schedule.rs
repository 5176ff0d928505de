//! Simulated schedules.
//!
//! Runs a timer through whole work/break cycles on a [`ManualClock`], the
//! same way an interactive front end would drive it, and records each
//! interval.

use std::collections::BTreeMap;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::PomodoroError;
use crate::timer::driver::{Clock, ManualClock, TimerDriver};
use crate::timer::machine::{SessionTimer, TimerSnapshot};
use crate::timer::session::SessionType;

/// One simulated interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    /// Position in the schedule, starting at 1
    pub index: usize,
    pub session_type: SessionType,
    /// Seconds from the start of the schedule
    pub starts_at: f64,
    pub duration: f64,
    /// State text shown while the interval runs
    pub description: &'static str,
    /// Work sessions completed once the interval ends
    pub completed_work_sessions: u32,
    /// Category credited, for work intervals
    pub category: Option<String>,
}

/// Result of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub cycles: u32,
    pub entries: Vec<ScheduleEntry>,
    pub total_seconds: f64,
    pub category_totals: BTreeMap<String, f64>,
    /// Timer state after the last interval
    pub final_state: TimerSnapshot,
}

impl Schedule {
    /// Seconds spent working across the schedule.
    #[must_use]
    pub fn work_seconds(&self) -> f64 {
        self.entries
            .iter()
            .filter(|entry| entry.session_type == SessionType::Work)
            .map(|entry| entry.duration)
            .sum()
    }
}

/// Run `cycles` work+break cycles starting at `start`.
///
/// The timer must be waiting to start work.
///
/// # Errors
///
/// Returns `PomodoroError::InvalidTransition` if the timer is not ready for work.
pub fn simulate(
    timer: SessionTimer,
    cycles: u32,
    start: DateTime<Utc>,
) -> Result<Schedule, PomodoroError> {
    let mut driver = TimerDriver::new(timer, ManualClock::new(start), StdDuration::from_secs(1));
    let mut entries = Vec::new();

    for _ in 0..cycles {
        driver.start_or_resume()?;
        entries.push(run_interval(&mut driver, start, entries.len() + 1)?);
        driver.start_break()?;
        entries.push(run_interval(&mut driver, start, entries.len() + 1)?);
    }

    let total_seconds = seconds_between(start, driver.clock().now());
    let final_state = driver.snapshot();

    Ok(Schedule {
        cycles,
        entries,
        total_seconds,
        category_totals: final_state.categories.clone(),
        final_state,
    })
}

fn run_interval(
    driver: &mut TimerDriver<ManualClock>,
    start: DateTime<Utc>,
    index: usize,
) -> Result<ScheduleEntry, PomodoroError> {
    let started = driver.clock().now();
    let session_type = driver.timer().current_session_type();
    let description = driver.timer().state_description();

    loop {
        let wait = driver
            .time_until_next_tick()
            .ok_or_else(|| PomodoroError::InvalidTransition {
                command: "tick",
                phase: "paused".to_string(),
            })?;
        // Jump straight to the end of the interval; the machine measures the gap.
        let remaining = StdDuration::try_from_secs_f64(driver.timer().time_remaining())
            .unwrap_or(StdDuration::ZERO);
        driver.clock().advance(wait.max(remaining));

        if let Some(completion) = driver.poll() {
            return Ok(ScheduleEntry {
                index,
                session_type,
                starts_at: seconds_between(start, started),
                duration: seconds_between(started, driver.clock().now()),
                description,
                completed_work_sessions: completion.completed_work_sessions,
                category: completion.category,
            });
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::session::TimerSettings;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_single_cycle() {
        let schedule = simulate(SessionTimer::default(), 1, t0()).unwrap();

        assert_eq!(schedule.entries.len(), 2);
        assert_eq!(schedule.entries[0].session_type, SessionType::Work);
        assert_eq!(schedule.entries[0].duration, 1500.0);
        assert_eq!(schedule.entries[0].description, "Work Time - Stay Focused!");
        assert_eq!(schedule.entries[1].session_type, SessionType::ShortBreak);
        assert_eq!(schedule.entries[1].starts_at, 1500.0);
        assert_eq!(schedule.entries[1].duration, 300.0);
        assert_eq!(schedule.total_seconds, 1800.0);
        assert_eq!(schedule.category_totals.get("General"), Some(&1500.0));
    }

    #[test]
    fn test_four_cycles_end_with_long_break() {
        let schedule = simulate(SessionTimer::default(), 4, t0()).unwrap();

        let kinds: Vec<SessionType> = schedule.entries.iter().map(|e| e.session_type).collect();
        assert_eq!(
            kinds,
            vec![
                SessionType::Work,
                SessionType::ShortBreak,
                SessionType::Work,
                SessionType::ShortBreak,
                SessionType::Work,
                SessionType::ShortBreak,
                SessionType::Work,
                SessionType::LongBreak,
            ]
        );
        assert_eq!(schedule.work_seconds(), 6000.0);
        assert_eq!(schedule.final_state.completed_work_sessions, 0);
        assert_eq!(schedule.final_state.state_description, "Ready to Start");
    }

    #[test]
    fn test_credits_selected_category() {
        let mut timer = SessionTimer::new(TimerSettings::new(60.0, 10.0, 20.0, 2).unwrap());
        timer.add_category("Code").unwrap();
        timer.select_category("Code").unwrap();

        let schedule = simulate(timer, 3, t0()).unwrap();

        assert_eq!(schedule.category_totals.get("Code"), Some(&180.0));
        assert_eq!(schedule.category_totals.get("General"), Some(&0.0));
        assert_eq!(schedule.entries[0].category.as_deref(), Some("Code"));
    }

    #[test]
    fn test_long_intervals_take_one_tick_each() {
        let timer = SessionTimer::new(TimerSettings::from_minutes(100_000, 1, 1, 4).unwrap());
        let schedule = simulate(timer, 1000, t0()).unwrap();

        assert_eq!(schedule.entries.len(), 2000);
        assert_eq!(schedule.entries[0].duration, 6_000_000.0);
        assert_eq!(schedule.work_seconds(), 6_000_000_000.0);
        assert_eq!(schedule.final_state.completed_work_sessions, 0);
    }

    #[test]
    fn test_zero_cycles() {
        let schedule = simulate(SessionTimer::default(), 0, t0()).unwrap();
        assert!(schedule.entries.is_empty());
        assert_eq!(schedule.total_seconds, 0.0);
    }

    #[test]
    fn test_requires_ready_timer() {
        let mut timer = SessionTimer::default();
        timer.start_or_resume(t0()).unwrap();

        assert!(simulate(timer, 1, t0()).is_err());
    }
}
