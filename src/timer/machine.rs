//! The Pomodoro session state machine.
//!
//! A [`SessionTimer`] alternates between work and break intervals. It never
//! reads the clock itself: every command that starts counting and every tick
//! receives the current time from its caller.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;

use crate::error::PomodoroError;
use crate::timer::categories::Categories;
use crate::timer::format::time_string;
use crate::timer::session::{Phase, SessionType, TimerSettings};

/// Outcome of an interval reaching zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Completion {
    /// Interval that just ended
    pub finished: SessionType,
    /// Interval the timer is now waiting to start
    pub next: SessionType,
    /// Work seconds credited to a category (zero for breaks)
    pub credited_seconds: f64,
    /// Category that received the credit
    pub category: Option<String>,
    /// Work sessions completed since the last long break
    pub completed_work_sessions: u32,
}

/// Read-only view of everything a front end renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub session_type: SessionType,
    pub running: bool,
    pub time_remaining: f64,
    pub time_string: String,
    pub state_description: &'static str,
    pub progress: f64,
    pub completed_work_sessions: u32,
    pub work_sessions_before_long_break: u32,
    pub categories: BTreeMap<String, f64>,
    pub selected_category: String,
}

/// Pomodoro session timer.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    settings: TimerSettings,
    time_remaining: f64,
    phase: Phase,
    current_session_type: SessionType,
    completed_work_sessions: u32,
    /// Set exactly while running.
    last_tick: Option<DateTime<Utc>>,
    categories: Categories,
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

impl SessionTimer {
    /// Create a timer waiting to start its first work interval.
    #[must_use]
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            settings,
            time_remaining: settings.work_duration,
            phase: Phase::Paused,
            current_session_type: SessionType::Work,
            completed_work_sessions: 0,
            last_tick: None,
            categories: Categories::new(),
        }
    }

    /// Start a work interval, or resume a paused one.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::InvalidTransition` if the timer is running or
    /// is waiting for a break to be started.
    pub fn start_or_resume(&mut self, now: DateTime<Utc>) -> Result<(), PomodoroError> {
        if self.phase.is_running() || self.current_session_type != SessionType::Work {
            return Err(self.reject("start work"));
        }

        self.current_session_type = SessionType::Work;
        self.phase = Phase::Work;
        self.last_tick = Some(now);
        debug!("Work started with {:.1}s remaining", self.time_remaining);
        Ok(())
    }

    /// Start the break earned by the last work interval.
    ///
    /// The break always starts from its full configured length.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::InvalidTransition` if the timer is running or
    /// the next interval is work.
    pub fn start_break(&mut self, now: DateTime<Utc>) -> Result<SessionType, PomodoroError> {
        if self.phase.is_running() || !self.current_session_type.is_break() {
            return Err(self.reject("start a break"));
        }

        let kind = self.settings.break_after(self.completed_work_sessions);
        if kind != self.current_session_type {
            warn!(
                "Pending {} disagrees with {} completed sessions; starting {}",
                self.current_session_type, self.completed_work_sessions, kind
            );
        }

        self.current_session_type = kind;
        self.time_remaining = self.settings.duration_for(kind);
        self.phase = Phase::running(kind);
        self.last_tick = Some(now);
        debug!("{kind} started for {:.0}s", self.time_remaining);
        Ok(kind)
    }

    /// Stop counting down, keeping the remaining time.
    ///
    /// Does nothing when already paused.
    pub fn pause(&mut self) {
        if !self.phase.is_running() {
            return;
        }

        self.phase = Phase::Paused;
        self.last_tick = None;
        debug!(
            "{} paused with {:.1}s remaining",
            self.current_session_type, self.time_remaining
        );
    }

    /// Return to the constructed state, keeping category totals.
    ///
    /// The selection goes back to the default category.
    pub fn reset(&mut self) {
        self.categories.select_default();
        self.phase = Phase::Paused;
        self.current_session_type = SessionType::Work;
        self.time_remaining = self.settings.work_duration;
        self.last_tick = None;
        self.completed_work_sessions = 0;
        debug!("Timer reset");
    }

    /// Advance the countdown to `now`.
    ///
    /// Elapsed time is measured from the previous tick, so late or irregular
    /// ticks lose nothing. A clock that steps backwards counts as no time
    /// passing. Returns the completion when the interval reaches zero.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Completion> {
        if !self.phase.is_running() {
            return None;
        }

        let last = self.last_tick.replace(now)?;

        let elapsed = elapsed_seconds(last, now);
        self.time_remaining = (self.time_remaining - elapsed).max(0.0);

        if self.time_remaining > 0.0 {
            return None;
        }

        Some(self.complete())
    }

    /// Completion handling; runs once per interval.
    fn complete(&mut self) -> Completion {
        let finished = self.current_session_type;
        self.phase = Phase::Paused;
        self.last_tick = None;

        let completion = match finished {
            SessionType::Work => {
                let credited = self.settings.work_duration;
                let category = self.categories.credit(credited).to_string();
                self.completed_work_sessions = self.completed_work_sessions.saturating_add(1);

                let next = self.settings.break_after(self.completed_work_sessions);
                self.current_session_type = next;
                self.time_remaining = self.settings.duration_for(next);

                Completion {
                    finished,
                    next,
                    credited_seconds: credited,
                    category: Some(category),
                    completed_work_sessions: self.completed_work_sessions,
                }
            }
            SessionType::ShortBreak | SessionType::LongBreak => {
                if finished == SessionType::LongBreak {
                    self.completed_work_sessions = 0;
                }
                self.current_session_type = SessionType::Work;
                self.time_remaining = self.settings.work_duration;

                Completion {
                    finished,
                    next: SessionType::Work,
                    credited_seconds: 0.0,
                    category: None,
                    completed_work_sessions: self.completed_work_sessions,
                }
            }
        };

        info!(
            "{} complete ({}/{} work sessions), next: {}",
            completion.finished,
            completion.completed_work_sessions,
            self.settings.work_sessions_before_long_break,
            completion.next
        );
        completion
    }

    /// Add a category with a zero total.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::InvalidArgument` if the name is empty or taken.
    pub fn add_category(&mut self, name: &str) -> Result<(), PomodoroError> {
        self.categories.add(name)
    }

    /// Choose the category that receives completed work time.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::InvalidArgument` if the category is unknown.
    pub fn select_category(&mut self, name: &str) -> Result<(), PomodoroError> {
        self.categories.select(name)
    }

    fn reject(&self, command: &'static str) -> PomodoroError {
        let phase = if self.phase.is_running() {
            format!("running ({})", self.current_session_type)
        } else {
            format!("paused ({})", self.current_session_type)
        };
        warn!("Rejected '{command}' while {phase}");
        PomodoroError::InvalidTransition { command, phase }
    }

    #[must_use]
    pub const fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    #[must_use]
    pub const fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn current_session_type(&self) -> SessionType {
        self.current_session_type
    }

    #[must_use]
    pub const fn completed_work_sessions(&self) -> u32 {
        self.completed_work_sessions
    }

    #[must_use]
    pub const fn last_tick(&self) -> Option<DateTime<Utc>> {
        self.last_tick
    }

    #[must_use]
    pub const fn categories(&self) -> &Categories {
        &self.categories
    }

    #[must_use]
    pub fn selected_category(&self) -> &str {
        self.categories.selected()
    }

    /// Check if the timer is counting down.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    /// Text describing the current state.
    #[must_use]
    pub fn state_description(&self) -> &'static str {
        state_description(
            self.phase,
            self.current_session_type,
            self.time_remaining,
            self.settings.work_duration,
        )
    }

    /// Remaining time as `MM:SS`.
    #[must_use]
    pub fn time_string(&self) -> String {
        time_string(self.time_remaining)
    }

    /// Fraction of the current interval that has elapsed (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = self.settings.duration_for(self.current_session_type);
        if total <= 0.0 {
            return 1.0;
        }
        (1.0 - self.time_remaining / total).clamp(0.0, 1.0)
    }

    /// Copy of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            session_type: self.current_session_type,
            running: self.is_running(),
            time_remaining: self.time_remaining,
            time_string: self.time_string(),
            state_description: self.state_description(),
            progress: self.progress(),
            completed_work_sessions: self.completed_work_sessions,
            work_sessions_before_long_break: self.settings.work_sessions_before_long_break,
            categories: self.categories.to_map(),
            selected_category: self.categories.selected().to_string(),
        }
    }
}

/// Describe a timer state for display.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn state_description(
    phase: Phase,
    session_type: SessionType,
    time_remaining: f64,
    work_duration: f64,
) -> &'static str {
    match (phase, session_type) {
        (Phase::Paused, SessionType::Work) if time_remaining == work_duration => "Ready to Start",
        (Phase::Paused, SessionType::Work) => "Paused",
        (Phase::Paused, SessionType::ShortBreak) => "Work Complete - Ready for Short Break",
        (Phase::Paused, SessionType::LongBreak) => "Work Complete - Ready for Long Break",
        (Phase::Work, _) => "Work Time - Stay Focused!",
        (Phase::ShortBreak, _) => "Short Break - Relax!",
        (Phase::LongBreak, _) => "Long Break - Recharge!",
    }
}

#[allow(clippy::cast_precision_loss)]
fn elapsed_seconds(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to.signed_duration_since(from);
    let seconds = delta.num_microseconds().map_or_else(
        || delta.num_milliseconds() as f64 / 1_000.0,
        |micros| micros as f64 / 1_000_000.0,
    );
    seconds.max(0.0)
}
