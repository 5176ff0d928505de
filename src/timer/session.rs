//! Session types, phases and timer settings.

use serde::{Deserialize, Serialize};

use crate::error::PomodoroError;

/// Default work interval: 25 minutes.
pub const DEFAULT_WORK_SECONDS: f64 = 1500.0;
/// Default short break: 5 minutes.
pub const DEFAULT_SHORT_BREAK_SECONDS: f64 = 300.0;
/// Default long break: 30 minutes.
pub const DEFAULT_LONG_BREAK_SECONDS: f64 = 1800.0;
/// Default number of work sessions before a long break.
pub const DEFAULT_SESSIONS_BEFORE_LONG_BREAK: u32 = 4;

/// Kind of interval that is logically in progress, whether paused or running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    /// Focused work
    Work,
    /// Short break between work sessions
    ShortBreak,
    /// Long break after a full set of work sessions
    LongBreak,
}

impl SessionType {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Check if this is a break type.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Current operating mode of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Counting down a work interval
    Work,
    /// Counting down a short break
    ShortBreak,
    /// Counting down a long break
    LongBreak,
    /// Not counting down
    Paused,
}

impl Phase {
    /// The running phase for a session type.
    #[must_use]
    pub const fn running(session_type: SessionType) -> Self {
        match session_type {
            SessionType::Work => Self::Work,
            SessionType::ShortBreak => Self::ShortBreak,
            SessionType::LongBreak => Self::LongBreak,
        }
    }

    /// Check if the timer is counting down.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        !matches!(self, Self::Paused)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Work => write!(f, "Work"),
            Self::ShortBreak => write!(f, "Short Break"),
            Self::LongBreak => write!(f, "Long Break"),
            Self::Paused => write!(f, "Paused"),
        }
    }
}

/// Interval lengths and the long-break cadence.
///
/// Fixed for the lifetime of one timer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Work interval in seconds
    pub work_duration: f64,
    /// Short break in seconds
    pub short_break_duration: f64,
    /// Long break in seconds
    pub long_break_duration: f64,
    /// Completed work sessions that earn a long break
    pub work_sessions_before_long_break: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_duration: DEFAULT_WORK_SECONDS,
            short_break_duration: DEFAULT_SHORT_BREAK_SECONDS,
            long_break_duration: DEFAULT_LONG_BREAK_SECONDS,
            work_sessions_before_long_break: DEFAULT_SESSIONS_BEFORE_LONG_BREAK,
        }
    }
}

impl TimerSettings {
    /// Create validated settings.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::InvalidArgument` if a duration is not a positive
    /// finite number or the long-break cadence is zero.
    pub fn new(
        work_duration: f64,
        short_break_duration: f64,
        long_break_duration: f64,
        work_sessions_before_long_break: u32,
    ) -> Result<Self, PomodoroError> {
        for (name, value) in [
            ("work duration", work_duration),
            ("short break duration", short_break_duration),
            ("long break duration", long_break_duration),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PomodoroError::InvalidArgument(format!(
                    "{name} must be greater than zero, got {value}"
                )));
            }
        }

        if work_sessions_before_long_break == 0 {
            return Err(PomodoroError::InvalidArgument(
                "sessions before long break must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            work_duration,
            short_break_duration,
            long_break_duration,
            work_sessions_before_long_break,
        })
    }

    /// Create validated settings from whole minutes.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::InvalidArgument` if any value is zero.
    pub fn from_minutes(
        work: u32,
        short_break: u32,
        long_break: u32,
        sessions_before_long_break: u32,
    ) -> Result<Self, PomodoroError> {
        Self::new(
            f64::from(work) * 60.0,
            f64::from(short_break) * 60.0,
            f64::from(long_break) * 60.0,
            sessions_before_long_break,
        )
    }

    /// Configured length of an interval.
    #[must_use]
    pub const fn duration_for(&self, session_type: SessionType) -> f64 {
        match session_type {
            SessionType::Work => self.work_duration,
            SessionType::ShortBreak => self.short_break_duration,
            SessionType::LongBreak => self.long_break_duration,
        }
    }

    /// Break earned after `completed` work sessions.
    ///
    /// Long exactly when the cadence has been reached.
    #[must_use]
    pub const fn break_after(&self, completed: u32) -> SessionType {
        if completed >= self.work_sessions_before_long_break {
            SessionType::LongBreak
        } else {
            SessionType::ShortBreak
        }
    }
}
