//! Pomodoro timer core.
//!
//! - Session types, phases and interval settings
//! - The session state machine
//! - Category time attribution
//! - Tick delivery and clocks
//! - Display formatting
//! - Simulated schedules

pub mod categories;
pub mod driver;
pub mod format;
pub mod machine;
pub mod schedule;
pub mod session;

pub use categories::{Categories, DEFAULT_CATEGORY};
pub use driver::{
    Clock, ManualClock, SystemClock, TickSubscription, TimerDriver, DEFAULT_TICK_INTERVAL,
};
pub use format::{format_duration, render_progress_bar, time_string};
pub use machine::{state_description, Completion, SessionTimer, TimerSnapshot};
pub use schedule::{simulate, Schedule, ScheduleEntry};
pub use session::{Phase, SessionType, TimerSettings};
