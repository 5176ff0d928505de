//! Tick delivery for a [`SessionTimer`].
//!
//! The driver owns the timer, a clock and at most one tick subscription.
//! Front ends send commands through it and call [`TimerDriver::poll`] from
//! their event loop; the driver decides when a tick is due.

use std::cell::Cell;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use log::debug;

use crate::error::PomodoroError;
use crate::timer::machine::{Completion, SessionTimer, TimerSnapshot};
use crate::timer::session::SessionType;

/// Nominal tick interval for interactive use.
pub const DEFAULT_TICK_INTERVAL: StdDuration = StdDuration::from_millis(100);

/// Source of the current time.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Used for simulations.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    #[must_use]
    pub const fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: StdDuration) {
        let step = Duration::from_std(by).unwrap_or_else(|_| Duration::zero());
        self.now.set(self.now.get() + step);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Handle for the single active tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSubscription {
    id: u64,
    next_due: DateTime<Utc>,
}

impl TickSubscription {
    /// Identifier, unique per driver.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// When the next tick should be delivered.
    #[must_use]
    pub const fn next_due(&self) -> DateTime<Utc> {
        self.next_due
    }
}

/// Owns a [`SessionTimer`] and delivers its ticks.
#[derive(Debug)]
pub struct TimerDriver<C: Clock = SystemClock> {
    timer: SessionTimer,
    clock: C,
    interval: StdDuration,
    step: Duration,
    subscription: Option<TickSubscription>,
    next_id: u64,
}

impl TimerDriver<SystemClock> {
    /// Create a driver on the system clock with the default interval.
    #[must_use]
    pub fn system(timer: SessionTimer) -> Self {
        Self::new(timer, SystemClock, DEFAULT_TICK_INTERVAL)
    }
}

impl<C: Clock> TimerDriver<C> {
    /// Create a driver ticking every `interval` while the timer runs.
    ///
    /// A zero interval ticks on every poll.
    #[must_use]
    pub fn new(timer: SessionTimer, clock: C, interval: StdDuration) -> Self {
        let step = Duration::from_std(interval).unwrap_or_else(|_| Duration::milliseconds(100));
        Self {
            timer,
            clock,
            interval,
            step,
            subscription: None,
            next_id: 1,
        }
    }

    /// Start or resume work and begin ticking.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::InvalidTransition` if work cannot start now.
    pub fn start_or_resume(&mut self) -> Result<(), PomodoroError> {
        let now = self.clock.now();
        self.timer.start_or_resume(now)?;
        self.subscribe(now);
        Ok(())
    }

    /// Start the pending break and begin ticking.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::InvalidTransition` if no break is pending.
    pub fn start_break(&mut self) -> Result<SessionType, PomodoroError> {
        let now = self.clock.now();
        let kind = self.timer.start_break(now)?;
        self.subscribe(now);
        Ok(kind)
    }

    /// Pause the running interval.
    ///
    /// Time elapsed since the last tick is counted first, which may complete
    /// the interval; that completion is returned.
    pub fn pause(&mut self) -> Option<Completion> {
        let completion = self.timer.tick(self.clock.now());
        self.timer.pause();
        self.cancel();
        completion
    }

    /// Reset the timer and stop ticking.
    pub fn reset(&mut self) {
        self.timer.reset();
        self.cancel();
    }

    /// Add a category.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::InvalidArgument` if the name is empty or taken.
    pub fn add_category(&mut self, name: &str) -> Result<(), PomodoroError> {
        self.timer.add_category(name)
    }

    /// Select a category.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::InvalidArgument` if the category is unknown.
    pub fn select_category(&mut self, name: &str) -> Result<(), PomodoroError> {
        self.timer.select_category(name)
    }

    /// Deliver a tick if one is due. Returns the completion, if any.
    pub fn poll(&mut self) -> Option<Completion> {
        let subscription = self.subscription?;
        let now = self.clock.now();
        if now < subscription.next_due {
            return None;
        }

        let completion = self.timer.tick(now);
        if completion.is_some() || !self.timer.is_running() {
            self.cancel();
        } else {
            self.subscription = Some(TickSubscription {
                next_due: now + self.step,
                ..subscription
            });
        }
        completion
    }

    /// Time until the next tick is due, or `None` when nothing is subscribed.
    #[must_use]
    pub fn time_until_next_tick(&self) -> Option<StdDuration> {
        let subscription = self.subscription?;
        let wait = subscription.next_due - self.clock.now();
        Some(wait.to_std().unwrap_or(StdDuration::ZERO))
    }

    fn subscribe(&mut self, now: DateTime<Utc>) {
        self.cancel();
        let subscription = TickSubscription {
            id: self.next_id,
            next_due: now + self.step,
        };
        self.next_id += 1;
        debug!(
            "Tick subscription {} every {:?}",
            subscription.id, self.interval
        );
        self.subscription = Some(subscription);
    }

    fn cancel(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            debug!("Tick subscription {} cancelled", subscription.id);
        }
    }

    #[must_use]
    pub const fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub const fn interval(&self) -> StdDuration {
        self.interval
    }

    #[must_use]
    pub const fn subscription(&self) -> Option<TickSubscription> {
        self.subscription
    }

    /// Copy of the timer's observable state.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        self.timer.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::session::{Phase, TimerSettings};
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    fn manual_driver() -> TimerDriver<ManualClock> {
        TimerDriver::new(
            SessionTimer::default(),
            ManualClock::new(t0()),
            StdDuration::from_millis(100),
        )
    }

    /// Step the clock to each due tick until an interval completes.
    fn run_to_completion(driver: &mut TimerDriver<ManualClock>) -> Completion {
        loop {
            let wait = driver.time_until_next_tick().unwrap();
            driver.clock().advance(wait);
            if let Some(completion) = driver.poll() {
                return completion;
            }
        }
    }

    #[test]
    fn test_idle_driver_has_no_subscription() {
        let mut driver = manual_driver();
        assert!(driver.subscription().is_none());
        assert!(driver.time_until_next_tick().is_none());
        assert!(driver.poll().is_none());
    }

    #[test]
    fn test_system_driver_uses_default_interval() {
        let mut driver = TimerDriver::system(SessionTimer::default());
        assert_eq!(driver.interval(), DEFAULT_TICK_INTERVAL);

        driver.start_or_resume().unwrap();
        let wait = driver.time_until_next_tick().unwrap();
        assert!(wait <= DEFAULT_TICK_INTERVAL);
    }

    #[test]
    fn test_start_subscribes() {
        let mut driver = manual_driver();
        driver.start_or_resume().unwrap();

        let subscription = driver.subscription().unwrap();
        assert_eq!(subscription.next_due(), t0() + Duration::milliseconds(100));
        assert_eq!(
            driver.time_until_next_tick(),
            Some(StdDuration::from_millis(100))
        );
    }

    #[test]
    fn test_poll_before_due_does_not_tick() {
        let mut driver = manual_driver();
        driver.start_or_resume().unwrap();
        driver.clock().advance(StdDuration::from_millis(50));

        assert!(driver.poll().is_none());
        assert_eq!(driver.timer().time_remaining(), 1500.0);
    }

    #[test]
    fn test_late_poll_counts_full_gap() {
        let mut driver = manual_driver();
        driver.start_or_resume().unwrap();
        driver.clock().advance(StdDuration::from_secs(90));

        assert!(driver.poll().is_none());
        assert!((driver.timer().time_remaining() - 1410.0).abs() < 1e-9);
        assert!(driver.subscription().is_some());
    }

    #[test]
    fn test_failed_command_keeps_subscription() {
        let mut driver = manual_driver();
        driver.start_or_resume().unwrap();
        let before = driver.subscription();

        assert!(driver.start_or_resume().is_err());
        assert!(driver.start_break().is_err());
        assert_eq!(driver.subscription(), before);
    }

    #[test]
    fn test_new_phase_replaces_subscription() {
        let mut driver = manual_driver();
        driver.start_or_resume().unwrap();
        let first = driver.subscription().unwrap().id();

        driver.pause();
        assert!(driver.subscription().is_none());

        driver.start_or_resume().unwrap();
        let second = driver.subscription().unwrap().id();
        assert_ne!(first, second);
    }

    #[test]
    fn test_pause_counts_time_since_last_tick() {
        let mut driver = manual_driver();
        driver.start_or_resume().unwrap();
        driver.clock().advance(StdDuration::from_secs(30));

        assert!(driver.pause().is_none());
        assert_eq!(driver.timer().phase(), Phase::Paused);
        assert!((driver.timer().time_remaining() - 1470.0).abs() < 1e-9);
    }

    #[test]
    fn test_pause_and_reset_without_subscription() {
        let mut driver = manual_driver();
        assert!(driver.pause().is_none());
        driver.reset();
        assert!(driver.subscription().is_none());
        assert_eq!(driver.timer().time_remaining(), 1500.0);
    }

    #[test]
    fn test_completion_cancels_subscription() {
        let mut driver = manual_driver();
        driver.start_or_resume().unwrap();

        let completion = run_to_completion(&mut driver);
        assert_eq!(completion.finished, SessionType::Work);
        assert!(driver.subscription().is_none());
        assert_eq!(driver.timer().current_session_type(), SessionType::ShortBreak);
        assert_eq!(driver.timer().time_remaining(), 300.0);
    }

    #[test]
    fn test_full_cycle_through_driver() {
        let settings = TimerSettings::new(10.0, 2.0, 5.0, 2).unwrap();
        let mut driver = TimerDriver::new(
            SessionTimer::new(settings),
            ManualClock::new(t0()),
            StdDuration::from_secs(1),
        );

        driver.start_or_resume().unwrap();
        run_to_completion(&mut driver);
        assert_eq!(driver.start_break().unwrap(), SessionType::ShortBreak);
        run_to_completion(&mut driver);
        driver.start_or_resume().unwrap();
        let completion = run_to_completion(&mut driver);

        assert_eq!(completion.next, SessionType::LongBreak);
        assert_eq!(driver.timer().categories().total("General"), Some(20.0));
    }

    #[test]
    fn test_mock_clock_drives_ticks() {
        let mut times = vec![
            t0(),
            t0() + Duration::seconds(1),
            t0() + Duration::seconds(1),
        ]
        .into_iter();

        let mut clock = MockClock::new();
        clock
            .expect_now()
            .times(3)
            .returning(move || times.next().unwrap());

        let mut driver = TimerDriver::new(
            SessionTimer::default(),
            clock,
            StdDuration::from_secs(1),
        );
        driver.start_or_resume().unwrap();
        assert!(driver.poll().is_none());
        assert_eq!(driver.timer().time_remaining(), 1499.0);
        assert_eq!(
            driver.time_until_next_tick(),
            Some(StdDuration::from_secs(1))
        );
    }
}
