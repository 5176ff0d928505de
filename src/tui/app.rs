//! Application state for the TUI.

use log::error;

use crate::error::PomodoroError;
use crate::timer::{format_duration, Clock, Completion, SessionType, SystemClock, TimerDriver};

/// Hint shown when there is nothing else to say.
pub const HELP_TEXT: &str =
    "space:start | b:break | p:pause | r:reset | j/k:category | a:add | q:quit";

/// What keystrokes currently edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are commands.
    Normal,
    /// Keys edit the new category name.
    AddingCategory,
}

/// Application state.
pub struct App<C: Clock = SystemClock> {
    /// The timer and its tick source.
    pub driver: TimerDriver<C>,
    /// Status message to display.
    pub status: Option<String>,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Category name being typed.
    pub input: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<C: Clock> App<C> {
    /// Create a new app instance.
    pub fn new(driver: TimerDriver<C>) -> Self {
        Self {
            driver,
            status: Some("Press ? for help".to_string()),
            input_mode: InputMode::Normal,
            input: String::new(),
            should_quit: false,
        }
    }

    /// Deliver a due tick and announce any completion.
    pub fn on_tick(&mut self) {
        if let Some(completion) = self.driver.poll() {
            self.status = Some(completion_message(&completion));
        }
    }

    /// Start or resume work.
    pub fn start_or_resume(&mut self) {
        let result = self.driver.start_or_resume();
        self.report(result.map(|()| "Work started. Stay focused!".to_string()));
    }

    /// Start the pending break.
    pub fn start_break(&mut self) {
        let result = self.driver.start_break();
        self.report(result.map(|kind| format!("{kind} started")));
    }

    /// Pause the running interval.
    pub fn pause(&mut self) {
        if !self.driver.timer().is_running() {
            self.status = Some("Already paused".to_string());
            return;
        }

        self.status = Some(match self.driver.pause() {
            Some(completion) => completion_message(&completion),
            None => format!("Paused at {}", self.driver.timer().time_string()),
        });
    }

    /// Reset the timer. Category totals are kept.
    pub fn reset(&mut self) {
        self.driver.reset();
        self.status = Some("Timer reset".to_string());
    }

    /// Select the next category.
    pub fn select_next(&mut self) {
        let names = self.category_names();
        let index = self.driver.timer().categories().selected_index();
        if let Some(name) = names.get(index + 1) {
            let result = self.driver.select_category(name);
            self.report(result.map(|()| format!("Category: {name}")));
        }
    }

    /// Select the previous category.
    pub fn select_previous(&mut self) {
        let names = self.category_names();
        let index = self.driver.timer().categories().selected_index();
        if index > 0 {
            if let Some(name) = names.get(index - 1) {
                let result = self.driver.select_category(name);
                self.report(result.map(|()| format!("Category: {name}")));
            }
        }
    }

    /// Begin typing a new category name.
    pub fn begin_add_category(&mut self) {
        self.input_mode = InputMode::AddingCategory;
        self.input.clear();
        self.status = Some("New category: Enter to add, Esc to cancel".to_string());
    }

    /// Add the typed category and select it.
    pub fn submit_category(&mut self) {
        let name = self.input.trim().to_string();
        let result = self
            .driver
            .add_category(&name)
            .and_then(|()| self.driver.select_category(&name));

        if result.is_ok() {
            self.input_mode = InputMode::Normal;
            self.input.clear();
        }
        self.report(result.map(|()| format!("Added category: {name}")));
    }

    /// Leave category input without adding anything.
    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.status = None;
    }

    /// Show key bindings.
    pub fn show_help(&mut self) {
        self.status = Some(HELP_TEXT.to_string());
    }

    /// Category names in display order.
    pub fn category_names(&self) -> Vec<String> {
        self.driver
            .timer()
            .categories()
            .iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Show the outcome of a command; errors never stop the app.
    fn report(&mut self, result: Result<String, PomodoroError>) {
        self.status = Some(match result {
            Ok(message) => message,
            Err(e) => {
                if !e.is_recoverable() {
                    error!("{e}");
                }
                e.to_string()
            }
        });
    }
}

/// Message announcing a finished interval.
fn completion_message(completion: &Completion) -> String {
    match completion.finished {
        SessionType::Work => format!(
            "Work session complete! {} added to {}. Press b for a {}.",
            format_duration(completion.credited_seconds),
            completion.category.as_deref().unwrap_or("-"),
            completion.next.display_name().to_lowercase()
        ),
        SessionType::ShortBreak | SessionType::LongBreak => {
            format!("{} over. Press space to get back to work.", completion.finished)
        }
    }
}
