//! Terminal User Interface (TUI) for pomodoro.
//!
//! Shows the running timer and category totals, and maps key presses to
//! timer commands. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, InputMode};
pub use event::Action;

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::prelude::*;

use crate::config::Config;
use crate::error::PomodoroError;
use crate::timer::{Clock, SystemClock, TimerDriver};

/// Longest wait for input before redrawing.
const MAX_FRAME_WAIT: Duration = Duration::from_millis(250);

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the TUI fails to
/// initialize or run.
pub fn run(config: &Config) -> Result<(), PomodoroError> {
    let timer = config.build_timer()?;
    let driver = TimerDriver::new(timer, SystemClock, config.timer.tick_interval());
    let mut app = App::new(driver);

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| PomodoroError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut terminal = setup_or_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)
                .map_err(|e| PomodoroError::Terminal(format!("Failed to setup terminal: {e}")))?;
            Terminal::new(CrosstermBackend::new(stdout))
                .map_err(|e| PomodoroError::Terminal(format!("Failed to create terminal: {e}")))
        },
        restore_terminal,
    )?;

    info!("TUI started");
    let result = run_app(&mut terminal, &mut app);

    restore_terminal();
    terminal.show_cursor().ok();

    info!("TUI stopped: {}", app.driver.timer().state_description());
    result
}

/// Run `setup`, calling `restore` if it fails.
fn setup_or_restore<T>(
    setup: impl FnOnce() -> Result<T, PomodoroError>,
    restore: impl FnOnce(),
) -> Result<T, PomodoroError> {
    setup().map_err(|e| {
        restore();
        e
    })
}

/// Leave raw mode and the alternate screen. Safe to call after a partial setup.
fn restore_terminal() {
    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();
}

/// Run the main application loop.
fn run_app<B: Backend, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
) -> Result<(), PomodoroError> {
    while !app.should_quit {
        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PomodoroError::Terminal(format!("Failed to draw: {e}")))?;

        let timeout = app
            .driver
            .time_until_next_tick()
            .map_or(MAX_FRAME_WAIT, |wait| wait.min(MAX_FRAME_WAIT));

        // Handle events
        if let Some(action) = event::handle_events(app, timeout)? {
            match action {
                Action::Quit => app.should_quit = true,
                Action::Start => app.start_or_resume(),
                Action::Break => app.start_break(),
                Action::Pause => app.pause(),
                Action::Reset => app.reset(),
                Action::AddCategory => app.submit_category(),
            }
        }

        app.on_tick();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_setup_restores_terminal() {
        let restored = Cell::new(false);
        let result: Result<(), PomodoroError> = setup_or_restore(
            || Err(PomodoroError::Terminal("no tty".to_string())),
            || restored.set(true),
        );

        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_successful_setup_leaves_terminal() {
        let restored = Cell::new(false);
        let value = setup_or_restore(|| Ok(7), || restored.set(true)).unwrap();

        assert_eq!(value, 7);
        assert!(!restored.get());
    }
}
