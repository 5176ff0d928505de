//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::PomodoroError;
use crate::timer::Clock;
use crate::tui::app::{App, InputMode};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or resume work.
    Start,
    /// Start the pending break.
    Break,
    /// Pause the running interval.
    Pause,
    /// Reset the timer.
    Reset,
    /// Add the typed category.
    AddCategory,
}

/// Wait up to `timeout` for a terminal event and handle it.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<C: Clock>(
    app: &mut App<C>,
    timeout: Duration,
) -> Result<Option<Action>, PomodoroError> {
    if !event::poll(timeout)
        .map_err(|e| PomodoroError::Terminal(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    match event::read().map_err(|e| PomodoroError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(handle_key(app, key)),
        _ => Ok(None),
    }
}

/// Map a key press to an action, applying navigation and text edits directly.
pub fn handle_key<C: Clock>(app: &mut App<C>, key: KeyEvent) -> Option<Action> {
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match app.input_mode {
        InputMode::AddingCategory => handle_input_key(app, key),
        InputMode::Normal => handle_normal_key(app, key),
    }
}

fn handle_input_key<C: Clock>(app: &mut App<C>, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => return Some(Action::AddCategory),
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => app.input.push(c),
        _ => {}
    }
    None
}

fn handle_normal_key<C: Clock>(app: &mut App<C>, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),

        // Timer commands
        KeyCode::Char(' ' | 's') => return Some(Action::Start),
        KeyCode::Char('b') => return Some(Action::Break),
        KeyCode::Char('p') => return Some(Action::Pause),
        KeyCode::Char('r') => return Some(Action::Reset),

        // Categories
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('a') => app.begin_add_category(),

        KeyCode::Char('?') => app.show_help(),

        _ => {}
    }
    None
}
