//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::timer::{format_duration, Clock, Phase, SessionType, TimerSnapshot};
use crate::tui::app::{App, InputMode, HELP_TEXT};

/// Accent color for a session type.
const fn session_color(session_type: SessionType) -> Color {
    match session_type {
        SessionType::Work => Color::Red,
        SessionType::ShortBreak => Color::Green,
        SessionType::LongBreak => Color::Blue,
    }
}

/// Render the application UI.
pub fn render<C: Clock>(frame: &mut Frame<'_>, app: &App<C>) {
    let snapshot = app.driver.snapshot();
    let input_height = if app.input_mode == InputMode::AddingCategory {
        3
    } else {
        0
    };

    // Create layout: header, clock, gauge, categories, input, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Length(4),            // Clock
            Constraint::Length(3),            // Progress
            Constraint::Min(0),               // Categories
            Constraint::Length(input_height), // Input
            Constraint::Length(1),            // Status bar
        ])
        .split(frame.area());

    render_header(frame, &snapshot, chunks[0]);
    render_clock(frame, &snapshot, chunks[1]);
    render_progress(frame, &snapshot, chunks[2]);
    render_categories(frame, &snapshot, chunks[3]);
    if app.input_mode == InputMode::AddingCategory {
        render_input(frame, app, chunks[4]);
    }
    render_status_bar(frame, app, chunks[5]);
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let color = if snapshot.phase == Phase::Paused {
        Color::Yellow
    } else {
        session_color(snapshot.session_type)
    };

    let header = Paragraph::new(format!(" {} ", snapshot.state_description))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(" Pomodoro ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(header, area);
}

/// Render the remaining time and session counter.
fn render_clock(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            snapshot.time_string.clone(),
            Style::default()
                .fg(session_color(snapshot.session_type))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Session {}/{} · {}",
                snapshot.completed_work_sessions,
                snapshot.work_sessions_before_long_break,
                snapshot.selected_category
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Render the progress gauge for the current interval.
fn render_progress(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(session_color(snapshot.session_type)))
        .label(snapshot.session_type.display_name())
        .ratio(snapshot.progress.clamp(0.0, 1.0));

    frame.render_widget(gauge, area);
}

/// Render the category list with totals.
fn render_categories(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let mut selected = 0;
    let items: Vec<ListItem<'_>> = snapshot
        .categories
        .iter()
        .enumerate()
        .map(|(i, (name, seconds))| {
            let is_selected = *name == snapshot.selected_category;
            if is_selected {
                selected = i;
            }

            let spans = vec![
                Span::styled(
                    format!("{:<20}", name),
                    Style::default().add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                ),
                Span::styled(
                    format_duration(*seconds),
                    Style::default().fg(Color::Yellow),
                ),
            ];

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Categories ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the category name being typed.
fn render_input<C: Clock>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .title(" New category ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(input, area);
}

/// Render the status bar.
fn render_status_bar<C: Clock>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(HELP_TEXT);
    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
