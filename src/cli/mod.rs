//! Command-line interface for pomodoro.

pub mod args;
pub mod commands;
