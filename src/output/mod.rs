//! Output formatting for pomodoro.
//!
//! This module provides formatters for displaying command results in various formats.

mod json;
mod pretty;

use std::path::Path;

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::PomodoroError;
use crate::timer::Schedule;

pub use json::*;
pub use pretty::*;

/// Format a simulated schedule based on output format
///
/// # Errors
///
/// Returns `PomodoroError::Json` if JSON serialization fails.
pub fn format_schedule(schedule: &Schedule, format: OutputFormat) -> Result<String, PomodoroError> {
    match format {
        OutputFormat::Pretty => Ok(format_schedule_pretty(schedule)),
        OutputFormat::Json => to_json(schedule),
    }
}

/// Format the effective configuration based on output format
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn format_config(
    config: &Config,
    path: &Path,
    format: OutputFormat,
) -> Result<String, PomodoroError> {
    match format {
        OutputFormat::Pretty => format_config_pretty(config, path),
        OutputFormat::Json => format_config_json(config, path),
    }
}
