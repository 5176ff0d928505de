//! Command implementations for pomodoro.
//!
//! Each command returns the text to print.

mod completions;
mod config;
mod plan;

pub use completions::completions;
pub use config::config;
pub use plan::plan;

use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::error::PomodoroError;
use crate::timer::time_string;

/// Execute format command
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_seconds(seconds: f64, format: OutputFormat) -> Result<String, PomodoroError> {
    let formatted = time_string(seconds);
    match format {
        OutputFormat::Pretty => Ok(formatted),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "seconds": seconds,
            "formatted": formatted,
        }))?),
    }
}
