//! Logger initialisation.
//!
//! Logs go through the `log` facade. The filter comes from `POMODORO_LOG`
//! when set, otherwise from the configured level.

use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Target};

use crate::error::PomodoroError;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "POMODORO_LOG";

/// Where log records are written.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    /// Standard error, for one-shot commands.
    Stderr,
    /// Append to a file, for when the terminal is taken by the TUI.
    File(&'a Path),
}

/// Install the global logger.
///
/// Calling this more than once is harmless; later calls are ignored.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(level: &str, target: LogTarget<'_>) -> Result<(), PomodoroError> {
    let filter = std::env::var(LOG_ENV).unwrap_or_else(|_| level.to_string());

    let mut builder = Builder::new();
    builder.parse_filters(&filter);

    match target {
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.target(Target::Pipe(Box::new(file)));
        }
    }

    // A logger may already be installed (tests, repeated runs); keep it.
    let _ = builder.try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_file_target_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let log_file = temp_dir.path().join("logs").join("pomodoro.log");

        init("debug", LogTarget::File(&log_file)).unwrap();

        assert!(log_file.exists());
    }
}
