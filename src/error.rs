//! Error types for pomodoro.

use thiserror::Error;

/// Errors that can occur while driving the timer or its front ends.
#[derive(Debug, Error)]
pub enum PomodoroError {
    /// A command argument was rejected (empty or duplicate category, unknown category, bad setting).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A command was issued from a state that does not accept it.
    #[error("Cannot {command} while {phase}")]
    InvalidTransition {
        /// The rejected command.
        command: &'static str,
        /// Description of the phase the timer was in.
        phase: String,
    },

    /// Configuration could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The terminal could not be set up or drawn to.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl PomodoroError {
    /// Whether the error was caused by a rejected user command.
    ///
    /// Such errors leave the timer untouched and the caller may carry on.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::InvalidTransition { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_message() {
        let err = PomodoroError::InvalidTransition {
            command: "start a break",
            phase: "running (Work)".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot start a break while running (Work)");
    }

    #[test]
    fn test_recoverable() {
        assert!(PomodoroError::InvalidArgument("x".to_string()).is_recoverable());
        assert!(!PomodoroError::Config("x".to_string()).is_recoverable());
    }
}
