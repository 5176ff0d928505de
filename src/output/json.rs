//! JSON output formatting for pomodoro.

use std::path::Path;

use serde::Serialize;
use serde_json::json;

use crate::config::Config;
use crate::error::PomodoroError;

/// Format the configuration as JSON
///
/// # Errors
///
/// Returns `PomodoroError::Json` if JSON serialization fails.
pub fn format_config_json(config: &Config, path: &Path) -> Result<String, PomodoroError> {
    let output = json!({
        "path": path.display().to_string(),
        "exists": path.exists(),
        "config": config,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `PomodoroError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, PomodoroError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::SessionTimer;

    #[test]
    fn test_snapshot_to_json() {
        let snapshot = SessionTimer::default().snapshot();
        let output = to_json(&snapshot).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["phase"], "paused");
        assert_eq!(value["session_type"], "work");
        assert_eq!(value["time_string"], "25:00");
        assert_eq!(value["state_description"], "Ready to Start");
        assert_eq!(value["categories"]["General"], 0.0);
    }

    #[test]
    fn test_config_json() {
        let output = format_config_json(&Config::default(), Path::new("/nonexistent/config.yaml"))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["exists"], false);
        assert_eq!(value["config"]["timer"]["sessions_before_long_break"], 4);
    }
}
