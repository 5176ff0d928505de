//! Configuration settings for pomodoro.
//!
//! Settings are loaded from `~/.pomodoro/config.yaml`.

use std::path::Path;
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::PomodoroError;
use crate::timer::{SessionTimer, TimerSettings};

/// Shortest tick interval accepted from configuration.
const MIN_TICK_INTERVAL_MS: u64 = 10;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Interval lengths and tick rate.
    pub timer: TimerConfig,
    /// Categories created at start-up in addition to "General".
    pub categories: Vec<String>,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Timer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Work interval in minutes.
    #[serde(default = "default_work")]
    pub work_minutes: u32,
    /// Short break in minutes.
    #[serde(default = "default_short_break")]
    pub short_break_minutes: u32,
    /// Long break in minutes.
    #[serde(default = "default_long_break")]
    pub long_break_minutes: u32,
    /// Number of work sessions before a long break.
    #[serde(default = "default_sessions_before_long_break")]
    pub sessions_before_long_break: u32,
    /// How often the interactive timer ticks, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter (error, warn, info, debug, trace, or an env_logger filter string).
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions for serde
const fn default_work() -> u32 {
    25
}

const fn default_short_break() -> u32 {
    5
}

const fn default_long_break() -> u32 {
    30
}

const fn default_sessions_before_long_break() -> u32 {
    4
}

const fn default_tick_interval_ms() -> u64 {
    100
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work(),
            short_break_minutes: default_short_break(),
            long_break_minutes: default_long_break(),
            sessions_before_long_break: default_sessions_before_long_break(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TimerConfig {
    /// Validated interval settings.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::Config` if any duration or the cadence is zero.
    pub fn settings(&self) -> Result<TimerSettings, PomodoroError> {
        TimerSettings::from_minutes(
            self.work_minutes,
            self.short_break_minutes,
            self.long_break_minutes,
            self.sessions_before_long_break,
        )
        .map_err(|e| PomodoroError::Config(format!("Invalid timer settings: {e}")))
    }

    /// Tick interval, never shorter than 10 ms.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(MIN_TICK_INTERVAL_MS))
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, PomodoroError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomodoroError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            PomodoroError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), PomodoroError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| PomodoroError::Config(format!("Failed to serialize config: {e}")))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    PomodoroError::Config(format!(
                        "Failed to create directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        std::fs::write(path, contents).map_err(|e| {
            PomodoroError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Build a timer from these settings, with the configured categories.
    ///
    /// Blank or repeated category names are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::Config` if the timer settings are invalid.
    pub fn build_timer(&self) -> Result<SessionTimer, PomodoroError> {
        let mut timer = SessionTimer::new(self.timer.settings()?);
        for name in &self.categories {
            if let Err(e) = timer.add_category(name) {
                warn!("Skipping configured category '{name}': {e}");
            }
        }
        Ok(timer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.timer.work_minutes, 25);
        assert_eq!(config.timer.short_break_minutes, 5);
        assert_eq!(config.timer.long_break_minutes, 30);
        assert_eq!(config.timer.sessions_before_long_break, 4);
        assert_eq!(config.timer.tick_interval_ms, 100);
        assert!(config.categories.is_empty());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_default_settings_match_timer_defaults() {
        let settings = Config::default().timer.settings().unwrap();
        assert_eq!(settings, TimerSettings::default());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sub").join("config.yaml");

        let mut config = Config::default();
        config.timer.work_minutes = 50;
        config.categories = vec!["Reading".to_string()];

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.timer.work_minutes, 50);
        assert_eq!(loaded.categories, vec!["Reading".to_string()]);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r#"
timer:
  work_minutes: 45
"#;
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.timer.work_minutes, 45);
        assert_eq!(config.timer.short_break_minutes, 5);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "timer: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(PomodoroError::Config(_))
        ));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut config = Config::default();
        config.timer.short_break_minutes = 0;

        assert!(matches!(
            config.build_timer(),
            Err(PomodoroError::Config(_))
        ));
    }

    #[test]
    fn test_tick_interval_floor() {
        let mut config = Config::default();
        config.timer.tick_interval_ms = 0;
        assert_eq!(config.timer.tick_interval(), Duration::from_millis(10));
    }

    #[test]
    fn test_build_timer_seeds_categories() {
        let mut config = Config::default();
        config.categories = vec![
            "Code".to_string(),
            String::new(),
            "General".to_string(),
            "Code".to_string(),
        ];

        let timer = config.build_timer().unwrap();
        let names: Vec<&str> = timer.categories().iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Code", "General"]);
        assert_eq!(timer.selected_category(), "General");
    }
}
