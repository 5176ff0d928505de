use std::path::Path;

use colored::{ColoredString, Colorize};

use crate::config::Config;
use crate::error::PomodoroError;
use crate::timer::{format_duration, render_progress_bar, time_string, Schedule, SessionType};

/// Color a padded label by session type.
fn colorize_session(session_type: SessionType, text: &str) -> ColoredString {
    match session_type {
        SessionType::Work => text.red(),
        SessionType::ShortBreak => text.green(),
        SessionType::LongBreak => text.blue(),
    }
}

/// Format a simulated schedule as a table
pub fn format_schedule_pretty(schedule: &Schedule) -> String {
    let mut output = format!(
        "{} ({} cycle{}, {})\n",
        "Schedule".bold(),
        schedule.cycles,
        if schedule.cycles == 1 { "" } else { "s" },
        format_duration(schedule.total_seconds)
    );
    output.push_str(&"─".repeat(60));
    output.push('\n');

    if schedule.entries.is_empty() {
        output.push_str("  No sessions");
        return output;
    }

    output.push_str(&format!(
        "{:>3}  {:<7} {:<12} {:<7} {:<9} {}\n",
        "#", "Start", "Type", "Length", "Sessions", "Category"
    ));

    let cadence = schedule.final_state.work_sessions_before_long_break;
    for entry in &schedule.entries {
        let label = format!("{:<12}", entry.session_type.display_name());
        let sessions = format!("{}/{}", entry.completed_work_sessions, cadence);
        output.push_str(&format!(
            "{:>3}  {:<7} {} {:<7} {:<9} {}\n",
            entry.index,
            time_string(entry.starts_at),
            colorize_session(entry.session_type, &label),
            time_string(entry.duration),
            sessions,
            entry.category.as_deref().unwrap_or("-").dimmed()
        ));
    }

    output.push('\n');
    output.push_str(&"Category totals".bold().to_string());
    output.push('\n');

    let work = schedule.work_seconds();
    for (name, seconds) in &schedule.category_totals {
        let share = if work > 0.0 { seconds / work } else { 0.0 };
        output.push_str(&format!(
            "  {:<16} {} {}\n",
            name,
            render_progress_bar(share, 20),
            format_duration(*seconds)
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "Then: {}",
        schedule.final_state.state_description.dimmed()
    ));
    output
}

/// Format the configuration as YAML with its source path
///
/// # Errors
///
/// Returns `PomodoroError::Yaml` if YAML serialization fails.
pub fn format_config_pretty(config: &Config, path: &Path) -> Result<String, PomodoroError> {
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };

    let yaml = serde_yaml::to_string(config)?;
    Ok(format!("{} {}\n{}", "#".dimmed(), source.dimmed(), yaml.trim_end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{simulate, SessionTimer};
    use chrono::{TimeZone, Utc};

    fn schedule(cycles: u32) -> Schedule {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        simulate(SessionTimer::default(), cycles, start).unwrap()
    }

    #[test]
    fn test_format_schedule_pretty() {
        colored::control::set_override(false);
        let output = format_schedule_pretty(&schedule(1));

        assert!(output.contains("Schedule (1 cycle, 30 minutes)"));
        assert!(output.contains("Short Break"));
        assert!(output.contains("25:00"));
        assert!(output.contains("General"));
        assert!(output.contains("Then: Ready to Start"));
    }

    #[test]
    fn test_format_schedule_empty() {
        colored::control::set_override(false);
        let output = format_schedule_pretty(&schedule(0));
        assert!(output.contains("No sessions"));
    }

    #[test]
    fn test_format_config_pretty() {
        colored::control::set_override(false);
        let output =
            format_config_pretty(&Config::default(), Path::new("/nonexistent/config.yaml")).unwrap();

        assert!(output.contains("not found, using defaults"));
        assert!(output.contains("work_minutes: 25"));
    }
}
