//! Time formatting helpers.

/// Format seconds as `MM:SS`.
///
/// Minutes are not rolled over into hours, so an hour reads `60:00`.
/// Negative and non-finite input formats as `00:00`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn time_string(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let minutes = total / 60;
    let seconds = total % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format seconds as a human-readable string.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let total_minutes = total_seconds / 60;

    if total_minutes < 1 {
        return format!(
            "{} second{}",
            total_seconds,
            if total_seconds == 1 { "" } else { "s" }
        );
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                hours,
                if hours == 1 { "" } else { "s" },
                minutes,
                if minutes == 1 { "" } else { "s" }
            )
        } else {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    }
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let progress = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (progress * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_string() {
        assert_eq!(time_string(150.0), "02:30");
        assert_eq!(time_string(3600.0), "60:00");
        assert_eq!(time_string(0.0), "00:00");
        assert_eq!(time_string(59.0), "00:59");
        assert_eq!(time_string(1500.0), "25:00");
    }

    #[test]
    fn test_time_string_floors_fractions() {
        assert_eq!(time_string(59.99), "00:59");
        assert_eq!(time_string(1499.4), "24:59");
    }

    #[test]
    fn test_time_string_large_and_invalid() {
        assert_eq!(time_string(6000.0), "100:00");
        assert_eq!(time_string(-5.0), "00:00");
        assert_eq!(time_string(f64::NAN), "00:00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(1500.0), "25 minutes");
        assert_eq!(format_duration(60.0), "1 minute");
        assert_eq!(format_duration(7200.0), "2 hours");
        assert_eq!(format_duration(5400.0), "1 hour, 30 minutes");
        assert_eq!(format_duration(45.0), "45 seconds");
        assert_eq!(format_duration(1.0), "1 second");
    }

    #[test]
    fn test_render_progress_bar() {
        let bar = render_progress_bar(0.5, 10);
        assert!(bar.contains("█████"));
        assert!(bar.contains("░░░░░"));
        assert_eq!(render_progress_bar(2.0, 4), "[████]");
    }
}
