//! Plan command implementation.
//!
//! Previews a schedule by simulating the configured timer.

use chrono::Utc;
use log::info;

use crate::cli::args::{OutputFormat, PlanArgs};
use crate::config::Config;
use crate::error::PomodoroError;
use crate::output::format_schedule;
use crate::timer::simulate;

/// Largest number of cycles a single plan may simulate.
const MAX_CYCLES: u32 = 1000;

/// Execute the plan command.
///
/// # Errors
///
/// Returns an error if the settings are invalid, the category is unknown or
/// empty, or the cycle count is out of range.
pub fn plan(config: &Config, args: PlanArgs, format: OutputFormat) -> Result<String, PomodoroError> {
    if args.cycles > MAX_CYCLES {
        return Err(PomodoroError::InvalidArgument(format!(
            "cycles must be at most {MAX_CYCLES}, got {}",
            args.cycles
        )));
    }

    let mut timer = config.build_timer()?;

    if let Some(category) = args.category.as_deref() {
        if !timer.categories().contains(category.trim()) {
            timer.add_category(category)?;
        }
        timer.select_category(category)?;
    }

    info!(
        "Simulating {} cycles crediting '{}'",
        args.cycles,
        timer.selected_category()
    );

    let schedule = simulate(timer, args.cycles, Utc::now())?;
    format_schedule(&schedule, format)
}
