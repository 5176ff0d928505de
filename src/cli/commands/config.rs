//! Config command implementation.

use std::path::Path;

use colored::Colorize;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::Config;
use crate::error::PomodoroError;
use crate::output::format_config;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
pub fn config(
    path: &Path,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, PomodoroError> {
    match cmd {
        ConfigCommands::Show => {
            let config = Config::load_from_path(path)?;
            format_config(&config, path, format)
        }
        ConfigCommands::Path => Ok(path.display().to_string()),
        ConfigCommands::Init { force } => init_config(path, force),
    }
}

/// Write the default configuration.
fn init_config(path: &Path, force: bool) -> Result<String, PomodoroError> {
    if path.exists() && !force {
        return Err(PomodoroError::Config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    Config::default().save_to_path(path)?;
    Ok(format!("{} {}", "Wrote".green(), path.display()))
}
