use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "pomodoro")]
#[command(about = "A Pomodoro timer for the terminal")]
#[command(long_about = "pomodoro - A Pomodoro timer for the terminal

Alternates focused work intervals with short breaks, and a long break after
every few work sessions. Completed work time is credited to a category of
your choice.

QUICK START:
  pomodoro                  Open the interactive timer
  pomodoro plan --cycles 4  Preview a full set of sessions
  pomodoro config init      Write a config file with the defaults

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Path to the config file (default: ~/.pomodoro/config.yaml)
    #[arg(long, global = true, env = "POMODORO_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive timer (default)
    ///
    /// Keys:
    ///   space/s  start or resume work
    ///   b        start the pending break
    ///   p        pause
    ///   r        reset
    ///   j/k      select category
    ///   a        add category
    ///   q        quit
    Tui,

    /// Preview a schedule of work sessions and breaks
    ///
    /// Runs the timer through complete work and break cycles on a
    /// simulated clock, using the configured durations.
    ///
    /// # Examples
    ///
    ///   pomodoro plan                     One full set (4 cycles)
    ///   pomodoro plan --cycles 8          Two full sets
    ///   pomodoro plan -c 2 --category Code
    Plan(PlanArgs),

    /// Format seconds as MM:SS
    ///
    /// # Examples
    ///
    ///   pomodoro format 150      02:30
    ///   pomodoro format 3600     60:00
    Format {
        /// Number of seconds
        #[arg(allow_negative_numbers = true)]
        seconds: f64,
    },

    /// Manage the config file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Example: pomodoro completions bash > ~/.bash_completion.d/pomodoro
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the plan command.
#[derive(Args)]
pub struct PlanArgs {
    /// Number of work+break cycles to simulate
    #[arg(long, short = 'c', default_value = "4")]
    pub cycles: u32,

    /// Category to credit work time to
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for config management.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}
