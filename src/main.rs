use clap::Parser;
use colored::Colorize;

use pomodoro::cli::args::{Cli, Commands};
use pomodoro::cli::commands;
use pomodoro::config::{Config, Paths};
use pomodoro::error::PomodoroError;
use pomodoro::logging::{self, LogTarget};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PomodoroError> {
    let cli = Cli::parse();
    let paths = Paths::default();
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file.clone());
    let format = cli.output;
    let command = cli.command.unwrap_or(Commands::Tui);

    // Config management must work even when the file is broken
    if let Commands::Config(args) = command {
        return print(&commands::config(&config_path, args.command, format)?);
    }

    let config = Config::load_from_path(&config_path)?;
    let target = match command {
        Commands::Tui => {
            paths.ensure_dirs()?;
            LogTarget::File(&paths.log_file)
        }
        _ => LogTarget::Stderr,
    };
    logging::init(&config.logging.level, target)?;

    let output = match command {
        Commands::Tui => {
            pomodoro::tui::run(&config)?;
            String::new()
        }
        Commands::Plan(args) => commands::plan(&config, args, format)?,
        Commands::Format { seconds } => commands::format_seconds(seconds, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
        Commands::Config(args) => commands::config(&config_path, args.command, format)?,
    };

    print(&output)
}

fn print(output: &str) -> Result<(), PomodoroError> {
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
