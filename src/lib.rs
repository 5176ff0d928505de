//! pomodoro - A Pomodoro timer for the terminal
//!
//! This crate provides the session timer state machine, its tick driver,
//! and the command-line and terminal interfaces built on top of them.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod timer;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::PomodoroError;
pub use timer::{SessionTimer, TimerDriver};
