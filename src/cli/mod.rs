//! CLI module for GymTracker
//!
//! Loads configuration, opens the tracker and runs the interactive
//! command session over stdin/stdout.

mod args;
mod commands;
mod config;
mod errors;
mod repl;

use std::io;

use crate::tracker::Tracker;

pub use args::Cli;
pub use commands::{
    parse_command, parse_exercise, parse_list, parse_set, Command, ExerciseAttribute, COMMANDS,
};
pub use config::Config;
pub use errors::{CliError, CliResult};
pub use repl::{Session, WELCOME};

/// Main CLI entry point
///
/// Parses arguments and runs a session. This is the only function that
/// main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let mut config = Config::load(&cli.config)?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let mut tracker = Tracker::open(config.data_paths());

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(&mut tracker, stdin.lock(), stdout.lock()).run()
}
