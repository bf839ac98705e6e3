//! CLI argument definitions using clap
//!
//! gymtracker [--config <path>] [--data-dir <path>]

use clap::Parser;
use std::path::PathBuf;

/// GymTracker - log exercises and training sets from the terminal
#[derive(Parser, Debug)]
#[command(name = "gymtracker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./gymtracker.json")]
    pub config: PathBuf,

    /// Directory for data files, overrides the configuration
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
