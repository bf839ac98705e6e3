//! GymTracker CLI entry point
//!
//! Sets up logging, then hands over to `cli::run`. Errors are printed to
//! stderr and the process exits non-zero.

use gymtracker::cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
