//! CLI-specific error types
//!
//! Config and I/O errors end the program. Usage errors are printed and
//! the session continues.

use std::io;

use thiserror::Error;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file unreadable or invalid
    #[error("GYM_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// Terminal I/O failed
    #[error("GYM_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    /// A command the user typed could not be understood
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        CliError::Usage(msg.into())
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "GYM_CLI_CONFIG_ERROR",
            CliError::Io(_) => "GYM_CLI_IO_ERROR",
            CliError::Usage(_) => "GYM_CLI_USAGE",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
