//! Configuration file
//!
//! Optional JSON file, every key has a default:
//!
//! ```json
//! {
//!   "data_dir": "data",
//!   "exercise_file": "exercises.txt",
//!   "set_file": "sets.txt"
//! }
//! ```
//!
//! File names are resolved against `data_dir` unless absolute.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::tracker::DataPaths;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the data files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_exercise_file")]
    pub exercise_file: PathBuf,

    #[serde(default = "default_set_file")]
    pub set_file: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_exercise_file() -> PathBuf {
    PathBuf::from("exercises.txt")
}
fn default_set_file() -> PathBuf {
    PathBuf::from("sets.txt")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            exercise_file: default_exercise_file(),
            set_file: default_set_file(),
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CliError::config_error(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.exercise_file.as_os_str().is_empty() || self.set_file.as_os_str().is_empty() {
            return Err(CliError::config_error("data file names must not be empty"));
        }

        let paths = self.data_paths();
        if paths.exercises == paths.sets {
            return Err(CliError::config_error(
                "exercise_file and set_file must be different files",
            ));
        }

        Ok(())
    }

    /// Resolved data file locations.
    pub fn data_paths(&self) -> DataPaths {
        DataPaths {
            exercises: self.data_dir.join(&self.exercise_file),
            sets: self.data_dir.join(&self.set_file),
        }
    }
}
