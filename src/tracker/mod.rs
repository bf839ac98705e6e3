//! Exercise and set tracking
//!
//! # Rules
//!
//! - Exercise names are unique
//! - A set may only be added for an existing exercise
//! - Deleting or clearing exercises removes their sets
//! - Renaming an exercise renames it in its sets
//!
//! Persistence is best-effort: every change lands in memory, file errors
//! are reported back to the caller.

mod errors;
mod store;

pub use errors::{TrackerError, TrackerResult};
pub use store::{DataPaths, RewriteSummary, Tracker};
