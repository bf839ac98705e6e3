//! Persisted record types
//!
//! Each type declares its on-disk schema and implements
//! [`Record`](crate::codec::Record) so the codec can read and fill it.

mod exercise;
mod training_set;

pub use exercise::Exercise;
pub use training_set::{format_weight, TrainingSet};
