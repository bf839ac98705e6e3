//! gymtracker - exercise and training set log backed by flat text files
//!
//! - `codec`: generic line-oriented record codec
//! - `records`: the exercise and set record types
//! - `tracker`: in-memory store with business rules and persistence
//! - `cli`: configuration and the interactive command session

pub mod cli;
pub mod codec;
pub mod records;
pub mod tracker;
