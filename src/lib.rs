//! mjour - Terminal personal journal
//!
//! One entry per day with moods and tags, stored in SQLite, with a writing
//! streak and statistics derived from the entry history.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::MjourError;
