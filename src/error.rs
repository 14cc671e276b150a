//! Error types for mjour

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mjour application
#[derive(Debug, Error)]
pub enum MjourError {
    #[error("Not an mjour directory: {0}")]
    NotJournalDirectory(PathBuf),

    #[error("Entry not found: {0}")]
    EntryNotFound(i64),

    #[error("No entry for {0}")]
    NoEntryForDate(NaiveDate),

    #[error("Tag not found: {0}")]
    TagNotFound(i64),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl MjourError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MjourError::NotJournalDirectory(_) => 2,
            MjourError::InvalidDate(_) => 3,
            MjourError::EntryNotFound(_)
            | MjourError::NoEntryForDate(_)
            | MjourError::TagNotFound(_) => 4,
            MjourError::Validation(_) => 5,
            MjourError::Auth(_) => 6,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            MjourError::NotJournalDirectory(path) => {
                format!(
                    "Not an mjour directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'mjour init' in this directory to create a new journal\n\
                    • Navigate to an existing mjour directory\n\
                    • Set MJOUR_ROOT environment variable to your journal path",
                    path.display()
                )
            }
            MjourError::InvalidDate(input) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Valid dates:\n\
                    • today, yesterday\n\
                    • monday, tuesday, ..., sunday (most recent)\n\
                    • last monday, last friday, etc.\n\
                    • Specific dates: DD-MM-YYYY or YYYY-MM-DD\n\n\
                    Examples:\n\
                    mjour write today\n\
                    mjour show last monday\n\
                    mjour show 17-01-2025",
                    input
                )
            }
            MjourError::EntryNotFound(id) => {
                format!(
                    "Entry not found: #{}\n\n\
                    Suggestions:\n\
                    • Use 'mjour list' to see existing entries and their ids\n\
                    • Look entries up by date instead (e.g., 'mjour show today')",
                    id
                )
            }
            MjourError::NoEntryForDate(date) => {
                format!(
                    "No entry for {}\n\n\
                    Suggestions:\n\
                    • Write one with 'mjour write {}'\n\
                    • Use 'mjour calendar {} {}' to see which days have entries",
                    date.format("%d-%m-%Y"),
                    date.format("%d-%m-%Y"),
                    date.format("%Y"),
                    date.format("%-m")
                )
            }
            MjourError::Auth(msg) => {
                format!(
                    "Authentication failed: {}\n\n\
                    Suggestions:\n\
                    • Pass the journal PIN with --pin <PIN>\n\
                    • Check a PIN with 'mjour pin check <PIN>'",
                    msg
                )
            }
            MjourError::TagNotFound(id) => {
                format!(
                    "Tag not found: #{}\n\n\
                    Suggestions:\n\
                    • Use 'mjour tags list' to see available tags\n\
                    • Create a tag with 'mjour tags add <name>'",
                    id
                )
            }
            MjourError::Editor(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that your editor is installed and in PATH\n\
                    • Set EDITOR environment variable (e.g., export EDITOR=nano)\n\
                    • Configure editor: mjour config editor 'vim'\n\
                    • Pass the text directly: mjour write today --content '...'",
                    msg
                )
            }
            MjourError::Config(msg) => {
                if msg.contains("Invalid mood") {
                    format!(
                        "{}\n\n\
                        Valid moods: happy, excited, grateful, calm, neutral, anxious, sad, \
                        angry, tired, stressed, motivated, peaceful, loving, hopeful, confused\n\
                        Example: mjour config default_mood calm",
                        msg
                    )
                } else if msg.contains("Invalid theme") {
                    format!(
                        "{}\n\n\
                        Valid themes: dark, light\n\
                        Example: mjour config theme light",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using MjourError
pub type Result<T> = std::result::Result<T, MjourError>;
