//! Configuration management

use crate::domain::Mood;
use crate::error::{MjourError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const MJOUR_DIR: &str = ".mjour";
const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "journal.db";

/// Colour theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(format!(
                "Invalid theme: '{}'. Valid themes are: dark, light",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_mood: Mood,
    #[serde(default = "default_entries_per_page")]
    pub entries_per_page: usize,
    #[serde(default = "default_window_days")]
    pub missed_days_window: u32,
    #[serde(default = "default_window_days")]
    pub trend_days: u32,
    #[serde(default = "default_monthly_months")]
    pub monthly_months: u32,
    #[serde(default = "default_top_tags")]
    pub top_tags: usize,
    #[serde(default)]
    pub theme: Theme,
    pub editor: String,
    pub created: DateTime<Utc>,
}

fn default_entries_per_page() -> usize {
    10
}

fn default_window_days() -> u32 {
    30
}

fn default_monthly_months() -> u32 {
    6
}

fn default_top_tags() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_mood: Mood::default(),
            entries_per_page: default_entries_per_page(),
            missed_days_window: default_window_days(),
            trend_days: default_window_days(),
            monthly_months: default_monthly_months(),
            top_tags: default_top_tags(),
            theme: Theme::default(),
            editor: Self::detect_default_editor(),
            created: Utc::now(),
        }
    }
}

impl Config {
    /// Load config from .mjour/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(MJOUR_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MjourError::NotJournalDirectory(path.to_path_buf())
            } else {
                MjourError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| MjourError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .mjour/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let mjour_dir = path.join(MJOUR_DIR);

        if !mjour_dir.exists() {
            fs::create_dir(&mjour_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(mjour_dir.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    /// Location of the SQLite database for a journal rooted at `path`
    pub fn database_path(path: &Path) -> PathBuf {
        path.join(MJOUR_DIR).join(DATABASE_FILE)
    }

    /// Get the editor command, checking environment variables first
    pub fn get_editor(&self) -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| self.editor.clone())
    }

    /// Get a single value by key, formatted for display
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "default_mood" => self.default_mood.to_string(),
            "entries_per_page" => self.entries_per_page.to_string(),
            "missed_days_window" => self.missed_days_window.to_string(),
            "trend_days" => self.trend_days.to_string(),
            "monthly_months" => self.monthly_months.to_string(),
            "top_tags" => self.top_tags.to_string(),
            "theme" => format!("{:?}", self.theme).to_lowercase(),
            "editor" => self.editor.clone(),
            "created" => self.created.to_rfc3339(),
            _ => {
                return Err(MjourError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key,
                    Self::KEYS.join(", ")
                )))
            }
        };
        Ok(value)
    }

    /// Set a single value by key, parsing it for the field type
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_mood" => {
                self.default_mood = Mood::from_str(value).map_err(MjourError::Config)?;
            }
            "entries_per_page" => self.entries_per_page = parse_positive(key, value)?,
            "missed_days_window" => self.missed_days_window = parse_positive(key, value)?,
            "trend_days" => self.trend_days = parse_positive(key, value)?,
            "monthly_months" => self.monthly_months = parse_positive(key, value)?,
            "top_tags" => self.top_tags = parse_positive(key, value)?,
            "theme" => self.theme = Theme::from_str(value).map_err(MjourError::Config)?,
            "editor" => self.editor = value.to_string(),
            "created" => {
                return Err(MjourError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(MjourError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key,
                    Self::KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    pub const KEYS: [&'static str; 9] = [
        "default_mood",
        "entries_per_page",
        "missed_days_window",
        "trend_days",
        "monthly_months",
        "top_tags",
        "theme",
        "editor",
        "created",
    ];

    /// Detect default editor from environment or system
    fn detect_default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(windows) {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(MjourError::Config(format!(
            "Invalid value for '{}': '{}'. Expected a positive number",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_mood, Mood::Neutral);
        assert_eq!(config.entries_per_page, 10);
        assert_eq!(config.missed_days_window, 30);
        assert_eq!(config.monthly_months, 6);
        assert_eq!(config.theme, Theme::Dark);
        assert!(!config.editor.is_empty());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.default_mood = Mood::Calm;
        config.theme = Theme::Light;

        config.save_to_dir(temp.path()).unwrap();

        assert!(temp.path().join(".mjour/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.default_mood, Mood::Calm);
        assert_eq!(loaded.theme, Theme::Light);
        assert_eq!(loaded.editor, config.editor);
        assert_eq!(loaded.created, config.created);
    }

    #[test]
    fn test_load_fills_missing_fields_with_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".mjour")).unwrap();
        fs::write(
            temp.path().join(".mjour/config.toml"),
            "editor = \"vim\"\ncreated = \"2025-01-17T09:00:00Z\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.editor, "vim");
        assert_eq!(loaded.entries_per_page, 10);
        assert_eq!(loaded.top_tags, 10);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        match Config::load_from_dir(temp.path()).unwrap_err() {
            MjourError::NotJournalDirectory(_) => {}
            other => panic!("Expected NotJournalDirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_get_and_set_values() {
        let mut config = Config::default();
        config.set("default_mood", "Happy").unwrap();
        config.set("entries_per_page", "25").unwrap();
        config.set("theme", "light").unwrap();

        assert_eq!(config.get("default_mood").unwrap(), "happy");
        assert_eq!(config.get("entries_per_page").unwrap(), "25");
        assert_eq!(config.get("theme").unwrap(), "light");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("entries_per_page", "0").is_err());
        assert!(config.set("entries_per_page", "ten").is_err());
        assert!(config.set("default_mood", "meh").is_err());
        assert!(config.set("theme", "solarized").is_err());
        assert!(config.set("created", "2025-01-01T00:00:00Z").is_err());
        assert!(config.set("unknown", "x").is_err());
    }
}
