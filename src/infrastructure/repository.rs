//! Journal directory discovery and access to its config and database

use crate::error::{MjourError, Result};
use crate::infrastructure::config::MJOUR_DIR;
use crate::infrastructure::{Config, SqliteStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Abstract access to a journal directory
pub trait JournalRepository {
    /// Load configuration from .mjour/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .mjour/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .mjour directory exists
    fn is_initialized(&self) -> bool;

    /// Create .mjour directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of JournalRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover journal root by walking up from current directory
    /// First checks MJOUR_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("MJOUR_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_mjour_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(MjourError::Config(format!(
                    "MJOUR_ROOT is set to '{}' but no .mjour directory found. \
                    Run 'mjour init' in that directory or unset MJOUR_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover journal root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_mjour_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(MjourError::NotJournalDirectory(start.to_path_buf())),
            }
        }
    }

    /// Open the journal database, creating its tables if needed
    pub fn open_store(&self) -> Result<SqliteStore> {
        log::debug!("Opening journal database in {}", self.root.display());
        SqliteStore::open(&Config::database_path(&self.root))
    }

    /// Scratch file used when composing entry content in an editor
    pub fn draft_path(&self) -> PathBuf {
        self.root.join(MJOUR_DIR).join("draft.md")
    }

    fn has_mjour_dir(path: &Path) -> bool {
        path.join(MJOUR_DIR).is_dir()
    }
}

impl JournalRepository for FileSystemRepository {
    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_mjour_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let mjour_dir = self.root.join(MJOUR_DIR);

        if mjour_dir.exists() {
            return Err(MjourError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&mjour_dir)?;
        Ok(())
    }
}
