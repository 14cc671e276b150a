//! Initialize journal use case

use crate::application::{StreakService, TagService};
use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, JournalRepository};
use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;

/// Initialize a new journal at the specified path: config file, database,
/// pre-built tags and an empty streak record.
pub fn init(path: &Path, now: NaiveDateTime) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;

    let config = Config::default();
    repo.save_config(&config)?;

    let store = repo.open_store()?;
    let seeded = TagService::new(&store).seed_prebuilt(now)?;
    StreakService::new(&store).get_streak_info()?;

    println!("Initialized mjour journal at {}", path.display());
    println!("Seeded {} tags", seeded);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tag::PREBUILT_TAGS;
    use crate::infrastructure::JournalStore;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_init_creates_everything() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("journal");

        init(&root, now()).unwrap();

        let repo = FileSystemRepository::new(root.clone());
        assert!(repo.is_initialized());
        assert!(repo.load_config().is_ok());

        let store = repo.open_store().unwrap();
        assert_eq!(store.count_prebuilt_tags().unwrap() as usize, PREBUILT_TAGS.len());
        assert!(store.load_streak().unwrap().is_some());
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), now()).unwrap();
        assert!(init(temp.path(), now()).is_err());
    }
}
