//! Streak tracking use case

use crate::domain::streak;
use crate::domain::StreakInfo;
use crate::error::Result;
use crate::infrastructure::JournalStore;
use chrono::NaiveDate;

/// Recompute the streak row from every stored entry date and persist it.
///
/// Does not open a transaction of its own so that entry mutations can run it
/// inside theirs.
pub(crate) fn recompute_streak<S: JournalStore>(store: &S, today: NaiveDate) -> Result<StreakInfo> {
    let previous = store.load_streak()?.unwrap_or_default();
    let dates = store.entry_dates()?;
    let info = previous.recompute(&dates, today);
    store.save_streak(&info)?;

    log::debug!(
        "Streak recomputed over {} entries: current {}, longest {}, missed {}",
        info.total_entries,
        info.current_streak,
        info.longest_streak,
        info.missed_days
    );
    Ok(info)
}

/// Service owning the derived streak record
pub struct StreakService<'a, S: JournalStore> {
    store: &'a S,
}

impl<'a, S: JournalStore> StreakService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        StreakService { store }
    }

    /// Current streak record, creating an empty one on first access
    pub fn get_streak_info(&self) -> Result<StreakInfo> {
        match self.store.load_streak()? {
            Some(info) => Ok(info),
            None => {
                let info = StreakInfo::default();
                self.store.save_streak(&info)?;
                Ok(info)
            }
        }
    }

    /// Recompute and persist the streak record as of `today`
    pub fn recompute(&self, today: NaiveDate) -> Result<StreakInfo> {
        self.store.in_transaction(|store| recompute_streak(store, today))
    }

    /// Days in the last `days` days (today included) without an entry, most recent first
    pub fn missed_days(&self, today: NaiveDate, days: u32) -> Result<Vec<NaiveDate>> {
        let dates = self.store.entry_dates()?;
        Ok(streak::missed_days(&dates, today, days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Entry;
    use crate::infrastructure::SqliteStore;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn add(store: &SqliteStore, days_ago: i64) {
        store
            .insert_entry(&Entry::new(today() - Duration::days(days_ago), "t", "c"))
            .unwrap();
    }

    #[test]
    fn test_get_streak_info_creates_default_row() {
        let store = SqliteStore::open_in_memory().unwrap();
        let service = StreakService::new(&store);

        assert_eq!(service.get_streak_info().unwrap(), StreakInfo::default());
        assert_eq!(store.load_streak().unwrap(), Some(StreakInfo::default()));
    }

    #[test]
    fn test_recompute_persists_result() {
        let store = SqliteStore::open_in_memory().unwrap();
        add(&store, 1);
        add(&store, 2);
        let service = StreakService::new(&store);

        let info = service.recompute(today()).unwrap();
        assert_eq!(info.current_streak, 2);
        assert_eq!(info.streak_start_date, Some(today() - Duration::days(2)));
        assert_eq!(service.get_streak_info().unwrap(), info);
    }

    #[test]
    fn test_recompute_twice_is_identical() {
        let store = SqliteStore::open_in_memory().unwrap();
        add(&store, 0);
        add(&store, 3);
        let service = StreakService::new(&store);

        let first = service.recompute(today()).unwrap();
        let second = service.recompute(today()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missed_days_query() {
        let store = SqliteStore::open_in_memory().unwrap();
        add(&store, 0);
        add(&store, 2);
        let service = StreakService::new(&store);

        let missed = service.missed_days(today(), 3).unwrap();
        assert_eq!(missed, vec![today() - Duration::days(1)]);
    }
}
