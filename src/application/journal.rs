//! Entry lifecycle use cases

use crate::application::streaks::recompute_streak;
use crate::domain::{Entry, EntryTag};
use crate::error::{MjourError, Result};
use crate::infrastructure::{EntryFilter, JournalStore};
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;

/// One page of entries plus the number of entries across all pages
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub entries: Vec<Entry>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
}

impl Page {
    pub fn total_pages(&self) -> usize {
        self.total_count.div_ceil(self.page_size)
    }
}

/// Service owning entries and their tag associations
pub struct JournalService<'a, S: JournalStore> {
    store: &'a S,
}

impl<'a, S: JournalStore> JournalService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        JournalService { store }
    }

    pub fn get_entry(&self, id: i64) -> Result<Option<Entry>> {
        self.store
            .get_entry(id)?
            .map(|entry| self.with_tags(entry))
            .transpose()
    }

    pub fn get_entry_by_date(&self, date: NaiveDate) -> Result<Option<Entry>> {
        self.store
            .get_entry_by_date(date)?
            .map(|entry| self.with_tags(entry))
            .transpose()
    }

    /// Every entry, newest first
    pub fn all_entries(&self) -> Result<Vec<Entry>> {
        self.filter(&EntryFilter::default())
    }

    /// Entries dated within `[from, to]`, newest first
    pub fn entries_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Entry>> {
        self.filter(&EntryFilter {
            from: Some(from),
            to: Some(to),
            ..EntryFilter::default()
        })
    }

    /// Case-insensitive substring search over title and content.
    /// A blank term matches everything.
    pub fn search(&self, term: &str) -> Result<Vec<Entry>> {
        if term.trim().is_empty() {
            return self.all_entries();
        }

        let matches: Vec<Entry> = self
            .store
            .query_entries(&EntryFilter::default())?
            .into_iter()
            .filter(|entry| entry.matches_search(term))
            .collect();
        log::debug!("Search '{}' matched {} entries", term, matches.len());
        self.attach_tags(matches)
    }

    /// Entries matching every condition in `filter`, newest first
    pub fn filter(&self, filter: &EntryFilter) -> Result<Vec<Entry>> {
        let entries = self.store.query_entries(filter)?;
        self.attach_tags(entries)
    }

    /// Slice the (optionally searched) entry list into 1-indexed pages
    pub fn paginate(&self, page: usize, page_size: usize, search: Option<&str>) -> Result<Page> {
        if page == 0 || page_size == 0 {
            return Err(MjourError::Validation(
                "Page and page size must be at least 1".to_string(),
            ));
        }

        let all = match search {
            Some(term) => self.search(term)?,
            None => self.all_entries()?,
        };
        let total_count = all.len();
        let entries = all
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();

        Ok(Page {
            entries,
            total_count,
            page,
            page_size,
        })
    }

    /// Persist `entry`, keeping at most one entry per date.
    ///
    /// When another entry already exists for the same date the save updates
    /// that entry instead, keeping its id and creation time. The word count
    /// and tag associations are rebuilt, and the streak record is recomputed,
    /// all in one transaction.
    pub fn save(&self, mut entry: Entry, now: NaiveDateTime) -> Result<Entry> {
        entry.validate()?;

        self.store.in_transaction(|store| {
            if let Some(existing) = store.get_entry_by_date(entry.entry_date)? {
                if existing.id != entry.id {
                    log::warn!(
                        "An entry already exists for {} (#{}); updating it instead",
                        entry.entry_date,
                        existing.id
                    );
                    entry.id = existing.id;
                    entry.created_at = existing.created_at;
                }
            }

            entry.update_word_count();
            entry.modified_at = now;

            if entry.is_persisted() {
                if store.update_entry(&entry)? == 0 {
                    return Err(MjourError::EntryNotFound(entry.id));
                }
            } else {
                entry.created_at = now;
                entry.id = store.insert_entry(&entry)?;
            }

            store.delete_entry_tags_for_entry(entry.id)?;
            for tag in &entry.tags {
                store.insert_entry_tag(EntryTag {
                    entry_id: entry.id,
                    tag_id: tag.id,
                })?;
            }

            recompute_streak(store, now.date())?;
            Ok(())
        })?;

        log::info!("Saved entry #{} for {}", entry.id, entry.entry_date);
        entry.tags = self.store.tags_for_entry(entry.id)?;
        Ok(entry)
    }

    /// Remove an entry and its tag associations. Missing ids are a no-op.
    /// Returns whether an entry was removed.
    pub fn delete(&self, id: i64, today: NaiveDate) -> Result<bool> {
        let removed = self.store.in_transaction(|store| {
            store.delete_entry_tags_for_entry(id)?;
            let removed = store.delete_entry(id)? > 0;
            recompute_streak(store, today)?;
            Ok(removed)
        })?;

        if removed {
            log::info!("Deleted entry #{}", id);
        } else {
            log::debug!("Delete of missing entry #{} ignored", id);
        }
        Ok(removed)
    }

    /// Distinct dates in the given month that have an entry, ascending
    pub fn dates_with_entries(&self, year: i32, month: u32) -> Result<Vec<NaiveDate>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            MjourError::Validation(format!("Invalid month: {}-{:02}", year, month))
        })?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);

        let dates: BTreeSet<NaiveDate> = self
            .store
            .query_entries(&EntryFilter {
                from: Some(first),
                to: Some(last),
                ..EntryFilter::default()
            })?
            .into_iter()
            .map(|entry| entry.entry_date)
            .filter(|date| date.month() == month)
            .collect();
        Ok(dates.into_iter().collect())
    }

    pub fn count_entries(&self) -> Result<u32> {
        self.store.count_entries()
    }

    fn with_tags(&self, mut entry: Entry) -> Result<Entry> {
        entry.tags = self.store.tags_for_entry(entry.id)?;
        Ok(entry)
    }

    fn attach_tags(&self, entries: Vec<Entry>) -> Result<Vec<Entry>> {
        entries
            .into_iter()
            .map(|entry| self.with_tags(entry))
            .collect()
    }
}
