//! Read-only statistics over the journal

use crate::domain::analytics::{self, MonthlyStats, MoodCount, TagUsage, WordCountPoint};
use crate::domain::{Entry, Mood};
use crate::error::Result;
use crate::infrastructure::{EntryFilter, JournalStore};
use chrono::NaiveDate;

/// Headline numbers for the whole journal
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_entries: u32,
    pub total_words: u64,
    pub average_words: f64,
    pub most_frequent_mood: Option<Mood>,
}

pub struct AnalyticsService<'a, S: JournalStore> {
    store: &'a S,
}

impl<'a, S: JournalStore> AnalyticsService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        AnalyticsService { store }
    }

    pub fn mood_distribution(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<MoodCount>> {
        let entries = self.store.query_entries(&EntryFilter {
            from,
            to,
            ..EntryFilter::default()
        })?;
        Ok(analytics::mood_distribution(&entries, from, to))
    }

    pub fn tag_usage(&self, top_n: usize) -> Result<Vec<TagUsage>> {
        let tags = self.store.all_tags()?;
        let rows = self.store.entry_tag_rows()?;
        Ok(analytics::tag_usage(&tags, &rows, top_n))
    }

    pub fn word_count_trend(&self, today: NaiveDate, days: u32) -> Result<Vec<WordCountPoint>> {
        Ok(analytics::word_count_trend(&self.entries()?, today, days))
    }

    pub fn monthly_stats(&self, today: NaiveDate, months: u32) -> Result<Vec<MonthlyStats>> {
        Ok(analytics::monthly_stats(&self.entries()?, today, months))
    }

    pub fn most_frequent_mood(&self) -> Result<Option<Mood>> {
        Ok(analytics::most_frequent_mood(&self.entries()?))
    }

    pub fn total_word_count(&self) -> Result<u64> {
        Ok(analytics::total_word_count(&self.entries()?))
    }

    pub fn average_word_count(&self) -> Result<f64> {
        Ok(analytics::average_word_count(&self.entries()?))
    }

    pub fn summary(&self) -> Result<Summary> {
        let entries = self.entries()?;
        Ok(Summary {
            total_entries: entries.len() as u32,
            total_words: analytics::total_word_count(&entries),
            average_words: analytics::average_word_count(&entries),
            most_frequent_mood: analytics::most_frequent_mood(&entries),
        })
    }

    fn entries(&self) -> Result<Vec<Entry>> {
        self.store.query_entries(&EntryFilter::default())
    }
}
