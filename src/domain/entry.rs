//! Journal entry model

use crate::domain::{Mood, Tag};
use crate::error::{MjourError, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pulldown_cmark::{Event, Parser as MdParser, TagEnd};

pub const MAX_TITLE_LEN: usize = 200;
pub const DEFAULT_PREVIEW_LEN: usize = 150;

/// One journal record for a single calendar date
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Surrogate id; 0 until the entry is first persisted
    pub id: i64,
    pub title: String,
    /// Markdown text
    pub content: String,
    pub entry_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub modified_at: NaiveDateTime,
    pub primary_mood: Mood,
    pub secondary_moods: [Option<Mood>; 2],
    pub word_count: u32,
    pub is_favorite: bool,
    /// Loaded through the entry/tag join, never stored on the row
    pub tags: Vec<Tag>,
}

impl Entry {
    /// Create an unsaved entry for `entry_date`
    pub fn new(entry_date: NaiveDate, title: impl Into<String>, content: impl Into<String>) -> Self {
        let midnight = NaiveDateTime::new(entry_date, NaiveTime::MIN);
        let content = content.into();
        Entry {
            id: 0,
            title: title.into(),
            word_count: count_words(&content),
            content,
            entry_date,
            created_at: midnight,
            modified_at: midnight,
            primary_mood: Mood::default(),
            secondary_moods: [None, None],
            is_favorite: false,
            tags: Vec::new(),
        }
    }

    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.primary_mood = mood;
        self
    }

    /// Set the secondary moods; anything past the second is dropped
    pub fn with_secondary_moods(mut self, moods: &[Mood]) -> Self {
        let mut iter = moods.iter().copied();
        self.secondary_moods = [iter.next(), iter.next()];
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Every filled mood slot, primary first
    pub fn moods(&self) -> impl Iterator<Item = Mood> + '_ {
        std::iter::once(self.primary_mood).chain(self.secondary_moods.iter().flatten().copied())
    }

    pub fn has_mood(&self, mood: Mood) -> bool {
        self.moods().any(|m| m == mood)
    }

    /// Recompute the word count from the content
    pub fn update_word_count(&mut self) {
        self.word_count = count_words(&self.content);
    }

    /// Case-insensitive substring match on title or content
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.content.to_lowercase().contains(&term)
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.chars().count() > MAX_TITLE_LEN {
            return Err(MjourError::Validation(format!(
                "Title is longer than {} characters",
                MAX_TITLE_LEN
            )));
        }
        Ok(())
    }

    /// Plain-text preview of the Markdown content, truncated to `max_len` characters
    pub fn preview(&self, max_len: usize) -> String {
        let mut text = String::new();
        for event in MdParser::new(&self.content) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak
                | Event::HardBreak
                | Event::End(TagEnd::Paragraph)
                | Event::End(TagEnd::Heading(_))
                | Event::End(TagEnd::Item)
                | Event::End(TagEnd::CodeBlock) => text.push(' '),
                _ => {}
            }
        }

        let plain = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if plain.chars().count() <= max_len {
            plain
        } else {
            let truncated: String = plain.chars().take(max_len).collect();
            format!("{}...", truncated)
        }
    }
}

/// Whitespace-delimited token count
pub fn count_words(content: &str) -> u32 {
    content.split_whitespace().count() as u32
}
