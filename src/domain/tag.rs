//! Tag model and the pre-built tag set

use crate::error::{MjourError, Result};
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_TAG_NAME_LEN: usize = 50;
pub const DEFAULT_TAG_COLOR: &str = "#6366F1";

/// Tags shipped with every journal, seeded once on first run
pub const PREBUILT_TAGS: [(&str, &str); 10] = [
    ("Personal", "#EC4899"),
    ("Work", "#3B82F6"),
    ("Health", "#10B981"),
    ("Travel", "#F59E0B"),
    ("Family", "#8B5CF6"),
    ("Goals", "#EF4444"),
    ("Reflection", "#06B6D4"),
    ("Gratitude", "#84CC16"),
    ("Dreams", "#A855F7"),
    ("Ideas", "#F97316"),
];

fn color_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub is_prebuilt: bool,
    pub created_at: NaiveDateTime,
}

impl Tag {
    /// Create an unsaved custom tag
    pub fn new(name: impl Into<String>, color: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Tag {
            id: 0,
            name: name.into().trim().to_string(),
            color: color.into().trim().to_uppercase(),
            is_prebuilt: false,
            created_at,
        }
    }

    /// The seed set, unsaved
    pub fn prebuilt(created_at: NaiveDateTime) -> Vec<Tag> {
        PREBUILT_TAGS
            .iter()
            .map(|(name, color)| Tag {
                is_prebuilt: true,
                ..Tag::new(*name, *color, created_at)
            })
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(MjourError::Validation("Tag name cannot be empty".to_string()));
        }
        if self.name.chars().count() > MAX_TAG_NAME_LEN {
            return Err(MjourError::Validation(format!(
                "Tag name is longer than {} characters",
                MAX_TAG_NAME_LEN
            )));
        }
        if !color_regex().is_match(&self.color) {
            return Err(MjourError::Validation(format!(
                "Invalid tag color: '{}'. Expected #RRGGBB",
                self.color
            )));
        }
        Ok(())
    }
}

/// A single entry/tag join row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryTag {
    pub entry_id: i64,
    pub tag_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 17)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_prebuilt_tags_are_flagged() {
        let tags = Tag::prebuilt(now());
        assert_eq!(tags.len(), 10);
        assert!(tags.iter().all(|t| t.is_prebuilt && t.id == 0));
        assert!(tags.iter().all(|t| t.validate().is_ok()));
        assert_eq!(tags[1].name, "Work");
    }

    #[test]
    fn test_new_tag_normalizes_input() {
        let tag = Tag::new("  Books ", "#a1b2c3", now());
        assert_eq!(tag.name, "Books");
        assert_eq!(tag.color, "#A1B2C3");
        assert!(!tag.is_prebuilt);
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        assert!(Tag::new("", DEFAULT_TAG_COLOR, now()).validate().is_err());
        assert!(Tag::new("x".repeat(51), DEFAULT_TAG_COLOR, now())
            .validate()
            .is_err());
        assert!(Tag::new("x".repeat(50), DEFAULT_TAG_COLOR, now())
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_colors() {
        assert!(Tag::new("a", "red", now()).validate().is_err());
        assert!(Tag::new("a", "#12345", now()).validate().is_err());
        assert!(Tag::new("a", "#12345G", now()).validate().is_err());
        assert!(Tag::new("a", "#00ff00", now()).validate().is_ok());
    }
}
