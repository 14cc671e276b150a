//! Tag registry use cases

use crate::domain::Tag;
use crate::error::{MjourError, Result};
use crate::infrastructure::JournalStore;
use chrono::NaiveDateTime;

/// Service owning the tag set
pub struct TagService<'a, S: JournalStore> {
    store: &'a S,
}

impl<'a, S: JournalStore> TagService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        TagService { store }
    }

    /// Insert the pre-built tags when none exist yet. Returns how many were added.
    pub fn seed_prebuilt(&self, now: NaiveDateTime) -> Result<usize> {
        if self.store.count_prebuilt_tags()? > 0 {
            return Ok(0);
        }

        self.store.in_transaction(|store| {
            let mut added = 0;
            for tag in Tag::prebuilt(now) {
                if store.find_tag_by_name(&tag.name)?.is_some() {
                    log::debug!("Skipping pre-built tag '{}': name already taken", tag.name);
                    continue;
                }
                store.insert_tag(&tag)?;
                added += 1;
            }
            log::info!("Seeded {} pre-built tags", added);
            Ok(added)
        })
    }

    pub fn all_tags(&self) -> Result<Vec<Tag>> {
        self.store.all_tags()
    }

    pub fn prebuilt_tags(&self) -> Result<Vec<Tag>> {
        Ok(self
            .all_tags()?
            .into_iter()
            .filter(|tag| tag.is_prebuilt)
            .collect())
    }

    pub fn custom_tags(&self) -> Result<Vec<Tag>> {
        Ok(self
            .all_tags()?
            .into_iter()
            .filter(|tag| !tag.is_prebuilt)
            .collect())
    }

    pub fn get_tag(&self, id: i64) -> Result<Option<Tag>> {
        self.store.get_tag(id)
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<Tag>> {
        self.store.find_tag_by_name(name)
    }

    /// Create a custom tag with a unique (case-insensitive) name
    pub fn create(&self, name: &str, color: &str, now: NaiveDateTime) -> Result<Tag> {
        let mut tag = Tag::new(name, color, now);
        tag.validate()?;
        self.ensure_name_free(&tag.name, None)?;

        tag.id = self.store.insert_tag(&tag)?;
        log::info!("Created tag '{}' (#{})", tag.name, tag.id);
        Ok(tag)
    }

    /// Rename or recolour a custom tag. `None` keeps the current value.
    pub fn update(&self, id: i64, name: Option<&str>, color: Option<&str>) -> Result<Tag> {
        let current = self.store.get_tag(id)?.ok_or(MjourError::TagNotFound(id))?;
        if current.is_prebuilt {
            return Err(MjourError::Validation(format!(
                "Pre-built tag '{}' cannot be modified",
                current.name
            )));
        }

        let mut tag = Tag {
            id,
            ..Tag::new(
                name.unwrap_or(current.name.as_str()),
                color.unwrap_or(current.color.as_str()),
                current.created_at,
            )
        };
        tag.validate()?;
        self.ensure_name_free(&tag.name, Some(id))?;

        if self.store.update_tag(&tag)? == 0 {
            return Err(MjourError::TagNotFound(id));
        }
        log::info!("Updated tag #{} to '{}' {}", id, tag.name, tag.color);
        Ok(tag)
    }

    /// Delete a custom tag and all its entry associations.
    /// Returns false when no tag has that id.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let Some(tag) = self.store.get_tag(id)? else {
            log::debug!("Delete of missing tag #{} ignored", id);
            return Ok(false);
        };
        if tag.is_prebuilt {
            log::warn!("Refusing to delete pre-built tag '{}'", tag.name);
            return Err(MjourError::Validation(format!(
                "Pre-built tag '{}' cannot be deleted",
                tag.name
            )));
        }

        self.store.in_transaction(|store| {
            let unlinked = store.delete_entry_tags_for_tag(id)?;
            store.delete_tag(id)?;
            log::info!("Deleted tag '{}', unlinked from {} entries", tag.name, unlinked);
            Ok(true)
        })
    }

    pub fn tags_for_entry(&self, entry_id: i64) -> Result<Vec<Tag>> {
        self.store.tags_for_entry(entry_id)
    }

    /// Look up tags by name, failing on the first unknown one
    pub fn resolve_names<I, T>(&self, names: I) -> Result<Vec<Tag>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                self.store.find_tag_by_name(name)?.ok_or_else(|| {
                    MjourError::Validation(format!("Unknown tag: '{}'", name.trim()))
                })
            })
            .collect()
    }

    fn ensure_name_free(&self, name: &str, own_id: Option<i64>) -> Result<()> {
        match self.store.find_tag_by_name(name)? {
            Some(existing) if Some(existing.id) != own_id => Err(MjourError::Validation(format!(
                "A tag named '{}' already exists",
                existing.name
            ))),
            _ => Ok(()),
        }
    }
}
