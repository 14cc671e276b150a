//! Entry store: the storage contract the engines depend on, and its SQLite backing

use crate::domain::{Entry, EntryTag, Mood, StreakInfo, Tag, UserSettings};
use crate::error::Result;
use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::str::FromStr;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS entries (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    title           TEXT NOT NULL,
    content         TEXT NOT NULL,
    entry_date      TEXT NOT NULL UNIQUE,
    created_at      TEXT NOT NULL,
    modified_at     TEXT NOT NULL,
    primary_mood    TEXT NOT NULL,
    secondary_mood1 TEXT,
    secondary_mood2 TEXT,
    word_count      INTEGER NOT NULL DEFAULT 0,
    is_favorite     INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS tags (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE COLLATE NOCASE,
    color       TEXT NOT NULL,
    is_prebuilt INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS entry_tags (
    entry_id INTEGER NOT NULL REFERENCES entries(id),
    tag_id   INTEGER NOT NULL REFERENCES tags(id),
    PRIMARY KEY (entry_id, tag_id)
);
CREATE INDEX IF NOT EXISTS idx_entry_tags_tag ON entry_tags(tag_id);
CREATE TABLE IF NOT EXISTS streak_info (
    id                      INTEGER PRIMARY KEY CHECK (id = 1),
    current_streak          INTEGER NOT NULL,
    longest_streak          INTEGER NOT NULL,
    total_entries           INTEGER NOT NULL,
    total_days_with_entries INTEGER NOT NULL,
    missed_days             INTEGER NOT NULL,
    last_entry_date         TEXT,
    streak_start_date       TEXT
);
CREATE TABLE IF NOT EXISTS settings (
    id       INTEGER PRIMARY KEY CHECK (id = 1),
    pin_hash TEXT,
    pin_salt TEXT
);
";

const ENTRY_COLUMNS: &str = "id, title, content, entry_date, created_at, modified_at, \
     primary_mood, secondary_mood1, secondary_mood2, word_count, is_favorite";

const TAG_COLUMNS: &str = "id, name, color, is_prebuilt, created_at";

/// Conditions combined with AND; `None` fields are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Matches any of the three mood slots
    pub mood: Option<Mood>,
    pub tag_id: Option<i64>,
}

/// Storage operations used by the journal, tag, streak and analytics services.
///
/// Entries come back without their tags; callers resolve them through the join.
/// Entry queries are ordered by entry date, newest first.
pub trait JournalStore {
    /// Run `f` as one unit: everything it wrote is kept only if it returns `Ok`
    fn in_transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>;

    fn get_entry(&self, id: i64) -> Result<Option<Entry>>;
    fn get_entry_by_date(&self, date: NaiveDate) -> Result<Option<Entry>>;
    fn query_entries(&self, filter: &EntryFilter) -> Result<Vec<Entry>>;
    fn count_entries(&self) -> Result<u32>;
    /// One date per stored entry
    fn entry_dates(&self) -> Result<Vec<NaiveDate>>;
    fn insert_entry(&self, entry: &Entry) -> Result<i64>;
    fn update_entry(&self, entry: &Entry) -> Result<usize>;
    fn delete_entry(&self, id: i64) -> Result<usize>;

    /// All tags ordered by name
    fn all_tags(&self) -> Result<Vec<Tag>>;
    fn get_tag(&self, id: i64) -> Result<Option<Tag>>;
    /// Case-insensitive lookup
    fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>>;
    fn count_prebuilt_tags(&self) -> Result<u32>;
    fn insert_tag(&self, tag: &Tag) -> Result<i64>;
    fn update_tag(&self, tag: &Tag) -> Result<usize>;
    fn delete_tag(&self, id: i64) -> Result<usize>;

    fn tags_for_entry(&self, entry_id: i64) -> Result<Vec<Tag>>;
    fn entry_tag_rows(&self) -> Result<Vec<EntryTag>>;
    /// Inserting an existing pair is a no-op
    fn insert_entry_tag(&self, row: EntryTag) -> Result<()>;
    fn delete_entry_tags_for_entry(&self, entry_id: i64) -> Result<usize>;
    fn delete_entry_tags_for_tag(&self, tag_id: i64) -> Result<usize>;

    fn load_streak(&self) -> Result<Option<StreakInfo>>;
    /// Overwrite the single streak row
    fn save_streak(&self, info: &StreakInfo) -> Result<()>;
    fn load_settings(&self) -> Result<Option<UserSettings>>;
    /// Overwrite the single settings row
    fn save_settings(&self, settings: &UserSettings) -> Result<()>;
}

/// SQLite-backed store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStore { conn })
    }

    fn query_tags(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, tag_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

impl ToSql for Mood {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Mood {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()
            .and_then(|s| Mood::from_str(s).map_err(|e| FromSqlError::Other(e.into())))
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        entry_date: row.get(3)?,
        created_at: row.get(4)?,
        modified_at: row.get(5)?,
        primary_mood: row.get(6)?,
        secondary_moods: [row.get(7)?, row.get(8)?],
        word_count: row.get(9)?,
        is_favorite: row.get(10)?,
        tags: Vec::new(),
    })
}

fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
        is_prebuilt: row.get(3)?,
        created_at: row.get(4)?,
    })
}

impl JournalStore for SqliteStore {
    fn in_transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        // Dropping the transaction without commit rolls it back.
        let tx = self.conn.unchecked_transaction()?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }

    fn get_entry(&self, id: i64) -> Result<Option<Entry>> {
        let sql = format!("SELECT {} FROM entries WHERE id = ?1", ENTRY_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![id], entry_from_row)
            .optional()?)
    }

    fn get_entry_by_date(&self, date: NaiveDate) -> Result<Option<Entry>> {
        let sql = format!("SELECT {} FROM entries WHERE entry_date = ?1", ENTRY_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![date], entry_from_row)
            .optional()?)
    }

    fn query_entries(&self, filter: &EntryFilter) -> Result<Vec<Entry>> {
        let mut sql = format!("SELECT {} FROM entries WHERE 1 = 1", ENTRY_COLUMNS);
        let mut values: Vec<&dyn ToSql> = Vec::new();

        if let Some(from) = &filter.from {
            sql.push_str(" AND entry_date >= ?");
            values.push(from);
        }
        if let Some(to) = &filter.to {
            sql.push_str(" AND entry_date <= ?");
            values.push(to);
        }
        if let Some(mood) = &filter.mood {
            sql.push_str(" AND (primary_mood = ? OR secondary_mood1 = ? OR secondary_mood2 = ?)");
            values.push(mood);
            values.push(mood);
            values.push(mood);
        }
        if let Some(tag_id) = &filter.tag_id {
            sql.push_str(" AND id IN (SELECT entry_id FROM entry_tags WHERE tag_id = ?)");
            values.push(tag_id);
        }
        sql.push_str(" ORDER BY entry_date DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(values.as_slice(), entry_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn count_entries(&self) -> Result<u32> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?)
    }

    fn entry_dates(&self) -> Result<Vec<NaiveDate>> {
        let mut stmt = self.conn.prepare("SELECT entry_date FROM entries")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn insert_entry(&self, entry: &Entry) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO entries (title, content, entry_date, created_at, modified_at,
                 primary_mood, secondary_mood1, secondary_mood2, word_count, is_favorite)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                entry.title,
                entry.content,
                entry.entry_date,
                entry.created_at,
                entry.modified_at,
                entry.primary_mood,
                entry.secondary_moods[0],
                entry.secondary_moods[1],
                entry.word_count,
                entry.is_favorite,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_entry(&self, entry: &Entry) -> Result<usize> {
        Ok(self.conn.execute(
            "UPDATE entries SET title = ?2, content = ?3, entry_date = ?4, created_at = ?5,
                 modified_at = ?6, primary_mood = ?7, secondary_mood1 = ?8,
                 secondary_mood2 = ?9, word_count = ?10, is_favorite = ?11
             WHERE id = ?1",
            params![
                entry.id,
                entry.title,
                entry.content,
                entry.entry_date,
                entry.created_at,
                entry.modified_at,
                entry.primary_mood,
                entry.secondary_moods[0],
                entry.secondary_moods[1],
                entry.word_count,
                entry.is_favorite,
            ],
        )?)
    }

    fn delete_entry(&self, id: i64) -> Result<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM entries WHERE id = ?1", params![id])?)
    }

    fn all_tags(&self) -> Result<Vec<Tag>> {
        let sql = format!("SELECT {} FROM tags ORDER BY name COLLATE NOCASE", TAG_COLUMNS);
        self.query_tags(&sql, &[])
    }

    fn get_tag(&self, id: i64) -> Result<Option<Tag>> {
        let sql = format!("SELECT {} FROM tags WHERE id = ?1", TAG_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![id], tag_from_row)
            .optional()?)
    }

    fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let sql = format!("SELECT {} FROM tags WHERE name = ?1 COLLATE NOCASE", TAG_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![name.trim()], tag_from_row)
            .optional()?)
    }

    fn count_prebuilt_tags(&self) -> Result<u32> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM tags WHERE is_prebuilt = 1",
            [],
            |row| row.get(0),
        )?)
    }

    fn insert_tag(&self, tag: &Tag) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO tags (name, color, is_prebuilt, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![tag.name, tag.color, tag.is_prebuilt, tag.created_at],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_tag(&self, tag: &Tag) -> Result<usize> {
        Ok(self.conn.execute(
            "UPDATE tags SET name = ?2, color = ?3 WHERE id = ?1",
            params![tag.id, tag.name, tag.color],
        )?)
    }

    fn delete_tag(&self, id: i64) -> Result<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM tags WHERE id = ?1", params![id])?)
    }

    fn tags_for_entry(&self, entry_id: i64) -> Result<Vec<Tag>> {
        let sql = format!(
            "SELECT {} FROM tags WHERE id IN (SELECT tag_id FROM entry_tags WHERE entry_id = ?1)
             ORDER BY name COLLATE NOCASE",
            TAG_COLUMNS
        );
        self.query_tags(&sql, &[&entry_id])
    }

    fn entry_tag_rows(&self) -> Result<Vec<EntryTag>> {
        let mut stmt = self.conn.prepare("SELECT entry_id, tag_id FROM entry_tags")?;
        let rows = stmt.query_map([], |row| {
            Ok(EntryTag {
                entry_id: row.get(0)?,
                tag_id: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn insert_entry_tag(&self, row: EntryTag) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO entry_tags (entry_id, tag_id) VALUES (?1, ?2)",
            params![row.entry_id, row.tag_id],
        )?;
        Ok(())
    }

    fn delete_entry_tags_for_entry(&self, entry_id: i64) -> Result<usize> {
        Ok(self.conn.execute(
            "DELETE FROM entry_tags WHERE entry_id = ?1",
            params![entry_id],
        )?)
    }

    fn delete_entry_tags_for_tag(&self, tag_id: i64) -> Result<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM entry_tags WHERE tag_id = ?1", params![tag_id])?)
    }

    fn load_streak(&self) -> Result<Option<StreakInfo>> {
        Ok(self
            .conn
            .query_row(
                "SELECT current_streak, longest_streak, total_entries, total_days_with_entries,
                     missed_days, last_entry_date, streak_start_date
                 FROM streak_info WHERE id = 1",
                [],
                |row| {
                    Ok(StreakInfo {
                        current_streak: row.get(0)?,
                        longest_streak: row.get(1)?,
                        total_entries: row.get(2)?,
                        total_days_with_entries: row.get(3)?,
                        missed_days: row.get(4)?,
                        last_entry_date: row.get(5)?,
                        streak_start_date: row.get(6)?,
                    })
                },
            )
            .optional()?)
    }

    fn save_streak(&self, info: &StreakInfo) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO streak_info (id, current_streak, longest_streak, total_entries,
                 total_days_with_entries, missed_days, last_entry_date, streak_start_date)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                info.current_streak,
                info.longest_streak,
                info.total_entries,
                info.total_days_with_entries,
                info.missed_days,
                info.last_entry_date,
                info.streak_start_date,
            ],
        )?;
        Ok(())
    }

    fn load_settings(&self) -> Result<Option<UserSettings>> {
        Ok(self
            .conn
            .query_row(
                "SELECT pin_hash, pin_salt FROM settings WHERE id = 1",
                [],
                |row| {
                    Ok(UserSettings {
                        pin_hash: row.get(0)?,
                        pin_salt: row.get(1)?,
                    })
                },
            )
            .optional()?)
    }

    fn save_settings(&self, settings: &UserSettings) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (id, pin_hash, pin_salt) VALUES (1, ?1, ?2)",
            params![settings.pin_hash, settings.pin_salt],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MjourError;
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stamp() -> NaiveDateTime {
        date(2025, 1, 17).and_hms_opt(8, 30, 0).unwrap()
    }

    fn insert(store: &SqliteStore, entry: Entry) -> i64 {
        store.insert_entry(&entry).unwrap()
    }

    #[test]
    fn test_insert_and_get_entry() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut entry = Entry::new(date(2025, 1, 17), "Title", "one two")
            .with_mood(Mood::Grateful)
            .with_secondary_moods(&[Mood::Calm]);
        entry.created_at = stamp();
        entry.modified_at = stamp();
        entry.is_favorite = true;

        let id = insert(&store, entry.clone());
        assert!(id > 0);

        let loaded = store.get_entry(id).unwrap().unwrap();
        assert_eq!(loaded, Entry { id, ..entry });
        assert_eq!(
            store.get_entry_by_date(date(2025, 1, 17)).unwrap().unwrap().id,
            id
        );
        assert!(store.get_entry(id + 1).unwrap().is_none());
    }

    #[test]
    fn test_unique_entry_date_enforced() {
        let store = SqliteStore::open_in_memory().unwrap();
        insert(&store, Entry::new(date(2025, 1, 17), "a", ""));
        let err = store
            .insert_entry(&Entry::new(date(2025, 1, 17), "b", ""))
            .unwrap_err();
        assert!(matches!(err, MjourError::Storage(_)));
    }

    #[test]
    fn test_query_entries_filters_and_orders() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = insert(
            &store,
            Entry::new(date(2025, 1, 1), "a", "").with_mood(Mood::Happy),
        );
        let b = insert(
            &store,
            Entry::new(date(2025, 1, 5), "b", "")
                .with_mood(Mood::Sad)
                .with_secondary_moods(&[Mood::Tired, Mood::Happy]),
        );
        let c = insert(
            &store,
            Entry::new(date(2025, 1, 9), "c", "").with_mood(Mood::Calm),
        );

        let all = store.query_entries(&EntryFilter::default()).unwrap();
        assert_eq!(all.iter().map(|e| e.id).collect::<Vec<_>>(), vec![c, b, a]);

        let happy = store
            .query_entries(&EntryFilter {
                mood: Some(Mood::Happy),
                ..EntryFilter::default()
            })
            .unwrap();
        assert_eq!(happy.iter().map(|e| e.id).collect::<Vec<_>>(), vec![b, a]);

        let ranged = store
            .query_entries(&EntryFilter {
                from: Some(date(2025, 1, 2)),
                to: Some(date(2025, 1, 9)),
                ..EntryFilter::default()
            })
            .unwrap();
        assert_eq!(ranged.iter().map(|e| e.id).collect::<Vec<_>>(), vec![c, b]);

        let tag_id = store.insert_tag(&Tag::new("Books", "#000000", stamp())).unwrap();
        store
            .insert_entry_tag(EntryTag { entry_id: a, tag_id })
            .unwrap();
        let tagged = store
            .query_entries(&EntryFilter {
                tag_id: Some(tag_id),
                mood: Some(Mood::Happy),
                ..EntryFilter::default()
            })
            .unwrap();
        assert_eq!(tagged.iter().map(|e| e.id).collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn test_entry_tag_rows_are_unique_pairs() {
        let store = SqliteStore::open_in_memory().unwrap();
        let entry_id = insert(&store, Entry::new(date(2025, 1, 1), "a", ""));
        let tag_id = store.insert_tag(&Tag::new("Books", "#000000", stamp())).unwrap();

        let row = EntryTag { entry_id, tag_id };
        store.insert_entry_tag(row).unwrap();
        store.insert_entry_tag(row).unwrap();

        assert_eq!(store.entry_tag_rows().unwrap(), vec![row]);
        assert_eq!(store.tags_for_entry(entry_id).unwrap()[0].name, "Books");
        assert_eq!(store.delete_entry_tags_for_tag(tag_id).unwrap(), 1);
        assert!(store.tags_for_entry(entry_id).unwrap().is_empty());
    }

    #[test]
    fn test_join_rejects_unknown_tag() {
        let store = SqliteStore::open_in_memory().unwrap();
        let entry_id = insert(&store, Entry::new(date(2025, 1, 1), "a", ""));
        assert!(store
            .insert_entry_tag(EntryTag {
                entry_id,
                tag_id: 999
            })
            .is_err());
    }

    #[test]
    fn test_tag_names_unique_case_insensitive() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_tag(&Tag::new("Books", "#000000", stamp())).unwrap();
        assert!(store
            .insert_tag(&Tag::new("books", "#000000", stamp()))
            .is_err());
        assert_eq!(
            store.find_tag_by_name("BOOKS").unwrap().unwrap().name,
            "Books"
        );
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let store = SqliteStore::open_in_memory().unwrap();
        let result: Result<()> = store.in_transaction(|s| {
            s.insert_entry(&Entry::new(date(2025, 1, 1), "a", ""))?;
            Err(MjourError::Validation("abort".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(store.count_entries().unwrap(), 0);

        store
            .in_transaction(|s| s.insert_entry(&Entry::new(date(2025, 1, 1), "a", "")))
            .unwrap();
        assert_eq!(store.count_entries().unwrap(), 1);
    }

    #[test]
    fn test_streak_row_is_overwritten() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.load_streak().unwrap().is_none());

        let first = StreakInfo {
            current_streak: 2,
            longest_streak: 5,
            last_entry_date: Some(date(2025, 1, 17)),
            ..StreakInfo::default()
        };
        store.save_streak(&first).unwrap();
        let second = StreakInfo {
            current_streak: 1,
            ..first.clone()
        };
        store.save_streak(&second).unwrap();

        assert_eq!(store.load_streak().unwrap(), Some(second));
    }

    #[test]
    fn test_settings_row_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.load_settings().unwrap().is_none());
        let settings = UserSettings {
            pin_hash: Some("h".to_string()),
            pin_salt: Some("s".to_string()),
        };
        store.save_settings(&settings).unwrap();
        assert_eq!(store.load_settings().unwrap(), Some(settings));
    }

    #[test]
    fn test_open_file_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("journal.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            insert(&store, Entry::new(date(2025, 1, 1), "a", "x y"));
        }
        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.count_entries().unwrap(), 1);
        assert_eq!(reopened.entry_dates().unwrap(), vec![date(2025, 1, 1)]);
    }
}
