//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod editor;
pub mod repository;
pub mod store;

pub use config::{Config, Theme};
pub use editor::EditorSession;
pub use repository::{FileSystemRepository, JournalRepository};
pub use store::{EntryFilter, JournalStore, SqliteStore};
