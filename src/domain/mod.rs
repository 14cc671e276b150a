//! Domain layer - Models and the derived-metrics algorithms

pub mod analytics;
pub mod day_ref;
pub mod entry;
pub mod mood;
pub mod settings;
pub mod streak;
pub mod tag;

pub use day_ref::{parse_day, DayRef};
pub use entry::Entry;
pub use mood::Mood;
pub use settings::UserSettings;
pub use streak::StreakInfo;
pub use tag::{EntryTag, Tag};
