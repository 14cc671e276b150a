//! Application layer - Use cases and orchestration

pub mod analytics;
pub mod init;
pub mod journal;
pub mod manage_config;
pub mod pin;
pub mod streaks;
pub mod tags;

pub use analytics::{AnalyticsService, Summary};
pub use journal::{JournalService, Page};
pub use manage_config::ConfigService;
pub use pin::PinService;
pub use streaks::StreakService;
pub use tags::TagService;
