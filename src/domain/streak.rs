//! Streak computation over the set of entry dates

use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

/// Trailing window, in days before today, used for the stored missed-day count
pub const MISSED_DAYS_WINDOW: i64 = 30;

/// Derived streak state; always recomputed from the full entry set
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreakInfo {
    pub current_streak: u32,
    /// Running maximum of every current streak seen so far
    pub longest_streak: u32,
    pub total_entries: u32,
    pub total_days_with_entries: u32,
    pub missed_days: u32,
    pub last_entry_date: Option<NaiveDate>,
    pub streak_start_date: Option<NaiveDate>,
}

impl StreakInfo {
    /// Recompute from one date per stored entry.
    ///
    /// Only `longest_streak` is carried over from `self`; it is raised to the
    /// new current streak when that is larger and never lowered.
    pub fn recompute(&self, entry_dates: &[NaiveDate], today: NaiveDate) -> StreakInfo {
        let days: BTreeSet<NaiveDate> = entry_dates.iter().copied().collect();

        let (first, last) = match (days.first(), days.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => {
                return StreakInfo {
                    longest_streak: self.longest_streak,
                    ..StreakInfo::default()
                }
            }
        };

        // Today is still in progress, so a missing entry today does not break the streak.
        let has_today = days.contains(&today);
        let mut cursor = if has_today {
            today
        } else {
            today - Duration::days(1)
        };

        let mut current_streak = 0u32;
        while days.contains(&cursor) {
            current_streak += 1;
            cursor -= Duration::days(1);
        }

        let streak_start_date = match current_streak {
            0 => None,
            n if has_today => Some(today - Duration::days(n as i64 - 1)),
            n => Some(today - Duration::days(n as i64)),
        };

        let window_start = first.max(today - Duration::days(MISSED_DAYS_WINDOW));
        let missed_days = window_start
            .iter_days()
            .take_while(|d| *d <= today)
            .filter(|d| !days.contains(d))
            .count() as u32;

        StreakInfo {
            current_streak,
            longest_streak: self.longest_streak.max(current_streak),
            total_entries: entry_dates.len() as u32,
            total_days_with_entries: days.len() as u32,
            missed_days,
            last_entry_date: Some(last),
            streak_start_date,
        }
    }
}

/// Dates in `[today - days + 1, today]` without an entry, most recent first.
/// The window is cut short at the earliest representable date.
pub fn missed_days(entry_dates: &[NaiveDate], today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    let present: BTreeSet<NaiveDate> = entry_dates.iter().copied().collect();
    (0..days as i64)
        .map_while(|offset| today.checked_sub_signed(Duration::days(offset)))
        .filter(|d| !present.contains(d))
        .collect()
}
