//! Aggregations over the entry history

use crate::domain::{Entry, EntryTag, Mood, Tag};
use chrono::{Datelike, Duration, Months, NaiveDate};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: u32,
    /// Share of all filled mood slots, one decimal
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagUsage {
    pub tag: Tag,
    pub count: u32,
    /// Share of all join rows, one decimal
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCountPoint {
    pub date: NaiveDate,
    pub word_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyStats {
    pub year: i32,
    pub month: u32,
    pub entry_count: u32,
    pub total_words: u64,
    pub average_words: f64,
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn percentage(count: u32, total: u32) -> f64 {
    round1(count as f64 / total as f64 * 100.0)
}

/// Count every mood slot of the entries inside the optional window.
/// Ties are broken by mood order.
pub fn mood_distribution(
    entries: &[Entry],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<MoodCount> {
    let mut counts: BTreeMap<Mood, u32> = BTreeMap::new();
    for entry in entries {
        if from.is_some_and(|f| entry.entry_date < f) || to.is_some_and(|t| entry.entry_date > t) {
            continue;
        }
        for mood in entry.moods() {
            *counts.entry(mood).or_insert(0) += 1;
        }
    }

    let total: u32 = counts.values().sum();
    let mut distribution: Vec<MoodCount> = counts
        .into_iter()
        .map(|(mood, count)| MoodCount {
            mood,
            count,
            percentage: percentage(count, total),
        })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count).then(a.mood.cmp(&b.mood)));
    distribution
}

/// Count join rows per tag, keeping the `top_n` most used.
/// Ties are broken by tag name.
pub fn tag_usage(tags: &[Tag], rows: &[EntryTag], top_n: usize) -> Vec<TagUsage> {
    if rows.is_empty() {
        return Vec::new();
    }

    let mut counts: HashMap<i64, u32> = HashMap::new();
    for row in rows {
        *counts.entry(row.tag_id).or_insert(0) += 1;
    }
    let total = rows.len() as u32;

    let mut usage: Vec<TagUsage> = tags
        .iter()
        .filter_map(|tag| {
            counts.get(&tag.id).map(|&count| TagUsage {
                tag: tag.clone(),
                count,
                percentage: percentage(count, total),
            })
        })
        .collect();
    usage.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.name.cmp(&b.tag.name)));
    usage.truncate(top_n);
    usage
}

/// Words written per day from `today - days` onward; days without entries are omitted
pub fn word_count_trend(entries: &[Entry], today: NaiveDate, days: u32) -> Vec<WordCountPoint> {
    let start = today
        .checked_sub_signed(Duration::days(days as i64))
        .unwrap_or(NaiveDate::MIN);
    let mut per_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for entry in entries.iter().filter(|e| e.entry_date >= start) {
        *per_day.entry(entry.entry_date).or_insert(0) += entry.word_count;
    }
    per_day
        .into_iter()
        .map(|(date, word_count)| WordCountPoint { date, word_count })
        .collect()
}

/// Per-month rollups for entries dated on or after `today` minus `months` months
pub fn monthly_stats(entries: &[Entry], today: NaiveDate, months: u32) -> Vec<MonthlyStats> {
    let start = today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN);

    let mut groups: BTreeMap<(i32, u32), (u32, u64)> = BTreeMap::new();
    for entry in entries.iter().filter(|e| e.entry_date >= start) {
        let key = (entry.entry_date.year(), entry.entry_date.month());
        let group = groups.entry(key).or_insert((0, 0));
        group.0 += 1;
        group.1 += entry.word_count as u64;
    }

    groups
        .into_iter()
        .map(|((year, month), (entry_count, total_words))| MonthlyStats {
            year,
            month,
            entry_count,
            total_words,
            average_words: round1(total_words as f64 / entry_count as f64),
        })
        .collect()
}

pub fn most_frequent_mood(entries: &[Entry]) -> Option<Mood> {
    mood_distribution(entries, None, None)
        .first()
        .map(|m| m.mood)
}

pub fn total_word_count(entries: &[Entry]) -> u64 {
    entries.iter().map(|e| e.word_count as u64).sum()
}

/// Mean words per entry, one decimal; 0 when there are no entries
pub fn average_word_count(entries: &[Entry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    round1(total_word_count(entries) as f64 / entries.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(d: NaiveDate, words: &str, mood: Mood, secondary: &[Mood]) -> Entry {
        Entry::new(d, "t", words)
            .with_mood(mood)
            .with_secondary_moods(secondary)
    }

    fn tag(id: i64, name: &str) -> Tag {
        Tag {
            id,
            ..Tag::new(name, "#000000", NaiveDateTime::default())
        }
    }

    #[test]
    fn test_mood_distribution_counts_every_slot() {
        let entries = vec![
            entry(date(2025, 1, 1), "", Mood::Happy, &[Mood::Calm]),
            entry(date(2025, 1, 2), "", Mood::Happy, &[Mood::Calm, Mood::Tired]),
            entry(date(2025, 1, 3), "", Mood::Sad, &[]),
        ];
        let dist = mood_distribution(&entries, None, None);

        assert_eq!(dist.len(), 4);
        assert_eq!(dist[0].mood, Mood::Happy);
        assert_eq!(dist[0].count, 2);
        assert_eq!(dist[0].percentage, 33.3);
        assert_eq!(dist[1].mood, Mood::Calm);
        assert_eq!(dist[2].mood, Mood::Sad);
        assert_eq!(dist[2].percentage, 16.7);
        assert_eq!(dist[3].mood, Mood::Tired);

        let sum: f64 = dist.iter().map(|m| m.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.1);
    }

    #[test]
    fn test_mood_distribution_window() {
        let entries = vec![
            entry(date(2025, 1, 1), "", Mood::Happy, &[]),
            entry(date(2025, 1, 5), "", Mood::Sad, &[]),
            entry(date(2025, 1, 9), "", Mood::Angry, &[]),
        ];
        let dist = mood_distribution(&entries, Some(date(2025, 1, 2)), Some(date(2025, 1, 8)));
        assert_eq!(dist.len(), 1);
        assert_eq!(dist[0].mood, Mood::Sad);
        assert_eq!(dist[0].percentage, 100.0);
    }

    #[test]
    fn test_mood_distribution_empty() {
        assert!(mood_distribution(&[], None, None).is_empty());
        assert_eq!(most_frequent_mood(&[]), None);
    }

    #[test]
    fn test_tag_usage_percentages_of_rows() {
        let tags = vec![tag(1, "A"), tag(2, "B"), tag(3, "Unused")];
        let rows = vec![
            EntryTag { entry_id: 1, tag_id: 1 },
            EntryTag { entry_id: 2, tag_id: 1 },
            EntryTag { entry_id: 3, tag_id: 1 },
            EntryTag { entry_id: 3, tag_id: 2 },
        ];
        let usage = tag_usage(&tags, &rows, 10);
        assert_eq!(usage.len(), 2);
        assert_eq!(usage[0].tag.name, "A");
        assert_eq!(usage[0].count, 3);
        assert_eq!(usage[0].percentage, 75.0);
        assert_eq!(usage[1].tag.name, "B");
        assert_eq!(usage[1].percentage, 25.0);
    }

    #[test]
    fn test_tag_usage_top_n() {
        let tags = vec![tag(1, "A"), tag(2, "B")];
        let rows = vec![
            EntryTag { entry_id: 1, tag_id: 2 },
            EntryTag { entry_id: 2, tag_id: 2 },
            EntryTag { entry_id: 1, tag_id: 1 },
        ];
        let usage = tag_usage(&tags, &rows, 1);
        assert_eq!(usage.len(), 1);
        assert_eq!(usage[0].tag.name, "B");
        assert_eq!(usage[0].percentage, 66.7);
    }

    #[test]
    fn test_word_count_trend_huge_window() {
        let today = date(2025, 6, 10);
        assert!(word_count_trend(&[], today, u32::MAX).is_empty());

        let entries = vec![entry(date(1990, 1, 1), "a b c", Mood::Calm, &[])];
        let trend = word_count_trend(&entries, today, u32::MAX);
        assert_eq!(trend, vec![WordCountPoint { date: date(1990, 1, 1), word_count: 3 }]);
    }

    #[test]
    fn test_word_count_trend_sums_per_day() {
        let today = date(2025, 3, 31);
        let entries = vec![
            entry(date(2025, 3, 30), "one two three", Mood::Calm, &[]),
            entry(date(2025, 3, 1), "four five", Mood::Calm, &[]),
            entry(date(2025, 2, 1), "too old", Mood::Calm, &[]),
        ];
        let trend = word_count_trend(&entries, today, 30);
        assert_eq!(
            trend,
            vec![
                WordCountPoint {
                    date: date(2025, 3, 1),
                    word_count: 2
                },
                WordCountPoint {
                    date: date(2025, 3, 30),
                    word_count: 3
                },
            ]
        );
    }

    #[test]
    fn test_monthly_stats() {
        let today = date(2025, 3, 15);
        let entries = vec![
            entry(date(2025, 3, 2), "a b c d", Mood::Calm, &[]),
            entry(date(2025, 3, 1), "a b c", Mood::Calm, &[]),
            entry(date(2025, 1, 20), "a", Mood::Calm, &[]),
            entry(date(2024, 9, 1), "old entry", Mood::Calm, &[]),
        ];
        let stats = monthly_stats(&entries, today, 6);
        assert_eq!(stats.len(), 2);
        assert_eq!((stats[0].year, stats[0].month), (2025, 1));
        assert_eq!(stats[0].entry_count, 1);
        assert_eq!((stats[1].year, stats[1].month), (2025, 3));
        assert_eq!(stats[1].entry_count, 2);
        assert_eq!(stats[1].total_words, 7);
        assert_eq!(stats[1].average_words, 3.5);
    }

    #[test]
    fn test_totals_and_average() {
        let entries = vec![
            entry(date(2025, 1, 1), "a b", Mood::Calm, &[]),
            entry(date(2025, 1, 2), "a b c d", Mood::Calm, &[]),
            entry(date(2025, 1, 3), "a b c d", Mood::Calm, &[]),
        ];
        assert_eq!(total_word_count(&entries), 10);
        assert_eq!(average_word_count(&entries), 3.3);
        assert_eq!(average_word_count(&[]), 0.0);
    }
}
