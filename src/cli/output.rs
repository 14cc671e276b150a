//! Output formatting utilities

use crate::application::{Page, Summary};
use crate::domain::analytics::{MonthlyStats, MoodCount, TagUsage, WordCountPoint};
use crate::domain::entry::DEFAULT_PREVIEW_LEN;
use crate::domain::{Entry, StreakInfo, Tag};
use chrono::{Datelike, NaiveDate};

const DATE_FORMAT: &str = "%d-%m-%Y";
const BAR_WIDTH: f64 = 30.0;

fn tag_names(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t.name))
        .collect::<Vec<_>>()
        .join(" ")
}

fn bar(percentage: f64) -> String {
    "█".repeat((percentage / 100.0 * BAR_WIDTH).round() as usize)
}

fn entry_line(entry: &Entry) -> String {
    let mut line = format!(
        "#{:<4} {}  {} {}{} ({} words)",
        entry.id,
        entry.entry_date.format(DATE_FORMAT),
        entry.primary_mood.emoji(),
        entry.title,
        if entry.is_favorite { " ★" } else { "" },
        entry.word_count,
    );
    if !entry.tags.is_empty() {
        line.push_str(&format!("  {}", tag_names(&entry.tags)));
    }
    line
}

/// One line per entry, newest first as given
pub fn format_entry_list(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry_line(entry));
        output.push('\n');
    }
    output
}

/// Entry lines each followed by a plain-text preview of the content
pub fn format_search_results(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No matching entries".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry_line(entry));
        output.push('\n');
        let preview = entry.preview(DEFAULT_PREVIEW_LEN);
        if !preview.is_empty() {
            output.push_str(&format!("      {}\n", preview));
        }
    }
    output
}

pub fn format_page(page: &Page) -> String {
    let mut output = format_entry_list(&page.entries);
    if !page.entries.is_empty() {
        output.push_str(&format!(
            "\nPage {} of {} ({} entries)\n",
            page.page,
            page.total_pages(),
            page.total_count
        ));
    }
    output
}

/// Full entry: header, moods, tags and content
pub fn format_entry(entry: &Entry) -> String {
    let mut output = format!(
        "#{}  {}{}\n{}\n",
        entry.id,
        entry.title,
        if entry.is_favorite { " ★" } else { "" },
        entry.entry_date.format("%A, %d %B %Y"),
    );

    let moods = entry
        .moods()
        .map(|m| format!("{} {}", m.emoji(), m))
        .collect::<Vec<_>>()
        .join(", ");
    output.push_str(&format!("Mood: {}\n", moods));
    if !entry.tags.is_empty() {
        output.push_str(&format!("Tags: {}\n", tag_names(&entry.tags)));
    }
    output.push_str(&format!("Words: {}\n", entry.word_count));

    if !entry.content.trim().is_empty() {
        output.push('\n');
        output.push_str(entry.content.trim_end());
        output.push('\n');
    }
    output
}

pub fn format_streak(info: &StreakInfo) -> String {
    let mut output = format!(
        "Current streak: {} day{}\n",
        info.current_streak,
        if info.current_streak == 1 { "" } else { "s" }
    );
    if let Some(start) = info.streak_start_date {
        output.push_str(&format!("  since {}\n", start.format(DATE_FORMAT)));
    }
    output.push_str(&format!("Longest streak: {}\n", info.longest_streak));
    output.push_str(&format!("Total entries: {}\n", info.total_entries));
    output.push_str(&format!("Days written: {}\n", info.total_days_with_entries));
    output.push_str(&format!("Missed days (last 30): {}\n", info.missed_days));
    if let Some(last) = info.last_entry_date {
        output.push_str(&format!("Last entry: {}\n", last.format(DATE_FORMAT)));
    }
    output
}

pub fn format_missed(dates: &[NaiveDate]) -> String {
    if dates.is_empty() {
        return "No missed days".to_string();
    }

    let mut output = String::new();
    for date in dates {
        output.push_str(&format!("{}  {}\n", date.format(DATE_FORMAT), date.format("%A")));
    }
    output
}

/// Month grid starting on Monday; days with an entry are starred
pub fn format_calendar(year: i32, month: u32, dates: &[NaiveDate]) -> String {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return String::new();
    };

    let mut output = format!("{}\n", first.format("%B %Y"));
    output.push_str(" Mo  Tu  We  Th  Fr  Sa  Su\n");

    let offset = first.weekday().num_days_from_monday() as usize;
    output.push_str(&"    ".repeat(offset));

    let mut day = first;
    let mut column = offset;
    while day.month() == month {
        let mark = if dates.contains(&day) { '*' } else { ' ' };
        output.push_str(&format!("{:>3}{}", day.day(), mark));
        column += 1;
        if column == 7 {
            output.truncate(output.trim_end().len());
            output.push('\n');
            column = 0;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    if column != 0 {
        output.truncate(output.trim_end().len());
        output.push('\n');
    }

    output.push_str(&format!("\n{} day(s) with entries\n", dates.len()));
    output
}

pub fn format_mood_distribution(counts: &[MoodCount]) -> String {
    if counts.is_empty() {
        return "No moods recorded".to_string();
    }

    let mut output = String::new();
    for count in counts {
        output.push_str(&format!(
            "{} {:<10} {:>4} {:>5.1}% {}\n",
            count.mood.emoji(),
            count.mood.as_str(),
            count.count,
            count.percentage,
            bar(count.percentage)
        ));
    }
    output
}

pub fn format_tag_usage(usage: &[TagUsage]) -> String {
    if usage.is_empty() {
        return "No tagged entries".to_string();
    }

    let mut output = String::new();
    for item in usage {
        output.push_str(&format!(
            "#{:<15} {:>4} {:>5.1}% {}\n",
            item.tag.name,
            item.count,
            item.percentage,
            bar(item.percentage)
        ));
    }
    output
}

pub fn format_trend(points: &[WordCountPoint]) -> String {
    if points.is_empty() {
        return "No entries in this period".to_string();
    }

    let mut output = String::new();
    for point in points {
        output.push_str(&format!(
            "{}  {:>6} words\n",
            point.date.format(DATE_FORMAT),
            point.word_count
        ));
    }
    output
}

pub fn format_monthly(stats: &[MonthlyStats]) -> String {
    if stats.is_empty() {
        return "No entries in this period".to_string();
    }

    let mut output = String::from("Month     Entries   Words   Avg\n");
    for month in stats {
        output.push_str(&format!(
            "{}-{:02}   {:>7} {:>7} {:>5.1}\n",
            month.year, month.month, month.entry_count, month.total_words, month.average_words
        ));
    }
    output
}

pub fn format_summary(summary: &Summary) -> String {
    let mood = summary
        .most_frequent_mood
        .map(|m| format!("{} {}", m.emoji(), m))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "Entries: {}\nTotal words: {}\nAverage words: {:.1}\nMost frequent mood: {}\n",
        summary.total_entries, summary.total_words, summary.average_words, mood
    )
}

/// Format a list of tags for display.
pub fn format_tag_list(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for tag in tags {
        output.push_str(&format!(
            "{:>4}  {}  #{}{}\n",
            tag.id,
            tag.color,
            tag.name,
            if tag.is_prebuilt { " (pre-built)" } else { "" }
        ));
    }
    output
}
