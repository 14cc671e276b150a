//! Parsing of day references given on the command line

use crate::error::{MjourError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// A calendar day named relative to today or spelled out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRef {
    Today,
    Yesterday,
    /// Most recent occurrence of a weekday, today included
    Weekday(Weekday),
    /// Occurrence of a weekday strictly before today
    LastWeekday(Weekday),
    Date(NaiveDate),
}

impl DayRef {
    /// Parse `today`, `yesterday`, `friday`, `last friday`, `DD-MM-YYYY` or `YYYY-MM-DD`
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "today" | "now" => Ok(DayRef::Today),
            "yesterday" => Ok(DayRef::Yesterday),
            _ if normalized.starts_with("last ") => parse_weekday(&normalized[5..])
                .map(DayRef::LastWeekday)
                .ok_or_else(|| MjourError::InvalidDate(input.to_string())),
            _ => {
                if let Some(weekday) = parse_weekday(&normalized) {
                    return Ok(DayRef::Weekday(weekday));
                }
                NaiveDate::parse_from_str(&normalized, "%d-%m-%Y")
                    .or_else(|_| NaiveDate::parse_from_str(&normalized, "%Y-%m-%d"))
                    .map(DayRef::Date)
                    .map_err(|_| MjourError::InvalidDate(input.to_string()))
            }
        }
    }

    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DayRef::Today => today,
            DayRef::Yesterday => today - Duration::days(1),
            DayRef::Weekday(target) => today - Duration::days(days_back(today, *target) as i64),
            DayRef::LastWeekday(target) => {
                let back = match days_back(today, *target) {
                    0 => 7,
                    n => n,
                };
                today - Duration::days(back as i64)
            }
            DayRef::Date(date) => *date,
        }
    }
}

/// Parse a reference and resolve it against `today` in one step
pub fn parse_day(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    DayRef::parse(input).map(|day| day.resolve(today))
}

fn days_back(today: NaiveDate, target: Weekday) -> u32 {
    (today.weekday().num_days_from_monday() + 7 - target.num_days_from_monday()) % 7
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Friday
    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
    }

    #[test]
    fn test_parse_simple_refs() {
        assert_eq!(DayRef::parse("today").unwrap(), DayRef::Today);
        assert_eq!(DayRef::parse("NOW").unwrap(), DayRef::Today);
        assert_eq!(DayRef::parse("yesterday").unwrap(), DayRef::Yesterday);
        assert_eq!(
            DayRef::parse("monday").unwrap(),
            DayRef::Weekday(Weekday::Mon)
        );
        assert_eq!(
            DayRef::parse("last fri").unwrap(),
            DayRef::LastWeekday(Weekday::Fri)
        );
    }

    #[test]
    fn test_parse_both_date_formats() {
        let expected = DayRef::Date(base());
        assert_eq!(DayRef::parse("17-01-2025").unwrap(), expected);
        assert_eq!(DayRef::parse("2025-01-17").unwrap(), expected);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(DayRef::parse("tomorrow-ish").is_err());
        assert!(DayRef::parse("32-01-2025").is_err());
        assert!(DayRef::parse("last someday").is_err());
        assert!(matches!(
            DayRef::parse("nope"),
            Err(MjourError::InvalidDate(s)) if s == "nope"
        ));
    }

    #[test]
    fn test_resolve_relative_days() {
        assert_eq!(DayRef::Today.resolve(base()), base());
        assert_eq!(
            DayRef::Yesterday.resolve(base()),
            NaiveDate::from_ymd_opt(2025, 1, 16).unwrap()
        );
    }

    #[test]
    fn test_resolve_weekdays() {
        assert_eq!(DayRef::Weekday(Weekday::Fri).resolve(base()), base());
        assert_eq!(
            DayRef::Weekday(Weekday::Mon).resolve(base()),
            NaiveDate::from_ymd_opt(2025, 1, 13).unwrap()
        );
        assert_eq!(
            DayRef::LastWeekday(Weekday::Fri).resolve(base()),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
        );
        assert_eq!(
            DayRef::LastWeekday(Weekday::Sat).resolve(base()),
            NaiveDate::from_ymd_opt(2025, 1, 11).unwrap()
        );
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(
            parse_day("yesterday", base()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 16).unwrap()
        );
    }
}
