//! Date-range classification for record dates.
//!
//! Buckets are calendar periods containing the reference day: the same
//! day, ISO week, month, quarter or year. A date that cannot be parsed is
//! in no specific bucket, but is still in `All`.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateBucket {
    Today,
    ThisWeek,
    ThisMonth,
    ThisQuarter,
    ThisYear,
    All,
}

impl DateBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateBucket::Today => "today",
            DateBucket::ThisWeek => "this-week",
            DateBucket::ThisMonth => "this-month",
            DateBucket::ThisQuarter => "this-quarter",
            DateBucket::ThisYear => "this-year",
            DateBucket::All => "all",
        }
    }
}

impl FromStr for DateBucket {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(DateBucket::Today),
            "this-week" | "week" => Ok(DateBucket::ThisWeek),
            "this-month" | "month" => Ok(DateBucket::ThisMonth),
            "this-quarter" | "quarter" => Ok(DateBucket::ThisQuarter),
            "this-year" | "year" => Ok(DateBucket::ThisYear),
            "all" | "" => Ok(DateBucket::All),
            other => Err(ParseError::UnknownDateBucket(other.to_string())),
        }
    }
}

/// Decides whether a date string falls into a bucket.
pub trait DateRangeClassifier: Send + Sync {
    fn classify(&self, date: &str, bucket: DateBucket) -> bool;
}

/// Calendar-period classifier anchored on a fixed reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarClassifier {
    today: NaiveDate,
}

impl CalendarClassifier {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Anchored on the local calendar day at construction time.
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.today
    }
}

impl DateRangeClassifier for CalendarClassifier {
    fn classify(&self, date: &str, bucket: DateBucket) -> bool {
        if bucket == DateBucket::All {
            return true;
        }
        let Some(date) = parse_record_date(date) else {
            return false;
        };
        let today = self.today;
        match bucket {
            DateBucket::Today => date == today,
            DateBucket::ThisWeek => date.iso_week() == today.iso_week(),
            DateBucket::ThisMonth => date.year() == today.year() && date.month() == today.month(),
            DateBucket::ThisQuarter => {
                date.year() == today.year() && date.month0() / 3 == today.month0() / 3
            }
            DateBucket::ThisYear => date.year() == today.year(),
            DateBucket::All => true,
        }
    }
}

/// Parse `YYYY-MM-DD`, RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS` timestamp.
pub fn parse_record_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> CalendarClassifier {
        // a Wednesday
        CalendarClassifier::new(NaiveDate::from_ymd_opt(2024, 5, 15).unwrap())
    }

    #[test]
    fn test_parse_bucket_names() {
        assert_eq!("this-week".parse::<DateBucket>().unwrap(), DateBucket::ThisWeek);
        assert_eq!("Month".parse::<DateBucket>().unwrap(), DateBucket::ThisMonth);
        assert_eq!("all".parse::<DateBucket>().unwrap(), DateBucket::All);
        assert!("fortnight".parse::<DateBucket>().is_err());
    }

    #[test]
    fn test_today_and_week() {
        let c = classifier();
        assert!(c.classify("2024-05-15", DateBucket::Today));
        assert!(!c.classify("2024-05-14", DateBucket::Today));
        // Monday of the same ISO week
        assert!(c.classify("2024-05-13", DateBucket::ThisWeek));
        // Sunday before belongs to the previous week
        assert!(!c.classify("2024-05-12", DateBucket::ThisWeek));
    }

    #[test]
    fn test_month_quarter_year() {
        let c = classifier();
        assert!(c.classify("2024-05-01", DateBucket::ThisMonth));
        assert!(!c.classify("2024-04-30", DateBucket::ThisMonth));
        assert!(c.classify("2024-04-01", DateBucket::ThisQuarter));
        assert!(!c.classify("2024-07-01", DateBucket::ThisQuarter));
        assert!(c.classify("2024-01-01", DateBucket::ThisYear));
        assert!(!c.classify("2023-12-31", DateBucket::ThisYear));
    }

    #[test]
    fn test_timestamps_are_accepted() {
        let c = classifier();
        assert!(c.classify("2024-05-15T09:30:00Z", DateBucket::Today));
        assert!(c.classify("2024-05-15T09:30:00", DateBucket::Today));
    }

    #[test]
    fn test_malformed_dates() {
        let c = classifier();
        assert!(!c.classify("not a date", DateBucket::ThisYear));
        assert!(!c.classify("", DateBucket::Today));
        assert!(c.classify("not a date", DateBucket::All));
    }
}
