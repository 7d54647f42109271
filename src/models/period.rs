//! Budget period representation
//!
//! Two period kinds exist: budget months (keyed "YYYY-MM" and anchored to the
//! user's reset day) and Monday-anchored ISO weeks (keyed "YYYY-Www").

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::calendar::{days_in_month, week_start};

/// A budget month, displayed and serialized as "YYYY-MM"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The calendar month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The budget month `date` belongs to when months start on `reset_day`
    ///
    /// On or after the reset day the date belongs to its own calendar month;
    /// before it, to the previous one.
    pub fn effective(date: NaiveDate, reset_day: u32) -> Self {
        let calendar = Self::of(date);
        if date.day() >= reset_day {
            calendar
        } else {
            calendar.prev()
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the budget month for the given reset day
    pub fn start_date(&self, reset_day: u32) -> NaiveDate {
        let day = reset_day.clamp(1, days_in_month(self.year, self.month));
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or(NaiveDate::MIN)
    }

    /// Last calendar day of the budget month for the given reset day (inclusive)
    pub fn end_date(&self, reset_day: u32) -> NaiveDate {
        self.next().start_date(reset_day) - Duration::days(1)
    }

    /// Check if a date falls within this budget month
    pub fn contains(&self, date: NaiveDate, reset_day: u32) -> bool {
        Self::effective(date, reset_day) == *self
    }

    /// Get the next month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Get the previous month
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Step back `count` months
    pub fn back(&self, count: u32) -> Self {
        (0..count).fold(*self, |key, _| key.prev())
    }

    /// Parse a "YYYY-MM" key
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }

    /// Human-friendly label ("January 2025")
    pub fn friendly(&self) -> String {
        const MONTH_NAMES: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// A Monday-to-Sunday ISO week
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoWeek {
    /// Monday of the week
    start: NaiveDate,
}

impl IsoWeek {
    /// The week containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            start: week_start(date),
        }
    }

    /// Monday of this week
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Sunday of this week (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }

    /// Check if a date falls within this week
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// The week `count` weeks before this one
    pub fn back(&self, count: u32) -> Self {
        Self {
            start: self.start - Duration::weeks(count as i64),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            start: self.start + Duration::weeks(1),
        }
    }

    pub fn prev(&self) -> Self {
        self.back(1)
    }

    /// The date within this week that falls on `weekday`
    pub fn day(&self, weekday: Weekday) -> NaiveDate {
        self.start + Duration::days(weekday.num_days_from_monday() as i64)
    }
}

impl fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let iso = self.start.iso_week();
        write!(f, "{:04}-W{:02}", iso.year(), iso.week())
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}
