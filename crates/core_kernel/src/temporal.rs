//! Calendar types for leases and billing
//!
//! This module provides:
//! - `Timezone`: the landlord's local zone, used to decide what "today" is
//! - `Clock`: an injectable source of the current date
//! - `DateRange`: an inclusive start/end date pair (lease terms)
//! - `BillingPeriod`: a calendar month billing cycle, labelled `YYYY-MM`

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Timezone wrapper for the property's jurisdiction
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl FromStr for Timezone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s.trim())
            .map(Timezone)
            .map_err(|_| TemporalError::InvalidTimezone(s.to_string()))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Returns the current calendar date in this timezone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.0).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Invalid billing period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid day of month: {0}")]
    InvalidDay(u32),
}

/// Source of the current date
///
/// Overdue detection and lease expiry are evaluated against a clock rather
/// than a background job, so the clock must be swappable in tests.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time in a configured timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    timezone: Timezone,
}

impl SystemClock {
    pub fn new(timezone: Timezone) -> Self {
        Self { timezone }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        self.timezone.today()
    }
}

/// Clock pinned to a single date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range; `start` may equal `end` (a single-day range)
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if the date falls within the range (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true once the whole range lies in the past
    pub fn has_ended(&self, today: NaiveDate) -> bool {
        today > self.end
    }
}

/// A monthly billing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BillingPeriod {
    year: i32,
    month: u32,
}

impl BillingPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, TemporalError> {
        if !(1..=12).contains(&month) {
            return Err(TemporalError::InvalidPeriod(format!("{}-{}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// The billing period a date falls in
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The period immediately after this one
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// First calendar day of the period
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// The given day of this period's month, clamped to the month's last day
    pub fn day(&self, day: u32) -> Result<NaiveDate, TemporalError> {
        if !(1..=31).contains(&day) {
            return Err(TemporalError::InvalidDay(day));
        }
        let mut candidate = day;
        loop {
            if let Some(date) = NaiveDate::from_ymd_opt(self.year, self.month, candidate) {
                return Ok(date);
            }
            candidate -= 1;
        }
    }

    /// The label shown on bills, e.g. `2024-01`
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for BillingPeriod {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TemporalError::InvalidPeriod(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl Serialize for BillingPeriod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BillingPeriod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_allows_single_day() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 1)).unwrap();
        assert!(range.contains(date(2024, 1, 1)));
    }

    #[test]
    fn test_date_range_rejects_inverted() {
        let result = DateRange::new(date(2024, 2, 1), date(2024, 1, 1));
        assert!(matches!(result, Err(TemporalError::InvalidRange { .. })));
    }

    #[test]
    fn test_has_ended_only_after_end_date() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        assert!(!range.has_ended(date(2024, 12, 31)));
        assert!(range.has_ended(date(2025, 1, 1)));
    }

    #[test]
    fn test_period_label_and_parse() {
        let period = BillingPeriod::containing(date(2024, 3, 17));
        assert_eq!(period.label(), "2024-03");
        assert_eq!("2024-03".parse::<BillingPeriod>().unwrap(), period);
        assert!("2024-13".parse::<BillingPeriod>().is_err());
        assert!("march".parse::<BillingPeriod>().is_err());
    }

    #[test]
    fn test_period_next_rolls_year() {
        let december = BillingPeriod::new(2024, 12).unwrap();
        assert_eq!(december.next(), BillingPeriod::new(2025, 1).unwrap());
    }

    #[test]
    fn test_period_day_clamps_to_month_end() {
        let february = BillingPeriod::new(2023, 2).unwrap();
        assert_eq!(february.day(31).unwrap(), date(2023, 2, 28));
        assert_eq!(february.day(15).unwrap(), date(2023, 2, 15));
        assert!(february.day(0).is_err());
    }

    #[test]
    fn test_timezone_parsing() {
        let tz: Timezone = "Asia/Shanghai".parse().unwrap();
        assert_eq!(tz.0, chrono_tz::Asia::Shanghai);
        assert!("Mars/Olympus".parse::<Timezone>().is_err());
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(date(2024, 6, 1));
        assert_eq!(clock.today(), date(2024, 6, 1));
    }
}
