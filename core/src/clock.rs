//! Source of "today" for date stamping and date-relative queries.

use chrono::{Local, NaiveDate};

/// Date format used for every stored date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub trait Clock {
    /// The current calendar date. Time of day is irrelevant to the core.
    fn today(&self) -> NaiveDate;
}

/// The host's local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Format a date in the stored `YYYY-MM-DD` form.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a stored date, truncating any time-of-day suffix
/// (`2025-01-01T10:00:00Z` reads as `2025-01-01`). Anything else after the
/// date is rejected.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let day = s.get(..10)?;
    let rest = &s[10..];
    if !rest.is_empty() && !rest.starts_with('T') {
        return None;
    }
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}
