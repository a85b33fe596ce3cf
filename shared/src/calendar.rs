//! # Calendar days and date frames
//!
//! Charts are keyed by civil dates in a single reference timezone. Day
//! boundaries are computed once, in that timezone, and from then on days are
//! plain `YYYY-MM-DD` keys so no later step can shift a point by a day.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chart::ChartError;
use crate::window::TimeWindow;

/// Timezone every dashboard day boundary is computed in
pub const REFERENCE_TZ: Tz = chrono_tz::Europe::Amsterdam;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A civil date with no time-of-day or timezone attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(CalendarDay)
    }

    /// Parse a day key. Only the first ten characters are considered, so
    /// both `2025-06-15` and `2025-06-15T00:00:00Z` name the same day.
    pub fn parse_key(key: &str) -> Option<Self> {
        let head = key.get(..10)?;
        let bytes = head.as_bytes();
        if bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok().map(CalendarDay)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn previous(&self) -> Option<Self> {
        self.0.pred_opt().map(CalendarDay)
    }

    /// `YYYY-MM-DD`
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Short axis label such as `Oct 7`, built from the calendar fields only
    pub fn short_label(&self) -> String {
        let month = MONTH_ABBREVIATIONS[(self.month() as usize - 1).min(11)];
        format!("{} {}", month, self.day())
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl From<CalendarDay> for String {
    fn from(day: CalendarDay) -> Self {
        day.to_string()
    }
}

impl TryFrom<String> for CalendarDay {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CalendarDay::parse_key(&value).ok_or_else(|| format!("invalid calendar day: {}", value))
    }
}

/// The injectable "current instant" plus the timezone it is read in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameAnchor {
    pub now: DateTime<Utc>,
    pub tz: Tz,
}

impl FrameAnchor {
    /// Anchor at `now` in the reference timezone
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            tz: REFERENCE_TZ,
        }
    }

    pub fn with_timezone(now: DateTime<Utc>, tz: Tz) -> Self {
        Self { now, tz }
    }

    /// Civil date of `now` in the anchor's timezone
    pub fn today(&self) -> CalendarDay {
        CalendarDay(self.now.with_timezone(&self.tz).date_naive())
    }
}

/// Consecutive calendar days ending today, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateFrame {
    days: Vec<CalendarDay>,
}

impl DateFrame {
    /// Build an `n`-day frame whose last entry is today in the anchor's timezone
    pub fn build(n: usize, anchor: &FrameAnchor) -> Self {
        Self::ending_on(anchor.today(), n)
    }

    /// Frame for a chart window, if the window has a daily frame
    pub fn for_window(window: TimeWindow, anchor: &FrameAnchor) -> Result<Self, ChartError> {
        window
            .frame_days()
            .map(|n| Self::build(n, anchor))
            .ok_or(ChartError::UnsupportedWindow(window))
    }

    pub fn ending_on(last: CalendarDay, n: usize) -> Self {
        let mut days = Vec::with_capacity(n);
        let mut cursor = Some(last);
        while days.len() < n {
            match cursor {
                Some(day) => {
                    days.push(day);
                    cursor = day.previous();
                }
                None => break,
            }
        }
        days.reverse();
        Self { days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub fn get(&self, index: usize) -> Option<CalendarDay> {
        self.days.get(index).copied()
    }

    pub fn last(&self) -> Option<CalendarDay> {
        self.days.last().copied()
    }

    pub fn keys(&self) -> Vec<String> {
        self.days.iter().map(CalendarDay::key).collect()
    }

    /// The equally long frame ending the day before this one starts
    pub fn preceding(&self) -> Self {
        match self.days.first().and_then(CalendarDay::previous) {
            Some(last) => Self::ending_on(last, self.len()),
            None => Self::default(),
        }
    }
}
