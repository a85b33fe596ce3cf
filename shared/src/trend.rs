//! # Trend math
//!
//! Splits a chronological daily series into the current window and the
//! equally sized window right before it, and compares their totals.

use serde::{Deserialize, Serialize};

use crate::window::TimeWindow;

/// The two most recent non-overlapping windows of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodSplit<'a> {
    pub current: &'a [f64],
    pub previous: &'a [f64],
}

/// Split `rows` for `window`.
///
/// The window size is capped at the series length, so a short series yields
/// a shorter current window and a possibly empty previous one. The previous
/// window holds at most `size` entries.
pub fn period_split(rows: &[f64], window: TimeWindow) -> PeriodSplit<'_> {
    let n = rows.len();
    if n == 0 {
        return PeriodSplit {
            current: &[],
            previous: &[],
        };
    }

    let size = window.split_size().min(n);
    let current_start = n - size;
    let previous_start = n.saturating_sub(2 * size);

    PeriodSplit {
        current: &rows[current_start..],
        previous: &rows[previous_start..current_start],
    }
}

/// Percentage change from `previous` to `current`.
///
/// A zero (or non-finite) baseline yields 100 when there is growth and 0
/// otherwise, so the result is always finite for finite input.
pub fn pct_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 || !previous.is_finite() {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    (current - previous) / previous * 100.0
}

/// Totals of both windows and the percentage change between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub current_sum: f64,
    pub previous_sum: f64,
    pub percent: f64,
}

impl TrendSummary {
    pub fn from_sums(current_sum: f64, previous_sum: f64) -> Self {
        Self {
            current_sum,
            previous_sum,
            percent: pct_change(current_sum, previous_sum),
        }
    }

    pub fn from_split(split: &PeriodSplit<'_>) -> Self {
        Self::from_sums(split.current.iter().sum(), split.previous.iter().sum())
    }
}
