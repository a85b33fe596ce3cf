//! # Series alignment
//!
//! Maps a sparse or index-based series onto a dense [`DateFrame`]. The output
//! always has exactly one finite value per frame day.

use std::collections::HashMap;

use crate::calendar::{CalendarDay, DateFrame};

/// Frame-length values, index `i` belongs to frame day `i`
pub type AlignedSeries = Vec<f64>;

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Align `values` to `frame`.
///
/// With a non-empty `keys` slice of the same length as `values`, values are
/// placed by day key (later duplicates win, unparseable keys are dropped).
/// Otherwise values are placed by position. Missing days and non-finite
/// values become 0.
pub fn align(values: &[f64], keys: Option<&[String]>, frame: &DateFrame) -> AlignedSeries {
    match keys {
        Some(keys) if !keys.is_empty() && keys.len() == values.len() => {
            let mut by_day: HashMap<CalendarDay, f64> = HashMap::with_capacity(keys.len());
            for (key, value) in keys.iter().zip(values) {
                if let Some(day) = CalendarDay::parse_key(key) {
                    by_day.insert(day, finite_or_zero(*value));
                }
            }
            frame
                .days()
                .iter()
                .map(|day| by_day.get(day).copied().unwrap_or(0.0))
                .collect()
        }
        _ => (0..frame.len())
            .map(|i| values.get(i).copied().map(finite_or_zero).unwrap_or(0.0))
            .collect(),
    }
}
