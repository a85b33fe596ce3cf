use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeWindow {
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    Last7Days,
    #[default]
    #[serde(rename = "30d")]
    Last30Days,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 3] = [
        TimeWindow::Last24Hours,
        TimeWindow::Last7Days,
        TimeWindow::Last30Days,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            TimeWindow::Last24Hours => "24h",
            TimeWindow::Last7Days => "7d",
            TimeWindow::Last30Days => "30d",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::Last24Hours => "Last 24 hours",
            TimeWindow::Last7Days => "Last 7 days",
            TimeWindow::Last30Days => "Last 30 days",
        }
    }

    /// Number of daily entries in one period when splitting a daily series
    pub fn split_size(&self) -> usize {
        match self {
            TimeWindow::Last24Hours => 1,
            TimeWindow::Last7Days => 7,
            TimeWindow::Last30Days => 30,
        }
    }

    /// Days framed by the chart. The 24h window has no daily frame.
    pub fn frame_days(&self) -> Option<usize> {
        match self {
            TimeWindow::Last24Hours => None,
            TimeWindow::Last7Days => Some(7),
            TimeWindow::Last30Days => Some(30),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown time window: {0}")]
pub struct UnknownWindow(pub String);

impl FromStr for TimeWindow {
    type Err = UnknownWindow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(TimeWindow::Last24Hours),
            "7d" => Ok(TimeWindow::Last7Days),
            "30d" => Ok(TimeWindow::Last30Days),
            other => Err(UnknownWindow(other.to_string())),
        }
    }
}
