//! # Chart geometry
//!
//! Maps two aligned series onto a fixed SVG view box. All coordinates are in
//! view-box units; the browser scales the box to whatever size it renders.

use crate::calendar::DateFrame;

use super::format::{axis_label, Unit};

pub const VIEW_BOX_WIDTH: f64 = 220.0;
pub const VIEW_BOX_HEIGHT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

pub const PADDING: Padding = Padding {
    top: 5.0,
    right: 5.0,
    bottom: 20.0,
    left: 40.0,
};

pub const GRID_LINES: usize = 3;

/// Nudge applied to the outermost x labels so they stay inside the box
const EDGE_LABEL_NUDGE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Shared value range of both series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

impl ValueDomain {
    /// Domain covering both series. A flat domain is widened by one so the
    /// scale never divides by zero.
    pub fn from_series(current: &[f64], previous: &[f64]) -> Self {
        let mut values = current.iter().chain(previous).copied();
        let Some(first) = values.next() else {
            return Self { min: 0.0, max: 1.0 };
        };
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let max = if max == min { min + 1.0 } else { max };
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Linear mapping from (index, value) to view-box coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub domain: ValueDomain,
    /// Horizontal distance between consecutive indices
    pub step: f64,
}

impl Scale {
    pub fn graph_width() -> f64 {
        VIEW_BOX_WIDTH - PADDING.left - PADDING.right
    }

    pub fn graph_height() -> f64 {
        VIEW_BOX_HEIGHT - PADDING.top - PADDING.bottom
    }

    pub fn new(domain: ValueDomain, len: usize) -> Self {
        let step = if len > 1 {
            Self::graph_width() / (len - 1) as f64
        } else {
            0.0
        };
        Self { domain, step }
    }

    pub fn x(&self, index: usize) -> f64 {
        index as f64 * self.step + PADDING.left
    }

    pub fn y(&self, value: f64) -> f64 {
        let height = Self::graph_height();
        height - (value - self.domain.min) / self.domain.span() * height + PADDING.top
    }

    pub fn point(&self, index: usize, value: f64) -> Point {
        Point {
            x: self.x(index),
            y: self.y(value),
        }
    }

    /// Index whose x position is closest to `x`; ties go to the lower index
    pub fn nearest_index(&self, x: f64, len: usize) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for index in 0..len {
            let distance = (x - self.x(index)).abs();
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((index, distance)),
            }
        }
        best.map(|(index, _)| index)
    }
}

/// Vertices of one series
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Point>,
}

impl Polyline {
    pub fn from_values(values: &[f64], scale: &Scale) -> Self {
        Self {
            points: values
                .iter()
                .enumerate()
                .map(|(i, v)| scale.point(i, *v))
                .collect(),
        }
    }

    /// SVG path data, or `None` when there are fewer than two vertices
    pub fn path_data(&self) -> Option<String> {
        if self.points.len() < 2 {
            return None;
        }
        let mut d = String::new();
        for (i, point) in self.points.iter().enumerate() {
            let command = if i == 0 { 'M' } else { 'L' };
            d.push_str(&format!("{}{},{}", command, point.x, point.y));
        }
        Some(d)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub y: f64,
    pub x1: f64,
    pub x2: f64,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Horizontal gridlines at the top, middle and bottom of the domain
pub fn grid_lines(scale: &Scale, unit: &Unit) -> Vec<GridLine> {
    let domain = scale.domain;
    (0..GRID_LINES)
        .map(|i| {
            let fraction = 1.0 - i as f64 / (GRID_LINES - 1) as f64;
            let value = domain.min + domain.span() * fraction;
            GridLine {
                y: scale.y(value),
                x1: PADDING.left,
                x2: VIEW_BOX_WIDTH - PADDING.right,
                value,
                label: axis_label(value, unit),
            }
        })
        .collect()
}

/// Indices that get an x-axis label: all of them for short frames,
/// otherwise first, middle and last
pub fn x_label_indices(len: usize) -> Vec<usize> {
    if len <= 3 {
        (0..len).collect()
    } else {
        vec![0, len / 2, len - 1]
    }
}

pub fn x_labels(scale: &Scale, frame: &DateFrame) -> Vec<AxisLabel> {
    let indices = x_label_indices(frame.len());
    let last = indices.len().saturating_sub(1);
    indices
        .iter()
        .enumerate()
        .map(|(n, &index)| {
            let nudge = if n == 0 {
                EDGE_LABEL_NUDGE
            } else if n == last {
                -EDGE_LABEL_NUDGE
            } else {
                0.0
            };
            AxisLabel {
                index,
                x: scale.x(index) + nudge,
                y: VIEW_BOX_HEIGHT - PADDING.bottom + 20.0,
                text: frame
                    .get(index)
                    .map(|day| day.short_label())
                    .unwrap_or_default(),
            }
        })
        .collect()
}
