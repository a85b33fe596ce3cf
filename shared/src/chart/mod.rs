//! # Dual-period trend chart
//!
//! Builds everything the line graph needs to draw the current period against
//! the previous one: the date frame, both aligned series, the SVG geometry
//! and the hover readout.

pub mod format;
pub mod geometry;
pub mod hover;

use thiserror::Error;

use crate::calendar::{DateFrame, FrameAnchor};
use crate::series::{align, AlignedSeries};
use crate::window::TimeWindow;

pub use format::{axis_label, fixed, format_value, with_unit, Unit, UnitPosition};
pub use geometry::{
    AxisLabel, GridLine, Point, Polyline, Scale, ValueDomain, PADDING, VIEW_BOX_HEIGHT,
    VIEW_BOX_WIDTH,
};
pub use hover::{HoverReadout, HoverState, PointerEvent, PointerPosition};

pub const DEFAULT_COLOR: &str = "#8525b2";
pub const DEFAULT_LIGHT_COLOR: &str = "#e2ceed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("No daily chart frame for the {0} window")]
    UnsupportedWindow(TimeWindow),
}

/// Presentation options for one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Stroke of the current period
    pub color: String,
    /// Stroke of the previous period
    pub light_color: String,
    pub unit: Unit,
    pub unit_position: UnitPosition,
    pub window: TimeWindow,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            light_color: DEFAULT_LIGHT_COLOR.to_string(),
            unit: Unit::None,
            unit_position: UnitPosition::Suffix,
            window: TimeWindow::Last30Days,
        }
    }
}

/// Raw series as they come from the data source
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartInput<'a> {
    pub current: &'a [f64],
    pub previous: &'a [f64],
    /// Day keys parallel to `current`
    pub current_days: Option<&'a [String]>,
    /// Day keys parallel to `previous`
    pub previous_days: Option<&'a [String]>,
}

/// Fully computed chart for a non-empty frame
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub frame: DateFrame,
    pub current: AlignedSeries,
    pub previous: AlignedSeries,
    pub config: ChartConfig,
    pub domain: ValueDomain,
    pub scale: Scale,
    pub current_line: Polyline,
    pub previous_line: Polyline,
    pub grid_lines: Vec<GridLine>,
    pub x_labels: Vec<AxisLabel>,
}

impl ChartGeometry {
    /// Lay out already aligned series. `previous` is zero-padded or truncated
    /// to the length of `current`.
    pub fn new(
        frame: DateFrame,
        current: AlignedSeries,
        mut previous: AlignedSeries,
        config: ChartConfig,
    ) -> Self {
        previous.resize(current.len(), 0.0);

        let domain = ValueDomain::from_series(&current, &previous);
        let scale = Scale::new(domain, current.len());
        let current_line = Polyline::from_values(&current, &scale);
        let previous_line = Polyline::from_values(&previous, &scale);
        let grid_lines = geometry::grid_lines(&scale, &config.unit);
        let x_labels = geometry::x_labels(&scale, &frame);

        Self {
            frame,
            current,
            previous,
            config,
            domain,
            scale,
            current_line,
            previous_line,
            grid_lines,
            x_labels,
        }
    }

    /// Readout for the index nearest to the pointer
    pub fn readout_at(&self, pointer: &PointerPosition) -> Option<HoverReadout> {
        let x = pointer.view_box_x()?;
        let index = self.scale.nearest_index(x, self.current.len())?;
        let value = self.current[index];
        Some(HoverReadout {
            index,
            value,
            previous_value: self.previous.get(index).copied(),
            x: self.scale.x(index),
            y: self.scale.y(value),
            date_label: self
                .frame
                .get(index)
                .map(|day| day.short_label())
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartModel {
    /// Nothing to plot
    Empty,
    /// The window has no daily frame
    Unsupported(TimeWindow),
    Ready(Box<ChartGeometry>),
}

impl ChartModel {
    /// Frame the window at `anchor`, align both series and lay them out.
    ///
    /// Emptiness is decided on the raw input: with no current values the
    /// result is [`ChartModel::Empty`] even when `previous` has data, since
    /// alignment would otherwise pad the current line with zeros. Callers
    /// holding previous-only data get the placeholder, not a flat line.
    ///
    /// Current values align to the frame ending today; previous values align
    /// to the equally long frame right before it, so index `i` of both lines
    /// is the same position within its period.
    pub fn build(input: &ChartInput<'_>, config: &ChartConfig, anchor: &FrameAnchor) -> Self {
        if input.current.is_empty() {
            return ChartModel::Empty;
        }
        let frame = match DateFrame::for_window(config.window, anchor) {
            Ok(frame) => frame,
            Err(ChartError::UnsupportedWindow(window)) => return ChartModel::Unsupported(window),
        };
        let previous_frame = frame.preceding();

        let current = align(input.current, input.current_days, &frame);
        let previous = align(input.previous, input.previous_days, &previous_frame);
        Self::from_aligned(frame, current, previous, config.clone())
    }

    pub fn from_aligned(
        frame: DateFrame,
        current: AlignedSeries,
        previous: AlignedSeries,
        config: ChartConfig,
    ) -> Self {
        if current.is_empty() {
            return ChartModel::Empty;
        }
        ChartModel::Ready(Box::new(ChartGeometry::new(frame, current, previous, config)))
    }

    pub fn geometry(&self) -> Option<&ChartGeometry> {
        match self {
            ChartModel::Ready(geometry) => Some(geometry),
            _ => None,
        }
    }
}
