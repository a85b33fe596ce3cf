//! # Hover state machine
//!
//! `Idle --move--> Hovering(i) --move--> Hovering(j)`, any state `--leave-->
//! Idle`. Transitions are pure; the component only stores the current state.

use super::format::{format_value, with_unit};
use super::geometry::{VIEW_BOX_HEIGHT, VIEW_BOX_WIDTH};
use super::ChartGeometry;

/// Pointer position plus the rendered box of the chart, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub client_x: f64,
    pub rect_left: f64,
    pub rect_width: f64,
    pub rect_height: f64,
}

impl PointerPosition {
    /// Pointer x in view-box units, `None` when the box has no area.
    ///
    /// The view box is scaled uniformly to fit and centred in the element
    /// (`xMidYMid meet`), so a box wider than 220:100 leaves empty bands on
    /// both sides that map outside `0..VIEW_BOX_WIDTH`.
    pub fn view_box_x(&self) -> Option<f64> {
        if !(self.rect_width > 0.0) || !(self.rect_height > 0.0) || !self.client_x.is_finite() {
            return None;
        }
        let scale = (self.rect_width / VIEW_BOX_WIDTH).min(self.rect_height / VIEW_BOX_HEIGHT);
        let offset = (self.rect_width - VIEW_BOX_WIDTH * scale) / 2.0;
        Some((self.client_x - self.rect_left - offset) / scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move(PointerPosition),
    Leave,
}

/// What the tooltip shows for the index under the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct HoverReadout {
    pub index: usize,
    pub value: f64,
    pub previous_value: Option<f64>,
    /// Tooltip anchor in view-box units
    pub x: f64,
    pub y: f64,
    pub date_label: String,
}

impl HoverReadout {
    pub fn value_text(&self, geometry: &ChartGeometry) -> String {
        let config = &geometry.config;
        with_unit(
            &format_value(self.value, &config.unit),
            &config.unit,
            config.unit_position,
        )
    }

    pub fn previous_text(&self, geometry: &ChartGeometry) -> Option<String> {
        let config = &geometry.config;
        self.previous_value.map(|previous| {
            format!(
                "Prev: {}",
                with_unit(
                    &format_value(previous, &config.unit),
                    &config.unit,
                    config.unit_position
                )
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(HoverReadout),
}

impl HoverState {
    pub fn transition(self, event: PointerEvent, geometry: &ChartGeometry) -> HoverState {
        match event {
            PointerEvent::Leave => HoverState::Idle,
            PointerEvent::Move(pointer) => match geometry.readout_at(&pointer) {
                Some(readout) => HoverState::Hovering(readout),
                None => HoverState::Idle,
            },
        }
    }

    pub fn readout(&self) -> Option<&HoverReadout> {
        match self {
            HoverState::Idle => None,
            HoverState::Hovering(readout) => Some(readout),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, HoverState::Idle)
    }
}
