//! Drag gesture state and placement geometry.
//!
//! `Idle -> Dragging` on a press over a furnishing node, `Dragging -> Idle` on
//! release. Nothing survives an idle period; a release while idle does nothing.

use crate::config::HouseConfig;
use crate::design::Position;
use crate::surface::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub struct Grab {
    pub node: NodeId,
    pub furnishing: String,
    /// Pointer minus node origin at press time.
    pub offset: Position,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Grab),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn grab(&self) -> Option<&Grab> {
        match self {
            DragState::Dragging(grab) => Some(grab),
            DragState::Idle => None,
        }
    }

    /// Leave the dragging state, returning what was held.
    pub fn release(&mut self) -> Option<Grab> {
        match std::mem::take(self) {
            DragState::Dragging(grab) => Some(grab),
            DragState::Idle => None,
        }
    }
}

/// Where a released item ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct DragRelease {
    pub node: NodeId,
    pub furnishing: String,
    pub position: Position,
}

/// Clamp one axis to `[0, max]` and snap to the grid without leaving that range.
fn settle(value: f64, max: f64, pitch: f64) -> f64 {
    let max = max.max(0.0);
    let clamped = value.clamp(0.0, max);
    if pitch <= 0.0 {
        return clamped;
    }
    let mut snapped = (clamped / pitch).round() * pitch;
    if snapped > max {
        snapped -= pitch;
    }
    snapped.max(0.0)
}

/// Keep a whole item inside the house and put it on the grid.
pub fn clamp_and_snap(raw: Position, house: &HouseConfig) -> Position {
    Position::new(
        settle(raw.x, house.width - house.item_size, house.grid_pitch),
        settle(raw.y, house.height - house.item_size, house.grid_pitch),
    )
}
