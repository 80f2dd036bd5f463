// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interaction states and input events

use crate::catalog::FurnitureType;
use nalgebra::{Point2, Vector3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exactly one of these is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum InteractionState {
    Idle,
    Placing {
        #[serde(rename = "furnitureType")]
        furniture_type: FurnitureType,
    },
    /// Dragging the selected object; the id always equals the selection
    Moving {
        id: Uuid,
    },
}

impl InteractionState {
    /// Resting state for an optional active furniture type
    pub fn resting(active: Option<FurnitureType>) -> Self {
        match active {
            Some(furniture_type) => InteractionState::Placing { furniture_type },
            None => InteractionState::Idle,
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, InteractionState::Moving { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Placing { .. } => "placing",
            InteractionState::Moving { .. } => "moving",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
    Leave,
}

/// Pointer input in canvas pixels (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pointer_id: i32,
    pub position: Point2<f64>,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            pointer_id: 1,
            position: Point2::new(x, y),
        }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Delete,
    Backspace,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

/// Pointer tracking between down and up
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct PointerTracker {
    /// Pointer id and position of the last pointer-down
    pub down: Option<(i32, Point2<f64>)>,
    /// Pointer currently captured by a drag
    pub captured: Option<i32>,
    /// Latest position not yet consumed by a frame
    pub pending: Option<Point2<f64>>,
    /// Last known position over the canvas
    pub hover: Option<Point2<f64>>,
}

impl PointerTracker {
    pub fn release(&mut self) {
        self.down = None;
        self.captured = None;
    }

    /// Down and up within `tolerance` pixels of each other
    pub fn is_click(&self, pointer_id: i32, up_at: &Point2<f64>, tolerance: f64) -> bool {
        match self.down {
            Some((id, at)) => id == pointer_id && (up_at - at).norm() <= tolerance,
            None => false,
        }
    }
}

/// Active drag of the selected object
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DragState {
    pub pointer_id: i32,
    /// Object position minus the floor point under the pointer at drag start
    pub offset: Vector3<f64>,
}
