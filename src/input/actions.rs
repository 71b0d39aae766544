//! Logical input events
//!
//! Device-independent intents the core understands. Which physical key,
//! stick or touch gesture produced them is the bindings' business.

use serde::{Deserialize, Serialize};

/// A raw input event from any device
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    MoveLeftStart,
    MoveLeftStop,
    MoveRightStart,
    MoveRightStop,
    /// Continuous pointer (joystick/stick) vector, components in [-1, 1]
    Pointer { x: f32, y: f32 },
    /// Edge-triggered interact/talk request
    Interact,
}

/// A movement vector with both components in [-1, 1].
/// Only `x` drives movement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputVector {
    pub x: f32,
    pub y: f32,
}

impl InputVector {
    pub const ZERO: InputVector = InputVector { x: 0.0, y: 0.0 };

    /// Build a vector, clamping each component into [-1, 1].
    /// NaN components become 0.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x: clamp_unit(x), y: clamp_unit(y) }
    }

    /// Does this vector request horizontal movement?
    pub fn is_moving(&self) -> bool {
        self.x != 0.0
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-1.0, 1.0)
    }
}
