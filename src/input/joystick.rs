//! On-screen touch joystick
//!
//! A virtual stick for touch screens. A touch that starts on the base drags
//! the knob; its offset from the base centre, divided by the travel radius,
//! becomes the pointer vector. Lifting the finger snaps back to neutral.

use macroquad::prelude::Vec2;

/// How far the knob can travel from the centre, in screen pixels
pub const KNOB_TRAVEL: f32 = 30.0;

/// Touch lifecycle, decoupled from the windowing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchStage {
    Began,
    Moved,
    Ended,
}

/// Pointer vector for a drag offset: `delta / travel`, clamped to unit length
pub fn stick_vector(delta: Vec2, travel: f32) -> Vec2 {
    if travel <= 0.0 {
        return Vec2::ZERO;
    }
    let v = delta / travel;
    if v.length() > 1.0 {
        v.normalize()
    } else {
        v
    }
}

/// Where to draw the knob: the drag offset, limited to the travel radius
pub fn knob_offset(delta: Vec2, travel: f32) -> Vec2 {
    if delta.length() > travel {
        delta.normalize_or_zero() * travel
    } else {
        delta
    }
}

/// Touch joystick state
#[derive(Debug, Clone)]
pub struct TouchJoystick {
    /// Base centre in screen coordinates
    pub center: Vec2,
    /// Base radius (touch target size)
    pub radius: f32,
    /// Touch currently dragging the knob
    active_touch: Option<u64>,
    /// Knob offset for drawing
    knob: Vec2,
}

impl TouchJoystick {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius, active_touch: None, knob: Vec2::ZERO }
    }

    pub fn is_dragging(&self) -> bool {
        self.active_touch.is_some()
    }

    pub fn knob(&self) -> Vec2 {
        self.knob
    }

    /// Does a screen point hit the base?
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) <= self.radius
    }

    /// Feed one touch. Returns the new pointer vector when it changes.
    pub fn handle_touch(&mut self, id: u64, stage: TouchStage, position: Vec2) -> Option<Vec2> {
        match stage {
            TouchStage::Began => {
                if self.active_touch.is_none() && self.contains(position) {
                    self.active_touch = Some(id);
                    return Some(self.drag_to(position));
                }
                None
            }
            TouchStage::Moved => {
                if self.active_touch == Some(id) {
                    Some(self.drag_to(position))
                } else {
                    None
                }
            }
            TouchStage::Ended => {
                if self.active_touch == Some(id) {
                    self.active_touch = None;
                    self.knob = Vec2::ZERO;
                    Some(Vec2::ZERO)
                } else {
                    None
                }
            }
        }
    }

    fn drag_to(&mut self, position: Vec2) -> Vec2 {
        let delta = position - self.center;
        self.knob = knob_offset(delta, KNOB_TRAVEL);
        stick_vector(delta, KNOB_TRAVEL)
    }
}
