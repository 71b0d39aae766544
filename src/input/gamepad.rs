//! Gamepad support (native only)
//!
//! Uses the gilrs crate for cross-platform gamepad input. The left stick
//! feeds the pointer vector; the d-pad walks and face buttons map to
//! interact.
//! Browser builds rely on keyboard and touch instead.

use macroquad::prelude::Vec2;

/// Default radial deadzone for the sticks
pub const STICK_DEADZONE: f32 = 0.15;

// Standard gamepad button bits (Xbox layout, matches the Web Gamepad API order)
pub mod button {
    pub const A: u32 = 0; // ActionDown / South
    pub const Y: u32 = 3; // ActionUp / North
    pub const START: u32 = 9;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Axis, Button as GilrsButton, Gilrs};

    pub struct Gamepad {
        gilrs: Gilrs,
        deadzone: f32,
        buttons: u32,
        last_buttons: u32,
    }

    impl Gamepad {
        /// Open the gamepad backend. None if the platform has no support.
        pub fn new() -> Option<Self> {
            match Gilrs::new() {
                Ok(gilrs) => Some(Self {
                    gilrs,
                    deadzone: STICK_DEADZONE,
                    buttons: 0,
                    last_buttons: 0,
                }),
                Err(e) => {
                    tracing::warn!(error = %e, "gamepad support unavailable");
                    None
                }
            }
        }

        /// Call once per frame before reading buttons
        pub fn poll(&mut self) {
            // Drain events so gilrs updates its cached state
            while self.gilrs.next_event().is_some() {}
            self.last_buttons = self.buttons;
            self.buttons = self.button_mask();
        }

        fn active_gamepad(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.gamepads().next().map(|(_, gp)| gp)
        }

        fn button_mask(&self) -> u32 {
            let Some(gp) = self.active_gamepad() else { return 0 };
            let mut mask = 0u32;

            if gp.is_pressed(GilrsButton::South) { mask |= 1 << button::A; }
            if gp.is_pressed(GilrsButton::North) { mask |= 1 << button::Y; }
            if gp.is_pressed(GilrsButton::Start) { mask |= 1 << button::START; }
            if gp.is_pressed(GilrsButton::DPadLeft) { mask |= 1 << button::DPAD_LEFT; }
            if gp.is_pressed(GilrsButton::DPadRight) { mask |= 1 << button::DPAD_RIGHT; }

            mask
        }

        pub fn is_button_down(&self, button: u32) -> bool {
            (self.buttons & (1 << button)) != 0
        }

        /// Went down since the previous poll
        pub fn is_button_pressed(&self, button: u32) -> bool {
            let bit = 1 << button;
            (self.buttons & bit) != 0 && (self.last_buttons & bit) == 0
        }

        pub fn left_stick(&self) -> Vec2 {
            let Some(gp) = self.active_gamepad() else { return Vec2::ZERO };
            let x = gp.value(Axis::LeftStickX);
            let y = -gp.value(Axis::LeftStickY); // Screen-space Y points down
            apply_deadzone(x, y, self.deadzone)
        }
    }
}

/// Apply radial deadzone with linear rescaling
pub fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let len = (x * x + y * y).sqrt();
    if len < deadzone || len == 0.0 {
        return Vec2::ZERO;
    }
    // Rescale from deadzone..1.0 to 0.0..1.0
    let scale = (len - deadzone) / (1.0 - deadzone) / len;
    Vec2::new(x * scale, y * scale)
}

#[cfg(not(target_arch = "wasm32"))]
pub use platform::Gamepad;
