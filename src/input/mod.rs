//! Input handling
//!
//! Provides a device-independent event layer for the game core, plus the
//! default bindings that produce those events from keyboard, gamepad and
//! an on-screen touch joystick.
//!
//! Native: gamepads through the gilrs crate
//! WASM: keyboard and touch only

mod actions;
mod aggregator;
mod bindings;
mod gamepad;
mod joystick;

pub use actions::*;
pub use aggregator::InputAggregator;
pub use bindings::InputBindings;
pub use joystick::TouchJoystick;
