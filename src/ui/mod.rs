//! Presentation layer
//!
//! Immediate-mode drawing of the game snapshot with macroquad:
//! - Title screen, side-scrolling world strip, dialogue panel
//! - Level banner and completion screen
//! - Touch joystick and interact button overlays
//!
//! Nothing here mutates game state. Clicks and taps are routed back to the
//! game as events through the same `Layout` used for drawing.

mod layout;
mod render;
mod text;
mod theme;

pub use layout::{Hit, Layout, JOYSTICK_RADIUS};
pub use render::Presenter;
