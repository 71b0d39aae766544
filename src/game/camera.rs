//! Camera scrolling
//!
//! The view is a window of `2 * half_extent` world units that keeps the
//! player centred once they are past the first half screen. Keeping the
//! view inside the level's right edge is left to the screen layout.

/// Left edge of the view in world units: `max(0, position - half_extent)`
pub fn camera_offset(position: f32, half_extent: f32) -> f32 {
    (position - half_extent).max(0.0)
}
