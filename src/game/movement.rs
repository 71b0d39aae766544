//! Movement System
//!
//! One fixed step of 1-D player translation. The step moves a constant
//! distance in the direction of the input (magnitude is ignored), then
//! clamps into the level's walkable span. Leaving through the right edge is
//! reported instead of clamped when the caller says an exit is allowed.

use super::state::{Facing, PlayerState};
use crate::input::InputVector;

/// Walkable span of a level: `[margin, width - margin]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f32,
    pub upper: f32,
}

impl Bounds {
    pub fn for_level(width: f32, margin: f32) -> Self {
        Self { lower: margin, upper: (width - margin).max(margin) }
    }

    pub fn clamp(&self, position: f32) -> f32 {
        position.clamp(self.lower, self.upper)
    }
}

/// Result of one movement step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    pub player: PlayerState,
    /// The step crossed the right edge and an exit was allowed.
    /// The position is left untouched; the caller switches level.
    pub exit_right: bool,
}

/// Advance the player by one tick.
///
/// `can_exit` is true when crossing the right edge should request a level
/// transition (a next level exists and is unlocked).
pub fn step(player: PlayerState, vector: InputVector, bounds: Bounds, speed: f32, can_exit: bool) -> MoveResult {
    let direction = if vector.x > 0.0 {
        1.0
    } else if vector.x < 0.0 {
        -1.0
    } else {
        0.0
    };

    if direction == 0.0 {
        return MoveResult { player: halt(player), exit_right: false };
    }

    let facing = if direction > 0.0 { Facing::Right } else { Facing::Left };
    let target = player.position + direction * speed;

    if target > bounds.upper && can_exit {
        return MoveResult {
            player: PlayerState { facing, moving: true, ..player },
            exit_right: true,
        };
    }

    let position = bounds.clamp(target);
    MoveResult {
        player: PlayerState { position, facing, moving: position != player.position },
        exit_right: false,
    }
}

/// Stop the walk animation without moving
pub fn halt(player: PlayerState) -> PlayerState {
    PlayerState { moving: false, ..player }
}
