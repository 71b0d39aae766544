//! Level progression
//!
//! Tracks which level the player is in and whether the journey is over.
//! Levels only ever advance one step at a time, and completion is a latch:
//! once set it stays set until the whole state is rebuilt.

use serde::{Deserialize, Serialize};

use super::state::{GameState, PlayerState};
use crate::config::GameConfig;
use crate::world::LevelCatalog;

/// Current level index plus the completion latch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelProgression {
    index: usize,
    completed: bool,
}

impl LevelProgression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Outcome of an advance-level request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved into the next level
    Entered { from: usize, to: usize },
    /// Already on the final level
    FinalLevel,
    /// Next level exists but the current one still has unmet characters
    Locked,
}

/// Would a right-edge crossing lead into the next level right now?
pub fn can_advance(state: &GameState, catalog: &LevelCatalog, config: &GameConfig) -> bool {
    let index = state.progression.index;
    if !catalog.has_next(index) {
        return false;
    }
    !config.require_all_met || state.met.all_met(index)
}

/// Move to the next level, respawning the player at the start margin
pub fn request_advance(state: &mut GameState, catalog: &LevelCatalog, config: &GameConfig) -> AdvanceOutcome {
    let from = state.progression.index;
    if !catalog.has_next(from) {
        return AdvanceOutcome::FinalLevel;
    }
    if config.require_all_met && !state.met.all_met(from) {
        return AdvanceOutcome::Locked;
    }

    let to = from + 1;
    state.progression.index = to;
    state.player = PlayerState { facing: state.player.facing, ..PlayerState::spawn(config.lower_bound) };
    AdvanceOutcome::Entered { from, to }
}

/// Recompute the completion flag. Returns true only when it flips on.
pub fn check_completion(state: &mut GameState, catalog: &LevelCatalog) -> bool {
    if state.progression.completed {
        return false;
    }
    let index = state.progression.index;
    if catalog.is_last(index) && state.met.all_met(index) {
        state.progression.completed = true;
        return true;
    }
    false
}
