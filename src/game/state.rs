//! Game state container
//!
//! All mutable game data lives in one `GameState` value. The systems are
//! small transition functions over it; the game loop decides when they run.

use serde::{Deserialize, Serialize};

use super::dialogue::DialogueSession;
use super::progression::LevelProgression;
use crate::config::GameConfig;
use crate::world::LevelCatalog;

/// Which way the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The player avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Position along the level's horizontal axis
    pub position: f32,
    pub facing: Facing,
    /// Did the last step actually move the player?
    pub moving: bool,
}

impl PlayerState {
    /// Fresh player standing at a level's start margin
    pub fn spawn(start: f32) -> Self {
        Self { position: start, facing: Facing::Right, moving: false }
    }
}

/// Write-once "met" flags, indexed by (level, character)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetRegistry {
    flags: Vec<Vec<bool>>,
}

impl MetRegistry {
    /// All characters of the catalog, none met yet
    pub fn for_catalog(catalog: &LevelCatalog) -> Self {
        let flags = catalog
            .levels()
            .iter()
            .map(|level| vec![false; level.characters.len()])
            .collect();
        Self { flags }
    }

    /// Unknown (level, character) pairs count as not met
    pub fn is_met(&self, level: usize, character: usize) -> bool {
        self.flags
            .get(level)
            .and_then(|l| l.get(character))
            .copied()
            .unwrap_or(false)
    }

    /// Flags for one level, in catalog order
    pub fn level(&self, level: usize) -> &[bool] {
        self.flags.get(level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Has every character in the level been met? (Vacuously true when empty)
    pub fn all_met(&self, level: usize) -> bool {
        self.level(level).iter().all(|&met| met)
    }

    /// Mark a character as met. Only the dialogue system calls this.
    /// Returns true if the flag flipped; false if already met or unknown.
    pub(in crate::game) fn mark(&mut self, level: usize, character: usize) -> bool {
        match self.flags.get_mut(level).and_then(|l| l.get_mut(character)) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }
}

/// The whole mutable game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Past the title screen?
    pub started: bool,
    /// Current level and the completion latch
    pub progression: LevelProgression,
    pub player: PlayerState,
    /// At most one active dialogue (None = idle)
    pub dialogue: Option<DialogueSession>,
    pub met: MetRegistry,
}

impl GameState {
    /// Initial state for a catalog: title screen, first level, nobody met
    pub fn new(catalog: &LevelCatalog, config: &GameConfig) -> Self {
        Self {
            started: false,
            progression: LevelProgression::new(),
            player: PlayerState::spawn(config.lower_bound),
            dialogue: None,
            met: MetRegistry::for_catalog(catalog),
        }
    }

    pub fn level_index(&self) -> usize {
        self.progression.index()
    }

    pub fn dialogue_active(&self) -> bool {
        self.dialogue.is_some()
    }

    pub fn completed(&self) -> bool {
        self.progression.is_completed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{CharacterDef, LevelDef};

    fn catalog() -> LevelCatalog {
        let character = |id: &str| CharacterDef {
            id: id.to_string(),
            name: id.to_string(),
            position: 500.0,
            lines: vec!["hi".to_string()],
        };
        let level = |id: &str, characters: Vec<CharacterDef>| LevelDef {
            id: id.to_string(),
            title: id.to_string(),
            location: String::new(),
            description: String::new(),
            width: 1000.0,
            characters,
        };
        LevelCatalog::new(
            vec![level("a", vec![character("x"), character("y")]), level("b", Vec::new())],
            50.0,
        )
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::new(&catalog(), &GameConfig::default());
        assert!(!state.started);
        assert_eq!(state.level_index(), 0);
        assert_eq!(state.player.position, 50.0);
        assert_eq!(state.player.facing, Facing::Right);
        assert!(!state.dialogue_active());
        assert!(!state.completed());
    }

    #[test]
    fn test_met_is_write_once() {
        let mut met = MetRegistry::for_catalog(&catalog());
        assert!(!met.is_met(0, 1));

        assert!(met.mark(0, 1));
        assert!(met.is_met(0, 1));
        // Second mark is a no-op, flag stays set
        assert!(!met.mark(0, 1));
        assert!(met.is_met(0, 1));
    }

    #[test]
    fn test_met_unknown_indices() {
        let mut met = MetRegistry::for_catalog(&catalog());
        assert!(!met.mark(5, 0));
        assert!(!met.mark(0, 9));
        assert!(!met.is_met(7, 7));
        assert!(met.level(9).is_empty());
    }

    #[test]
    fn test_all_met() {
        let mut met = MetRegistry::for_catalog(&catalog());
        assert!(!met.all_met(0));
        met.mark(0, 0);
        assert!(!met.all_met(0));
        met.mark(0, 1);
        assert!(met.all_met(0));
        // Empty level is vacuously complete
        assert!(met.all_met(1));
    }
}
