//! Read-only view of the game for the presentation layer
//!
//! Built fresh after each update. Owns its data so renderers (or a debug
//! dump through serde) never hold a borrow on the live state.

use serde::Serialize;

use super::camera::camera_offset;
use super::state::{Facing, GameState};
use crate::config::GameConfig;
use crate::world::LevelCatalog;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub position: f32,
    pub facing: Facing,
    pub moving: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSnapshot {
    pub id: String,
    pub name: String,
    pub position: f32,
    pub met: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueSnapshot {
    pub character_id: String,
    pub character_name: String,
    pub lines: Vec<String>,
    pub current_line_index: usize,
    /// The next advance closes the dialogue
    pub is_last_line: bool,
}

impl DialogueSnapshot {
    pub fn current_line(&self) -> &str {
        self.lines.get(self.current_line_index).map(String::as_str).unwrap_or("")
    }

    /// One-based progress, e.g. "2 / 4"
    pub fn progress_label(&self) -> String {
        format!("{} / {}", self.current_line_index + 1, self.lines.len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub started: bool,
    pub level_index: usize,
    pub level_count: usize,
    pub level_id: String,
    pub level_name: String,
    pub location: String,
    pub description: String,
    pub level_width: f32,
    pub player: PlayerSnapshot,
    pub camera_offset: f32,
    pub active_dialogue: Option<DialogueSnapshot>,
    pub characters: Vec<CharacterSnapshot>,
    pub completed: bool,
}

impl GameSnapshot {
    pub fn capture(state: &GameState, catalog: &LevelCatalog, config: &GameConfig) -> Self {
        let level_index = state.level_index();
        let level = catalog.get(level_index);
        let width = level.map(|l| l.width).unwrap_or(0.0);

        let characters = level
            .map(|l| {
                l.characters
                    .iter()
                    .enumerate()
                    .map(|(i, c)| CharacterSnapshot {
                        id: c.id.clone(),
                        name: c.name.clone(),
                        position: c.position,
                        met: state.met.is_met(level_index, i),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let active_dialogue = state.dialogue.and_then(|session| {
            let character = level?.character(session.character())?;
            Some(DialogueSnapshot {
                character_id: character.id.clone(),
                character_name: character.name.clone(),
                lines: character.lines.clone(),
                current_line_index: session.line(),
                is_last_line: session.line() + 1 >= character.lines.len(),
            })
        });

        Self {
            started: state.started,
            level_index,
            level_count: catalog.len(),
            level_id: level.map(|l| l.id.clone()).unwrap_or_default(),
            level_name: level.map(|l| l.title.clone()).unwrap_or_default(),
            location: level.map(|l| l.location.clone()).unwrap_or_default(),
            description: level.map(|l| l.description.clone()).unwrap_or_default(),
            level_width: width,
            player: PlayerSnapshot {
                position: state.player.position,
                facing: state.player.facing,
                moving: state.player.moving,
            },
            camera_offset: camera_offset(state.player.position, config.viewport_half_extent),
            active_dialogue,
            characters,
            completed: state.completed(),
        }
    }
}
