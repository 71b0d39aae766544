//! Level catalog loading and validation
//!
//! Uses RON (Rusty Object Notation) for human-readable level files.
//! The catalog ships embedded in the binary; a copy on disk at
//! `assets/levels/journey.ron` overrides it when present and valid.
//! Once loaded the catalog is never mutated.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::config::GameConfig;

/// Catalog bundled at build time
pub const BUILTIN_CATALOG: &str = include_str!("../../assets/levels/journey.ron");

/// On-disk override location
pub const CATALOG_PATH: &str = "assets/levels/journey.ron";

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum number of levels in a catalog
    pub const MAX_LEVELS: usize = 64;
    /// Maximum characters placed in one level
    pub const MAX_CHARACTERS: usize = 64;
    /// Maximum dialogue lines per character
    pub const MAX_LINES: usize = 256;
    /// Maximum length of any string field, in bytes
    pub const MAX_STRING_LEN: usize = 512;
    /// Maximum level width (prevents overflow issues)
    pub const MAX_WIDTH: f32 = 1_000_000.0;
}

/// Error type for catalog loading
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// A non-player character placed in a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDef {
    /// Unique within its level
    pub id: String,
    /// Display name
    pub name: String,
    /// Position along the level's horizontal axis
    pub position: f32,
    /// Dialogue script, played in order (never empty)
    pub lines: Vec<String>,
}

/// One horizontally-scrolling level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub id: String,
    /// Display name
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    /// Horizontal extent in world units
    pub width: f32,
    /// Characters in catalog order (this order breaks proximity ties)
    #[serde(default)]
    pub characters: Vec<CharacterDef>,
}

impl LevelDef {
    /// Look up a character's index by identifier
    pub fn character_index(&self, id: &str) -> Option<usize> {
        self.characters.iter().position(|c| c.id == id)
    }

    pub fn character(&self, index: usize) -> Option<&CharacterDef> {
        self.characters.get(index)
    }
}

/// The ordered, immutable set of levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelCatalog {
    levels: Vec<LevelDef>,
}

impl LevelCatalog {
    /// Build a catalog from levels, validating it against the spawn margin
    pub fn new(levels: Vec<LevelDef>, lower_bound: f32) -> Result<Self, CatalogError> {
        let catalog = Self { levels };
        catalog.validate(lower_bound).map_err(CatalogError::Validation)?;
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelDef> {
        self.levels.get(index)
    }

    pub fn levels(&self) -> &[LevelDef] {
        &self.levels
    }

    /// Is this the final level?
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.levels.len()
    }

    /// Does a level exist after this one?
    pub fn has_next(&self, index: usize) -> bool {
        index + 1 < self.levels.len()
    }

    /// Characters the player can never get within `radius` of while
    /// confined to `[lower_bound, width - lower_bound]`, as (level id, character id)
    pub fn unreachable(&self, lower_bound: f32, radius: f32) -> Vec<(&str, &str)> {
        self.levels
            .iter()
            .flat_map(|level| {
                let min = lower_bound - radius;
                let max = level.width - lower_bound + radius;
                level
                    .characters
                    .iter()
                    .filter(move |c| !(c.position > min && c.position < max))
                    .map(move |c| (level.id.as_str(), c.id.as_str()))
            })
            .collect()
    }

    fn validate(&self, lower_bound: f32) -> Result<(), String> {
        if self.is_empty() {
            return Err("catalog has no levels".to_string());
        }
        if self.levels.len() > limits::MAX_LEVELS {
            return Err(format!("too many levels ({} > {})", self.levels.len(), limits::MAX_LEVELS));
        }

        let mut level_ids = HashSet::new();
        for (i, level) in self.levels.iter().enumerate() {
            validate_level(level, i, lower_bound)?;
            if !level_ids.insert(level.id.as_str()) {
                return Err(format!("level[{}]: duplicate id '{}'", i, level.id));
            }
        }
        Ok(())
    }
}

fn validate_string(value: &str, context: &str) -> Result<(), String> {
    if value.len() > limits::MAX_STRING_LEN {
        return Err(format!("{}: string too long ({} > {})", context, value.len(), limits::MAX_STRING_LEN));
    }
    Ok(())
}

fn validate_level(level: &LevelDef, index: usize, lower_bound: f32) -> Result<(), String> {
    let context = format!("level[{}]", index);

    if level.id.is_empty() {
        return Err(format!("{}: empty id", context));
    }
    validate_string(&level.id, &context)?;
    validate_string(&level.title, &context)?;
    validate_string(&level.location, &context)?;
    validate_string(&level.description, &context)?;

    if !level.width.is_finite() || level.width > limits::MAX_WIDTH {
        return Err(format!("{}: invalid width {}", context, level.width));
    }
    // Leave room to stand between the two margins
    if level.width <= lower_bound * 2.0 {
        return Err(format!(
            "{}: width {} leaves no room inside the {} margins",
            context, level.width, lower_bound
        ));
    }

    if level.characters.len() > limits::MAX_CHARACTERS {
        return Err(format!(
            "{}: too many characters ({} > {})",
            context,
            level.characters.len(),
            limits::MAX_CHARACTERS
        ));
    }

    let mut ids = HashSet::new();
    for (j, character) in level.characters.iter().enumerate() {
        let context = format!("{} character[{}]", context, j);
        if character.id.is_empty() {
            return Err(format!("{}: empty id", context));
        }
        validate_string(&character.id, &context)?;
        validate_string(&character.name, &context)?;
        if !ids.insert(character.id.as_str()) {
            return Err(format!("{}: duplicate id '{}'", context, character.id));
        }
        if !character.position.is_finite() || character.position < 0.0 || character.position > level.width {
            return Err(format!("{}: position {} outside level", context, character.position));
        }
        if character.lines.is_empty() {
            return Err(format!("{}: no dialogue lines", context));
        }
        if character.lines.len() > limits::MAX_LINES {
            return Err(format!(
                "{}: too many lines ({} > {})",
                context,
                character.lines.len(),
                limits::MAX_LINES
            ));
        }
        for line in &character.lines {
            validate_string(line, &context)?;
        }
    }
    Ok(())
}

/// Parse and validate a catalog from a RON string
pub fn load_catalog_from_str(contents: &str, lower_bound: f32) -> Result<LevelCatalog, CatalogError> {
    let raw: LevelCatalog = ron::from_str(contents)?;
    LevelCatalog::new(raw.levels, lower_bound)
}

/// Load and validate a catalog file
pub fn load_catalog<P: AsRef<Path>>(path: P, lower_bound: f32) -> Result<LevelCatalog, CatalogError> {
    let contents = std::fs::read_to_string(path)?;
    load_catalog_from_str(&contents, lower_bound)
}

/// Load the on-disk catalog if usable, otherwise the embedded one.
///
/// Only an invalid embedded catalog is an error.
pub fn load_or_builtin(lower_bound: f32) -> Result<LevelCatalog, CatalogError> {
    #[cfg(not(target_arch = "wasm32"))]
    if Path::new(CATALOG_PATH).is_file() {
        match load_catalog(CATALOG_PATH, lower_bound) {
            Ok(catalog) => {
                tracing::info!(path = CATALOG_PATH, levels = catalog.len(), "loaded level catalog");
                return Ok(catalog);
            }
            Err(e) => {
                tracing::warn!(path = CATALOG_PATH, error = %e, "falling back to built-in catalog");
            }
        }
    }
    let catalog = load_catalog_from_str(BUILTIN_CATALOG, lower_bound)?;
    tracing::info!(levels = catalog.len(), "loaded built-in level catalog");
    Ok(catalog)
}

/// Load the catalog that goes with `config`.
///
/// A config whose margins no catalog level can hold is dropped for the
/// defaults, so a bad settings file never stops the game. Returns the
/// config actually in use.
pub fn load_for_config(config: GameConfig) -> Result<(LevelCatalog, GameConfig), CatalogError> {
    let (catalog, config) = match load_or_builtin(config.lower_bound) {
        Ok(catalog) => (catalog, config),
        Err(e) if config != GameConfig::default() => {
            tracing::warn!(error = %e, "catalog rejects configured margins, using default config");
            let config = GameConfig::default();
            (load_or_builtin(config.lower_bound)?, config)
        }
        Err(e) => return Err(e),
    };

    for (level_id, character_id) in catalog.unreachable(config.lower_bound, config.interaction_radius) {
        tracing::warn!(level = level_id, character = character_id, "character can never be reached");
    }
    Ok((catalog, config))
}
