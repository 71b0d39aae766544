//! Game configuration
//!
//! Tunable constants for the simulation, stored as RON so they can be tweaked
//! without recompiling. Every field has a default, so a config file only needs
//! to list the values it overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV_VAR: &str = "SILENT_SALT_CONFIG";

/// Config file shipped next to the game assets
pub const ASSET_CONFIG_PATH: &str = "assets/config.ron";

/// Error type for config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed step length in milliseconds (~60 steps/second at 16)
    pub tick_ms: u64,
    /// Distance travelled per tick while moving
    pub speed: f32,
    /// Margin kept between the player and both level edges.
    /// Also the spawn position when entering a level.
    pub lower_bound: f32,
    /// Characters closer than this (strictly) can be talked to
    pub interaction_radius: f32,
    /// Half the visible world width, used by the camera
    pub viewport_half_extent: f32,
    /// Upper bound on ticks simulated per update (excess time is dropped)
    pub max_ticks_per_update: u32,
    /// Only let the player leave a level once every character there is met
    pub require_all_met: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            speed: 5.0,
            lower_bound: 50.0,
            interaction_radius: 100.0,
            viewport_half_extent: 400.0,
            max_ticks_per_update: 5,
            require_all_met: false,
        }
    }
}

impl GameConfig {
    /// Tick length as a Duration
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Reject values the simulation can't work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be positive".to_string()));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigError::Invalid(format!("speed must be positive (got {})", self.speed)));
        }
        if !(self.lower_bound.is_finite() && self.lower_bound >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "lower_bound must be non-negative (got {})",
                self.lower_bound
            )));
        }
        if !(self.interaction_radius.is_finite() && self.interaction_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "interaction_radius must be positive (got {})",
                self.interaction_radius
            )));
        }
        if !(self.viewport_half_extent.is_finite() && self.viewport_half_extent > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "viewport_half_extent must be positive (got {})",
                self.viewport_half_extent
            )));
        }
        if self.max_ticks_per_update == 0 {
            return Err(ConfigError::Invalid("max_ticks_per_update must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Parse and validate a config from a RON string
pub fn load_config_from_str(contents: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = ron::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a config file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Candidate config locations, most specific first
fn config_candidates() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        paths.push(PathBuf::from(path));
    }
    paths.push(PathBuf::from(ASSET_CONFIG_PATH));
    #[cfg(not(target_arch = "wasm32"))]
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("silent-salt").join("config.ron"));
    }
    paths
}

/// Load the first config found on disk, falling back to defaults.
///
/// A file that exists but fails to load is skipped with a warning.
pub fn load_or_default() -> GameConfig {
    for path in config_candidates() {
        if !path.is_file() {
            continue;
        }
        match load_config(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                return config;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
            }
        }
    }
    tracing::debug!("no config file found, using defaults");
    GameConfig::default()
}
