//! World module - the static level catalog
//!
//! Levels and their characters are a closed set known at startup:
//! - Loaded from RON, validated once
//! - Addressed by (level index, character index)
//! - Never mutated afterwards (met flags live in the game state)

mod catalog;

pub use catalog::*;
