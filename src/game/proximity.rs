//! Proximity detection
//!
//! Finds who the player can talk to right now.

use crate::world::CharacterDef;

/// Is a character strictly inside the interaction radius?
pub fn in_range(player: f32, character: &CharacterDef, radius: f32) -> bool {
    (character.position - player).abs() < radius
}

/// Index of the nearest unmet character within `radius`.
///
/// `met` is parallel to `characters`. Equal distances resolve to the
/// earlier character in catalog order.
pub fn nearest_unmet(player: f32, characters: &[CharacterDef], met: &[bool], radius: f32) -> Option<usize> {
    characters
        .iter()
        .enumerate()
        .filter(|(i, _)| !met.get(*i).copied().unwrap_or(false))
        .filter(|(_, c)| in_range(player, c, radius))
        .map(|(i, c)| (i, (c.position - player).abs()))
        // min_by keeps the first of equal elements
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(id: &str, position: f32) -> CharacterDef {
        CharacterDef {
            id: id.to_string(),
            name: id.to_string(),
            position,
            lines: vec!["...".to_string()],
        }
    }

    #[test]
    fn test_radius_edge() {
        let chars = [at("a", 800.0)];
        assert_eq!(nearest_unmet(750.0, &chars, &[false], 100.0), Some(0));
        assert_eq!(nearest_unmet(600.0, &chars, &[false], 100.0), None);
        // Exactly on the radius is out of range
        assert_eq!(nearest_unmet(700.0, &chars, &[false], 100.0), None);
    }

    #[test]
    fn test_nearest_wins() {
        let chars = [at("far", 560.0), at("near", 480.0)];
        assert_eq!(nearest_unmet(500.0, &chars, &[false, false], 100.0), Some(1));
    }

    #[test]
    fn test_tie_goes_to_catalog_order() {
        let chars = [at("left", 450.0), at("right", 550.0)];
        assert_eq!(nearest_unmet(500.0, &chars, &[false, false], 100.0), Some(0));
    }

    #[test]
    fn test_met_characters_are_skipped() {
        let chars = [at("near", 505.0), at("farther", 540.0)];
        assert_eq!(nearest_unmet(500.0, &chars, &[true, false], 100.0), Some(1));
        assert_eq!(nearest_unmet(500.0, &chars, &[true, true], 100.0), None);
    }

    #[test]
    fn test_empty_level() {
        assert_eq!(nearest_unmet(500.0, &[], &[], 100.0), None);
    }
}
