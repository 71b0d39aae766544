//! UI Theme - Shared colors and styling constants
//!
//! Panel colors are shared by every screen. Each chapter of the journey
//! gets its own world palette, looked up by level id.

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Dark background color (title and completion screens)
pub const BG_COLOR: Color = Color::new(0.10, 0.10, 0.12, 1.0);

/// Dialogue panel background
pub const PANEL_BG: Color = Color::new(0.08, 0.08, 0.10, 0.92);

/// Dialogue panel border
pub const PANEL_BORDER: Color = Color::new(0.314, 0.314, 0.314, 1.0); // ~80, 80, 80

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.9, 0.9, 0.9, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.6, 0.6, 0.65, 1.0);

/// Headings, speaker names, buttons
pub const ACCENT_COLOR: Color = Color::new(0.0, 0.75, 0.9, 1.0);

/// Touch controls (drawn translucent over the world)
pub const CONTROL_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.25);
pub const CONTROL_KNOB: Color = Color::new(1.0, 1.0, 1.0, 0.55);

// =============================================================================
// Font Sizes
// =============================================================================

pub const FONT_SIZE_TITLE: f32 = 48.0;
pub const FONT_SIZE_HEADER: f32 = 28.0;
pub const FONT_SIZE_CONTENT: f32 = 20.0;
pub const FONT_SIZE_SMALL: f32 = 16.0;

// =============================================================================
// World palettes
// =============================================================================

/// Colors for one chapter's world strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub sky: Color,
    pub ground: Color,
    /// Scenery silhouettes (trees, towers) in the background
    pub scenery: Color,
    pub player: Color,
    pub character: Color,
    /// Marker over characters already met
    pub met: Color,
}

const FOREST: Palette = Palette {
    sky: Color::new(0.53, 0.78, 0.92, 1.0),
    ground: Color::new(0.30, 0.62, 0.27, 1.0),
    scenery: Color::new(0.20, 0.45, 0.22, 1.0),
    player: Color::new(0.95, 0.95, 0.95, 1.0),
    character: Color::new(0.85, 0.72, 0.30, 1.0),
    met: Color::new(0.40, 0.90, 0.40, 1.0),
};

const DARK_FOREST: Palette = Palette {
    sky: Color::new(0.10, 0.12, 0.20, 1.0),
    ground: Color::new(0.12, 0.22, 0.14, 1.0),
    scenery: Color::new(0.06, 0.12, 0.08, 1.0),
    player: Color::new(0.90, 0.90, 0.95, 1.0),
    character: Color::new(0.75, 0.15, 0.15, 1.0),
    met: Color::new(0.40, 0.90, 0.40, 1.0),
};

const VOID: Palette = Palette {
    sky: Color::new(0.02, 0.02, 0.02, 1.0),
    ground: Color::new(0.15, 0.15, 0.15, 1.0),
    scenery: Color::new(0.08, 0.08, 0.08, 1.0),
    player: Color::new(0.95, 0.95, 0.95, 1.0),
    character: Color::new(0.70, 0.70, 0.75, 1.0),
    met: Color::new(0.40, 0.90, 0.40, 1.0),
};

const COOKIE: Palette = Palette {
    sky: Color::new(0.98, 0.85, 0.72, 1.0),
    ground: Color::new(0.70, 0.48, 0.28, 1.0),
    scenery: Color::new(0.85, 0.62, 0.40, 1.0),
    player: Color::new(0.98, 0.98, 0.98, 1.0),
    character: Color::new(0.55, 0.25, 0.65, 1.0),
    met: Color::new(0.30, 0.75, 0.30, 1.0),
};

/// Palette for a level. Unknown ids cycle through the set by index.
pub fn palette_for(level_id: &str, level_index: usize) -> Palette {
    match level_id {
        "roblox_forest" => FOREST,
        "dark_forest" => DARK_FOREST,
        "black_world" => VOID,
        "cookie_kingdom" => COOKIE,
        _ => [FOREST, DARK_FOREST, VOID, COOKIE][level_index % 4],
    }
}
