//! Screen layout
//!
//! Maps world units to screen pixels and places the fixed widgets
//! (dialogue panel, touch controls, buttons). Both the renderer and the
//! click/tap routing read from the same `Layout`, so what is drawn is what
//! gets hit.

use macroquad::prelude::{Rect, Vec2};

use crate::game::GameSnapshot;

/// Ground line as a fraction of screen height
const GROUND_RATIO: f32 = 0.72;

pub const CHARACTER_SIZE: Vec2 = Vec2::new(44.0, 88.0);
pub const PLAYER_SIZE: Vec2 = Vec2::new(36.0, 72.0);

const PANEL_MARGIN: f32 = 20.0;
const PANEL_HEIGHT: f32 = 170.0;

const CONTROL_MARGIN: f32 = 90.0;
pub const JOYSTICK_RADIUS: f32 = 60.0;
pub const INTERACT_RADIUS: f32 = 38.0;

const BUTTON_SIZE: Vec2 = Vec2::new(200.0, 48.0);

/// What a click or tap landed on
#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    /// Title screen "begin" button
    Begin,
    /// Completion screen "play again" button
    PlayAgain,
    /// On-screen interact button
    InteractButton,
    /// The open dialogue panel
    DialoguePanel,
    /// A character in the world, by id
    Character(String),
}

/// Screen geometry for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    /// Pixels per world unit
    pub scale: f32,
}

impl Layout {
    /// Fit `2 * half_extent` world units across the screen width
    pub fn new(width: f32, height: f32, half_extent: f32) -> Self {
        let view = (2.0 * half_extent).max(1.0);
        Self { width, height, scale: width / view }
    }

    pub fn ground_y(&self) -> f32 {
        (self.height * GROUND_RATIO).round()
    }

    /// World units visible across the screen
    pub fn view_width(&self) -> f32 {
        self.width / self.scale
    }

    /// Left edge of what is drawn: the camera offset, held back so the view
    /// never shows past the level's right edge
    pub fn scroll(&self, snapshot: &GameSnapshot) -> f32 {
        let limit = (snapshot.level_width - self.view_width()).max(0.0);
        snapshot.camera_offset.min(limit)
    }

    pub fn to_screen_x(&self, world_x: f32, camera_offset: f32) -> f32 {
        (world_x - camera_offset) * self.scale
    }

    /// Sprite box standing on the ground, centred on a world position
    pub fn sprite_rect(&self, world_x: f32, camera_offset: f32, size: Vec2) -> Rect {
        let x = self.to_screen_x(world_x, camera_offset);
        Rect::new(x - size.x / 2.0, self.ground_y() - size.y, size.x, size.y)
    }

    pub fn dialogue_panel(&self) -> Rect {
        let w = (self.width - PANEL_MARGIN * 2.0).min(900.0);
        Rect::new(
            (self.width - w) / 2.0,
            self.height - PANEL_HEIGHT - PANEL_MARGIN,
            w,
            PANEL_HEIGHT,
        )
    }

    pub fn joystick_center(&self) -> Vec2 {
        Vec2::new(CONTROL_MARGIN, self.height - CONTROL_MARGIN)
    }

    pub fn interact_center(&self) -> Vec2 {
        Vec2::new(self.width - CONTROL_MARGIN, self.height - CONTROL_MARGIN)
    }

    /// Centred button on the title and completion screens
    pub fn center_button(&self) -> Rect {
        Rect::new(
            (self.width - BUTTON_SIZE.x) / 2.0,
            self.height * 0.62,
            BUTTON_SIZE.x,
            BUTTON_SIZE.y,
        )
    }

    /// Route a click or tap. The joystick base is handled separately.
    pub fn hit(&self, snapshot: &GameSnapshot, point: Vec2) -> Option<Hit> {
        if !snapshot.started {
            return self.center_button().contains(point).then_some(Hit::Begin);
        }
        if snapshot.completed && snapshot.active_dialogue.is_none() && self.center_button().contains(point) {
            return Some(Hit::PlayAgain);
        }
        if point.distance(self.interact_center()) <= INTERACT_RADIUS {
            return Some(Hit::InteractButton);
        }
        if snapshot.active_dialogue.is_some() {
            return self.dialogue_panel().contains(point).then_some(Hit::DialoguePanel);
        }

        let scroll = self.scroll(snapshot);
        snapshot
            .characters
            .iter()
            .filter(|c| !c.met)
            .find(|c| {
                self.sprite_rect(c.position, scroll, CHARACTER_SIZE)
                    .contains(point)
            })
            .map(|c| Hit::Character(c.id.clone()))
    }
}
