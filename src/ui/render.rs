//! Game presentation
//!
//! Draws a `GameSnapshot` with macroquad primitives. The presenter keeps
//! only cosmetic state (the level banner timer); everything it shows comes
//! from the snapshot.

use macroquad::prelude::*;

use super::layout::{Layout, CHARACTER_SIZE, INTERACT_RADIUS, JOYSTICK_RADIUS, PLAYER_SIZE};
use super::text::{text_width, wrap_text};
use super::theme::*;
use crate::game::{DialogueSnapshot, Events, Facing, GameSnapshot};
use crate::input::TouchJoystick;

/// Seconds the level banner stays up after entering a level
const BANNER_SECONDS: f32 = 3.0;

/// Scenery silhouettes are spaced this far apart in world units
const SCENERY_SPACING: f32 = 260.0;

struct Banner {
    title: String,
    location: String,
    description: String,
    remaining: f32,
}

pub struct Presenter {
    banner: Option<Banner>,
}

impl Presenter {
    pub fn new() -> Self {
        Self { banner: None }
    }

    /// React to this frame's notifications
    pub fn observe(&mut self, events: &Events, snapshot: &GameSnapshot) {
        if !events.level_entered.is_empty() {
            self.banner = Some(Banner {
                title: snapshot.level_name.clone(),
                location: snapshot.location.clone(),
                description: snapshot.description.clone(),
                remaining: BANNER_SECONDS,
            });
        }
        if snapshot.active_dialogue.is_some() {
            self.banner = None;
        }
    }

    pub fn draw(&mut self, snapshot: &GameSnapshot, layout: &Layout, joystick: &TouchJoystick, dt: f32) {
        if !snapshot.started {
            self.banner = None;
            draw_title(layout);
            return;
        }

        let palette = palette_for(&snapshot.level_id, snapshot.level_index);
        draw_world(snapshot, layout, &palette);
        draw_hud(snapshot, layout);

        if let Some(banner) = &mut self.banner {
            draw_banner(banner, layout);
            banner.remaining -= dt;
            if banner.remaining <= 0.0 {
                self.banner = None;
            }
        }

        match &snapshot.active_dialogue {
            Some(dialogue) => draw_dialogue(dialogue, layout),
            None if snapshot.completed => draw_completion(layout),
            None => {}
        }

        draw_touch_controls(layout, joystick);
    }
}

fn centered_text(text: &str, y: f32, font_size: f32, color: Color, layout: &Layout) {
    let x = ((layout.width - text_width(text, font_size)) / 2.0).round();
    draw_text(text, x, y, font_size, color);
}

fn draw_button(rect: Rect, label: &str) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, ACCENT_COLOR);
    let x = rect.x + (rect.w - text_width(label, FONT_SIZE_CONTENT)) / 2.0;
    draw_text(label, x.round(), rect.y + rect.h / 2.0 + 7.0, FONT_SIZE_CONTENT, BG_COLOR);
}

// =============================================================================
// Screens
// =============================================================================

fn draw_title(layout: &Layout) {
    clear_background(BG_COLOR);
    let y = layout.height * 0.3;
    centered_text("Silent Salt's Journey", y, FONT_SIZE_TITLE, ACCENT_COLOR, layout);
    centered_text(
        "Wander four worlds and listen to the ones who live there.",
        y + 48.0,
        FONT_SIZE_CONTENT,
        TEXT_DIM,
        layout,
    );
    draw_button(layout.center_button(), "Begin");
    centered_text(
        "A/D or arrows to walk   E to talk   R to restart",
        layout.height - 40.0,
        FONT_SIZE_SMALL,
        TEXT_DIM,
        layout,
    );
}

fn draw_completion(layout: &Layout) {
    draw_rectangle(0.0, 0.0, layout.width, layout.height, Color::new(0.0, 0.0, 0.0, 0.6));
    let y = layout.height * 0.35;
    centered_text("The journey is complete", y, FONT_SIZE_TITLE, ACCENT_COLOR, layout);
    centered_text("Everyone you met will remember you.", y + 44.0, FONT_SIZE_CONTENT, TEXT_COLOR, layout);
    draw_button(layout.center_button(), "Play again");
}

// =============================================================================
// World strip
// =============================================================================

fn draw_world(snapshot: &GameSnapshot, layout: &Layout, palette: &Palette) {
    clear_background(palette.sky);
    let ground_y = layout.ground_y();
    let camera = layout.scroll(snapshot);

    // Scenery scrolls at half speed for a bit of depth
    let parallax = camera * 0.5;
    let first = (parallax / SCENERY_SPACING).floor() as i32 - 1;
    let count = (layout.view_width() / SCENERY_SPACING).ceil() as i32 + 2;
    for i in first..first + count {
        let world_x = i as f32 * SCENERY_SPACING;
        let x = layout.to_screen_x(world_x, parallax);
        let h = 90.0 + (i.rem_euclid(3) as f32) * 45.0;
        draw_rectangle(x, ground_y - h, 60.0 * layout.scale, h, palette.scenery);
    }

    draw_rectangle(0.0, ground_y, layout.width, layout.height - ground_y, palette.ground);

    // Level edges
    for edge in [0.0, snapshot.level_width] {
        let x = layout.to_screen_x(edge, camera);
        draw_line(x, 0.0, x, ground_y, 2.0, palette.scenery);
    }

    for character in &snapshot.characters {
        let rect = layout.sprite_rect(character.position, camera, CHARACTER_SIZE);
        if rect.x + rect.w < 0.0 || rect.x > layout.width {
            continue;
        }
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, palette.character);
        let name_x = rect.center().x - text_width(&character.name, FONT_SIZE_SMALL) / 2.0;
        draw_text(&character.name, name_x, rect.y - 10.0, FONT_SIZE_SMALL, TEXT_COLOR);
        if character.met {
            draw_circle(rect.center().x, rect.y - 34.0, 7.0, palette.met);
        }
    }

    let player = layout.sprite_rect(snapshot.player.position, camera, PLAYER_SIZE);
    // Walking bob
    let bob = if snapshot.player.moving { (get_time() * 12.0).sin() as f32 * 3.0 } else { 0.0 };
    draw_rectangle(player.x, player.y + bob, player.w, player.h, palette.player);
    let eye_x = match snapshot.player.facing {
        Facing::Right => player.x + player.w * 0.72,
        Facing::Left => player.x + player.w * 0.28,
    };
    draw_circle(eye_x, player.y + bob + 16.0, 4.0, BG_COLOR);
}

fn draw_hud(snapshot: &GameSnapshot, layout: &Layout) {
    let chapter = format!("{} / {}", snapshot.level_index + 1, snapshot.level_count);
    draw_rectangle(0.0, 0.0, layout.width, 40.0, PANEL_BG);
    draw_text(&snapshot.level_name, 16.0, 27.0, FONT_SIZE_CONTENT, TEXT_COLOR);
    let x = layout.width - 16.0 - text_width(&chapter, FONT_SIZE_CONTENT);
    draw_text(&chapter, x, 27.0, FONT_SIZE_CONTENT, TEXT_DIM);
}

fn draw_banner(banner: &Banner, layout: &Layout) {
    let alpha = banner.remaining.clamp(0.0, 1.0);
    let width = (layout.width - 80.0).min(640.0);
    let lines = wrap_text(&banner.description, FONT_SIZE_SMALL, width - 40.0);
    let height = 96.0 + lines.len() as f32 * 22.0;
    let x = (layout.width - width) / 2.0;
    let y = 70.0;

    draw_rectangle(x, y, width, height, Color { a: PANEL_BG.a * alpha, ..PANEL_BG });
    let fade = |c: Color| Color { a: c.a * alpha, ..c };
    draw_text(&banner.title, x + 20.0, y + 38.0, FONT_SIZE_HEADER, fade(ACCENT_COLOR));
    draw_text(&banner.location, x + 20.0, y + 66.0, FONT_SIZE_CONTENT, fade(TEXT_COLOR));
    let mut text_y = y + 92.0;
    for line in &lines {
        draw_text(line, x + 20.0, text_y, FONT_SIZE_SMALL, fade(TEXT_DIM));
        text_y += 22.0;
    }
}

// =============================================================================
// Overlays
// =============================================================================

fn draw_dialogue(dialogue: &DialogueSnapshot, layout: &Layout) {
    let panel = layout.dialogue_panel();
    draw_rectangle(panel.x, panel.y, panel.w, panel.h, PANEL_BG);
    draw_rectangle_lines(panel.x, panel.y, panel.w, panel.h, 2.0, PANEL_BORDER);

    let padding = 20.0;
    draw_text(&dialogue.character_name, panel.x + padding, panel.y + 34.0, FONT_SIZE_HEADER, ACCENT_COLOR);

    let progress = dialogue.progress_label();
    let px = panel.right() - padding - text_width(&progress, FONT_SIZE_SMALL);
    draw_text(&progress, px, panel.y + 30.0, FONT_SIZE_SMALL, TEXT_DIM);

    let mut y = panel.y + 70.0;
    for line in wrap_text(dialogue.current_line(), FONT_SIZE_CONTENT, panel.w - padding * 2.0) {
        draw_text(&line, panel.x + padding, y, FONT_SIZE_CONTENT, TEXT_COLOR);
        y += 26.0;
    }

    let hint = if dialogue.is_last_line { "Finish (E)" } else { "Next (E)" };
    let hx = panel.right() - padding - text_width(hint, FONT_SIZE_SMALL);
    draw_text(hint, hx, panel.bottom() - 16.0, FONT_SIZE_SMALL, ACCENT_COLOR);
}

fn draw_touch_controls(layout: &Layout, joystick: &TouchJoystick) {
    let base = layout.joystick_center();
    draw_circle(base.x, base.y, JOYSTICK_RADIUS, CONTROL_COLOR);
    let knob = base + joystick.knob();
    draw_circle(knob.x, knob.y, JOYSTICK_RADIUS * 0.45, CONTROL_KNOB);

    let button = layout.interact_center();
    draw_circle(button.x, button.y, INTERACT_RADIUS, CONTROL_COLOR);
    draw_text("E", button.x - 7.0, button.y + 9.0, FONT_SIZE_HEADER, CONTROL_KNOB);
}
