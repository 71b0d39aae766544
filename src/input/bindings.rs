//! Default device bindings
//!
//! Polls keyboard, mouse, touch and (native) gamepad once per frame and
//! turns what changed into `GameEvent`s. Held directions are tracked as
//! combined booleans so a key and a d-pad never send duplicate starts.

use macroquad::prelude::*;

use super::joystick::{TouchJoystick, TouchStage};
use super::InputEvent;
use crate::game::{GameEvent, GameSnapshot};
use crate::ui::{Hit, Layout, JOYSTICK_RADIUS};

#[cfg(not(target_arch = "wasm32"))]
use super::gamepad::{button, Gamepad};

/// Touch id used for the mouse so it can drag the joystick too
const MOUSE_TOUCH_ID: u64 = u64::MAX;

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::A, KeyCode::Left];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::D, KeyCode::Right];
const INTERACT_KEYS: [KeyCode; 4] = [KeyCode::E, KeyCode::Space, KeyCode::Enter, KeyCode::KpEnter];

/// Start/stop event for a held direction that changed this frame
fn edge(was: bool, now: bool, start: InputEvent, stop: InputEvent) -> Option<InputEvent> {
    match (was, now) {
        (false, true) => Some(start),
        (true, false) => Some(stop),
        _ => None,
    }
}

/// Map a click/tap target to the command it issues
fn hit_event(hit: Hit) -> GameEvent {
    match hit {
        Hit::Begin => GameEvent::Start,
        Hit::PlayAgain => GameEvent::Restart,
        Hit::InteractButton => GameEvent::Input(InputEvent::Interact),
        Hit::DialoguePanel => GameEvent::Advance,
        Hit::Character(id) => GameEvent::TalkTo(id),
    }
}

pub struct InputBindings {
    pub joystick: TouchJoystick,
    #[cfg(not(target_arch = "wasm32"))]
    gamepad: Option<Gamepad>,
    left_held: bool,
    right_held: bool,
    /// Last pointer vector sent, to only send changes
    pointer: Vec2,
}

impl InputBindings {
    pub fn new() -> Self {
        // Touches are handled directly; don't get them twice as mouse clicks
        simulate_mouse_with_touch(false);
        Self {
            joystick: TouchJoystick::new(Vec2::ZERO, JOYSTICK_RADIUS),
            #[cfg(not(target_arch = "wasm32"))]
            gamepad: Gamepad::new(),
            left_held: false,
            right_held: false,
            pointer: Vec2::ZERO,
        }
    }

    /// Collect this frame's events
    pub fn poll(&mut self, layout: &Layout, snapshot: &GameSnapshot) -> Vec<GameEvent> {
        let mut out = Vec::new();
        self.joystick.center = layout.joystick_center();

        self.poll_gamepad();
        self.poll_directions(&mut out);
        self.poll_buttons(snapshot, &mut out);
        let stick = self.poll_pointer_devices(layout, snapshot, &mut out);

        // The touch joystick wins while dragged, else the gamepad stick
        let pointer = if self.joystick.is_dragging() { stick } else { self.gamepad_stick() };
        if pointer != self.pointer {
            self.pointer = pointer;
            out.push(InputEvent::Pointer { x: pointer.x, y: pointer.y }.into());
        }

        out
    }

    fn poll_directions(&mut self, out: &mut Vec<GameEvent>) {
        let left = LEFT_KEYS.iter().any(|&k| is_key_down(k)) || self.gamepad_down(Pad::Left);
        let right = RIGHT_KEYS.iter().any(|&k| is_key_down(k)) || self.gamepad_down(Pad::Right);

        let events = [
            edge(self.left_held, left, InputEvent::MoveLeftStart, InputEvent::MoveLeftStop),
            edge(self.right_held, right, InputEvent::MoveRightStart, InputEvent::MoveRightStop),
        ];
        out.extend(events.into_iter().flatten().map(GameEvent::from));
        self.left_held = left;
        self.right_held = right;
    }

    fn poll_buttons(&mut self, snapshot: &GameSnapshot, out: &mut Vec<GameEvent>) {
        if INTERACT_KEYS.iter().any(|&k| is_key_pressed(k)) || self.gamepad_pressed(Pad::Interact) {
            out.push(InputEvent::Interact.into());
        }
        if is_key_pressed(KeyCode::R) {
            out.push(GameEvent::Restart);
        }
        if self.gamepad_pressed(Pad::Start) {
            out.push(if snapshot.started { GameEvent::Restart } else { GameEvent::Start });
        }
    }

    /// Mouse and touch: drive the joystick, or tap whatever is underneath.
    /// Returns the joystick vector.
    fn poll_pointer_devices(&mut self, layout: &Layout, snapshot: &GameSnapshot, out: &mut Vec<GameEvent>) -> Vec2 {
        let mut stick = None;
        let mut taps = Vec::new();

        for touch in touches() {
            let stage = match touch.phase {
                TouchPhase::Started => TouchStage::Began,
                TouchPhase::Moved | TouchPhase::Stationary => TouchStage::Moved,
                TouchPhase::Ended | TouchPhase::Cancelled => TouchStage::Ended,
            };
            match self.joystick.handle_touch(touch.id, stage, touch.position) {
                Some(v) => stick = Some(v),
                None if stage == TouchStage::Began => taps.push(touch.position),
                None => {}
            }
        }

        let mouse = Vec2::from(mouse_position());
        let mouse_stage = if is_mouse_button_pressed(MouseButton::Left) {
            Some(TouchStage::Began)
        } else if is_mouse_button_released(MouseButton::Left) {
            Some(TouchStage::Ended)
        } else if is_mouse_button_down(MouseButton::Left) {
            Some(TouchStage::Moved)
        } else {
            None
        };
        if let Some(stage) = mouse_stage {
            match self.joystick.handle_touch(MOUSE_TOUCH_ID, stage, mouse) {
                Some(v) => stick = Some(v),
                None if stage == TouchStage::Began => taps.push(mouse),
                None => {}
            }
        }

        for point in taps {
            if let Some(hit) = layout.hit(snapshot, point) {
                tracing::debug!(?hit, "tap");
                out.push(hit_event(hit));
            }
        }

        stick.unwrap_or(if self.joystick.is_dragging() { self.pointer } else { Vec2::ZERO })
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn poll_gamepad(&mut self) {
        if let Some(gp) = &mut self.gamepad {
            gp.poll();
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn poll_gamepad(&mut self) {}

    #[cfg(not(target_arch = "wasm32"))]
    fn gamepad_stick(&self) -> Vec2 {
        self.gamepad.as_ref().map(|gp| gp.left_stick()).unwrap_or(Vec2::ZERO)
    }

    #[cfg(target_arch = "wasm32")]
    fn gamepad_stick(&self) -> Vec2 {
        Vec2::ZERO
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn gamepad_down(&self, pad: Pad) -> bool {
        let Some(gp) = &self.gamepad else { return false };
        pad.buttons().iter().any(|&b| gp.is_button_down(b))
    }

    #[cfg(target_arch = "wasm32")]
    fn gamepad_down(&self, _pad: Pad) -> bool {
        false
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn gamepad_pressed(&self, pad: Pad) -> bool {
        let Some(gp) = &self.gamepad else { return false };
        pad.buttons().iter().any(|&b| gp.is_button_pressed(b))
    }

    #[cfg(target_arch = "wasm32")]
    fn gamepad_pressed(&self, _pad: Pad) -> bool {
        false
    }
}

/// Gamepad button groups
#[derive(Debug, Clone, Copy)]
enum Pad {
    Left,
    Right,
    Interact,
    Start,
}

#[cfg(not(target_arch = "wasm32"))]
impl Pad {
    fn buttons(self) -> &'static [u32] {
        match self {
            Pad::Left => &[button::DPAD_LEFT],
            Pad::Right => &[button::DPAD_RIGHT],
            Pad::Interact => &[button::A, button::Y],
            Pad::Start => &[button::START],
        }
    }
}
