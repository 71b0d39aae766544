//! Event System
//!
//! Two directions of traffic go through here:
//! - `GameEvent`s flow *into* the game loop. Every input and command is
//!   queued and handled one at a time, so nothing interleaves with a tick.
//! - Notification events flow *out* of the loop. The presentation reads
//!   them to react to transitions (level banners, sounds) without polling
//!   the state for changes.

use serde::{Deserialize, Serialize};

use crate::input::InputEvent;

/// A queue for events of a single type.
/// Events are collected during the frame and cleared at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Take every queued event at once, leaving the queue empty
    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear all events without processing
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the game loop can be asked to do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Leave the title screen
    Start,
    /// Rebuild all state from the catalog and return to the title screen
    Restart,
    /// Raw device input
    Input(InputEvent),
    /// Show the next dialogue line (or close the dialogue on its last line)
    Advance,
    /// Talk to a specific character, e.g. after tapping it
    TalkTo(String),
}

impl From<InputEvent> for GameEvent {
    fn from(event: InputEvent) -> Self {
        GameEvent::Input(event)
    }
}

/// Container for all outgoing notifications.
/// Add new event types as fields here.
#[derive(Debug, Default)]
pub struct Events {
    /// Player arrived in a level (including the first one)
    pub level_entered: EventQueue<LevelEnteredEvent>,

    /// A dialogue session opened
    pub dialogue_started: EventQueue<DialogueStartedEvent>,

    /// A dialogue moved to its next line
    pub dialogue_advanced: EventQueue<DialogueAdvancedEvent>,

    /// A dialogue finished and its character is now met
    pub character_met: EventQueue<CharacterMetEvent>,

    /// Every character of the final level has been met
    pub game_completed: EventQueue<GameCompletedEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues. Call at end of frame.
    pub fn clear_all(&mut self) {
        self.level_entered.clear();
        self.dialogue_started.clear();
        self.dialogue_advanced.clear();
        self.character_met.clear();
        self.game_completed.clear();
    }
}

// =============================================================================
// Event Types
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LevelEnteredEvent {
    pub level_index: usize,
    pub level_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogueStartedEvent {
    pub level_index: usize,
    pub character_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialogueAdvancedEvent {
    pub character_index: usize,
    /// Line now showing
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterMetEvent {
    pub level_index: usize,
    pub character_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameCompletedEvent {
    pub final_level: usize,
}
