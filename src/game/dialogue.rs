//! Dialogue Engine
//!
//! A dialogue is either idle (`None`) or an active session on one
//! character's script. Sessions only move forward: each advance shows the
//! next line, and advancing past the last line closes the session and marks
//! the character met. There is no cancel.

use serde::{Deserialize, Serialize};

use super::state::MetRegistry;
use crate::world::LevelDef;

/// An open conversation with one character of the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueSession {
    character: usize,
    line: usize,
}

impl DialogueSession {
    /// Index of the character in the current level
    pub fn character(&self) -> usize {
        self.character
    }

    /// Zero-based line currently showing
    pub fn line(&self) -> usize {
        self.line
    }
}

/// Outcome of an advance request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueStep {
    /// No session was active (or it pointed at nothing); nothing changed
    Ignored,
    /// Moved to `line`
    Advanced { character: usize, line: usize },
    /// The last line was acknowledged; the session is closed.
    /// `newly_met` is false if the character had somehow been met already.
    Finished { character: usize, newly_met: bool },
}

/// Open a session on `candidate` if nothing is active.
///
/// Returns the new session, or None when a session is already running or
/// there is no candidate.
pub fn begin(session: &mut Option<DialogueSession>, candidate: Option<usize>) -> Option<DialogueSession> {
    if session.is_some() {
        return None;
    }
    let started = DialogueSession { character: candidate?, line: 0 };
    *session = Some(started);
    Some(started)
}

/// Advance the active session by one line, closing it after the last one.
///
/// Closing is the only place a character gets marked met.
pub fn advance(
    session: &mut Option<DialogueSession>,
    level_index: usize,
    level: &LevelDef,
    met: &mut MetRegistry,
) -> DialogueStep {
    let Some(active) = session.as_mut() else {
        return DialogueStep::Ignored;
    };
    let Some(character) = level.character(active.character) else {
        return DialogueStep::Ignored;
    };

    if active.line + 1 < character.lines.len() {
        active.line += 1;
        return DialogueStep::Advanced { character: active.character, line: active.line };
    }

    let index = active.character;
    *session = None;
    let newly_met = met.mark(level_index, index);
    DialogueStep::Finished { character: index, newly_met }
}
