//! Game Core
//!
//! Everything that decides what happens, with no drawing or device access.
//!
//! Key concepts:
//! - GameState: the single container of mutable game data
//! - Systems: small transition functions (movement, proximity, dialogue,
//!   progression, camera) over that state
//! - GameLoop: queues events and runs the systems in a fixed order
//! - GameSnapshot: the read-only view handed to the presentation layer
//!
//! Design philosophy:
//! - One writer: only the game loop mutates state
//! - Catalog data is indexed, never cloned into the state

pub mod camera;
pub mod dialogue;
pub mod event;
pub mod movement;
pub mod progression;
pub mod proximity;
pub mod runtime;
pub mod snapshot;
pub mod state;
pub mod ticker;

// Re-export main types
pub use event::{Events, GameEvent};
pub use runtime::GameLoop;
pub use snapshot::{DialogueSnapshot, GameSnapshot};
pub use state::Facing;
