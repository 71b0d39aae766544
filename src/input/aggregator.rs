//! Input aggregation
//!
//! Folds discrete key intents and the continuous pointer vector into one
//! movement vector, and counts interact pulses until they are consumed.
//! Pure state; no device access happens here.

use super::{InputEvent, InputVector};

/// Merged input state fed by [`InputEvent`]s
#[derive(Debug, Clone, Default)]
pub struct InputAggregator {
    left_held: bool,
    right_held: bool,
    pointer: InputVector,
    /// Interact pulses not yet consumed, one per event
    interact_pending: u32,
}

impl InputAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the state
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveLeftStart => self.left_held = true,
            InputEvent::MoveLeftStop => self.left_held = false,
            InputEvent::MoveRightStart => self.right_held = true,
            InputEvent::MoveRightStop => self.right_held = false,
            InputEvent::Pointer { x, y } => self.pointer = InputVector::new(x, y),
            InputEvent::Interact => self.interact_pending = self.interact_pending.saturating_add(1),
        }
    }

    /// Resolved movement vector.
    ///
    /// A pointer with non-zero horizontal magnitude wins over key state so two
    /// devices never stack. While a dialogue is active everything is zero.
    pub fn movement(&self, dialogue_active: bool) -> InputVector {
        if dialogue_active {
            return InputVector::ZERO;
        }
        if self.pointer.x != 0.0 {
            return self.pointer;
        }
        let mut x = 0.0;
        if self.left_held {
            x -= 1.0;
        }
        if self.right_held {
            x += 1.0;
        }
        InputVector::new(x, 0.0)
    }

    /// Consume one interact pulse (true once per request)
    pub fn take_interact(&mut self) -> bool {
        if self.interact_pending == 0 {
            return false;
        }
        self.interact_pending -= 1;
        true
    }

    /// Forget all held keys, the pointer and any pending pulse
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_resolve_direction() {
        let mut input = InputAggregator::new();
        input.apply(InputEvent::MoveRightStart);
        assert_eq!(input.movement(false).x, 1.0);

        input.apply(InputEvent::MoveRightStop);
        input.apply(InputEvent::MoveLeftStart);
        assert_eq!(input.movement(false).x, -1.0);

        input.apply(InputEvent::MoveLeftStop);
        assert_eq!(input.movement(false), InputVector::ZERO);
    }

    #[test]
    fn test_both_keys_cancel() {
        let mut input = InputAggregator::new();
        input.apply(InputEvent::MoveLeftStart);
        input.apply(InputEvent::MoveRightStart);
        assert!(!input.movement(false).is_moving());
    }

    #[test]
    fn test_pointer_takes_precedence() {
        let mut input = InputAggregator::new();
        input.apply(InputEvent::MoveRightStart);
        input.apply(InputEvent::Pointer { x: -0.4, y: 0.2 });
        assert_eq!(input.movement(false).x, -0.4);

        // Neutral pointer hands control back to the keys
        input.apply(InputEvent::Pointer { x: 0.0, y: 0.7 });
        assert_eq!(input.movement(false).x, 1.0);
    }

    #[test]
    fn test_dialogue_suppresses_movement() {
        let mut input = InputAggregator::new();
        input.apply(InputEvent::MoveRightStart);
        input.apply(InputEvent::Pointer { x: 1.0, y: 0.0 });
        assert_eq!(input.movement(true), InputVector::ZERO);
    }

    #[test]
    fn test_interact_is_edge_triggered() {
        let mut input = InputAggregator::new();
        assert!(!input.take_interact());

        input.apply(InputEvent::Interact);
        assert!(input.take_interact());
        assert!(!input.take_interact());
    }

    #[test]
    fn test_each_interact_is_its_own_pulse() {
        let mut input = InputAggregator::new();
        input.apply(InputEvent::Interact);
        input.apply(InputEvent::Interact);
        assert_eq!(input.interact_pending, 2);
        assert!(input.take_interact());
        assert!(input.take_interact());
        assert!(!input.take_interact());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut input = InputAggregator::new();
        input.apply(InputEvent::MoveLeftStart);
        input.apply(InputEvent::Interact);
        input.reset();
        assert!(!input.movement(false).is_moving());
        assert!(!input.take_interact());
    }
}
