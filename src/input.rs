//! Input collaborator
//!
//! The kernel only ever sees an [`InputState`] snapshot. The embedding
//! owns an [`InputTracker`] fed by whatever device layer it has and
//! takes a snapshot once per tick. Jump is edge-triggered and buffered:
//! a press latches until the kernel actually jumps (the embedding then
//! calls [`InputTracker::consume_jump`]), so a press in mid-air still
//! fires on landing, and holding the button yields one jump.

use serde::{Deserialize, Serialize};

/// Immutable button-state snapshot handed to the kernel each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    /// A latched press waiting to be consumed
    pub jump: bool,
    pub sprint: bool,
}

/// Pressed-state owner for the embedding layer
#[derive(Debug, Default)]
pub struct InputTracker {
    left: bool,
    right: bool,
    sprint: bool,
    jump_held: bool,
    jump_latched: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press_left(&mut self, down: bool) {
        self.left = down;
    }

    pub fn press_right(&mut self, down: bool) {
        self.right = down;
    }

    pub fn press_sprint(&mut self, down: bool) {
        self.sprint = down;
    }

    /// Latch a jump on the rising edge only
    pub fn press_jump(&mut self, down: bool) {
        if down && !self.jump_held {
            self.jump_latched = true;
        }
        self.jump_held = down;
    }

    /// Snapshot for this tick; a latched jump stays latched until
    /// [`Self::consume_jump`]
    pub fn snapshot(&self) -> InputState {
        InputState {
            left: self.left,
            right: self.right,
            jump: self.jump_latched,
            sprint: self.sprint,
        }
    }

    /// Clear the latch once a jump has actually fired
    pub fn consume_jump(&mut self) {
        self.jump_latched = false;
    }

    /// Drop all held and latched state, e.g. on focus loss
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
