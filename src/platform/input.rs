//! Press/release edge detection
//!
//! Hosts report whether any touch, mouse button or key is currently held; the
//! tracker turns that level signal into just-pressed/just-released edges.

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, Default)]
pub struct TouchTracker {
    held: bool,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll once per tick with the current held state
    pub fn update(&mut self, held: bool) -> TickInput {
        let input = TickInput {
            just_pressed: held && !self.held,
            just_released: !held && self.held,
        };
        self.held = held;
        input
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}
