//! Output toggle state machine.
//!
//! Two states, `Deasserted` (initial) and `Asserted`. Every accepted
//! active-going edge of the external input flips the state — edge-triggered,
//! so a held switch toggles once on press and not again on release.

use crate::debounce::Edge;

/// The latched, toggled output driving the relay pin.
#[derive(Debug, Clone, Default)]
pub struct OutputToggle {
    asserted: bool,
}

impl OutputToggle {
    pub fn new() -> Self {
        Self { asserted: false }
    }

    /// Feed an accepted edge from the external-input debounce filter.
    /// Returns `true` when the output state changed.
    pub fn on_edge(&mut self, edge: Edge) -> bool {
        match edge {
            Edge::Rising => {
                self.asserted = !self.asserted;
                true
            }
            Edge::Falling => false,
        }
    }

    /// Current relay level.
    pub fn asserted(&self) -> bool {
        self.asserted
    }

    /// Output-status LED level: 50% duty from the low bit of the tick
    /// counter while asserted, held off otherwise.
    pub fn led_level(&self, tick_count: u32) -> bool {
        self.asserted && (tick_count & 1) == 0
    }
}
