//! [`TickPort`] implementation over the global tick statics.

use crate::tick::{self, TickPort};

/// Hardware-backed tick port. The 1 kHz timer callback feeds the statics in
/// [`crate::tick`]; this wrapper is what the control loop polls.
#[derive(Default)]
pub struct HwTick;

impl HwTick {
    pub fn new() -> Self {
        Self
    }
}

impl TickPort for HwTick {
    fn take_tick(&mut self) -> bool {
        tick::take_tick()
    }

    fn now_ms(&self) -> u32 {
        tick::now_ms()
    }
}
