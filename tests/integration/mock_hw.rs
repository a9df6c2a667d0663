//! Mock hardware bench for integration tests.
//!
//! Holds the switch levels the test script sets, records output pin
//! writes, and lets the test inject millisecond ticks by hand instead of
//! waiting on a real timer.

use latchbox::app::events::AppEvent;
use latchbox::app::ports::{EventSink, OutputPort, SwitchPort, TickPort};

// ── Mock hardware ─────────────────────────────────────────────

/// Switch levels are logical (true = asserted); the active-low inversion
/// lives in the real hardware adapter, below the port boundary.
pub struct MockBench {
    pub power_switch: bool,
    pub external_input: bool,

    pub power_enable: bool,
    pub relay: bool,
    pub power_led: bool,
    pub output_led: bool,

    /// Every relay level change, in order. Chatter tests count these.
    pub relay_transitions: Vec<bool>,
    /// Whether the power rail was ever commanded on.
    pub power_enable_ever_on: bool,
    pub all_off_calls: u32,
}

#[allow(dead_code)]
impl MockBench {
    pub fn new() -> Self {
        Self {
            power_switch: false,
            external_input: false,
            power_enable: false,
            relay: false,
            power_led: false,
            output_led: false,
            relay_transitions: Vec::new(),
            power_enable_ever_on: false,
            all_off_calls: 0,
        }
    }
}

impl SwitchPort for MockBench {
    fn power_switch(&mut self) -> bool {
        self.power_switch
    }

    fn external_input(&mut self) -> bool {
        self.external_input
    }
}

impl OutputPort for MockBench {
    fn set_power_enable(&mut self, on: bool) {
        self.power_enable = on;
        if on {
            self.power_enable_ever_on = true;
        }
    }

    fn set_relay(&mut self, on: bool) {
        if on != self.relay {
            self.relay_transitions.push(on);
        }
        self.relay = on;
    }

    fn set_power_led(&mut self, on: bool) {
        self.power_led = on;
    }

    fn set_output_led(&mut self, on: bool) {
        self.output_led = on;
    }

    fn all_off(&mut self) {
        self.all_off_calls += 1;
        self.set_power_enable(false);
        self.set_relay(false);
        self.set_power_led(false);
        self.set_output_led(false);
    }
}

// ── Manual tick source ────────────────────────────────────────

/// Tick port the test advances by hand, one millisecond at a time.
#[derive(Default)]
pub struct ManualTick {
    pub pending: bool,
    pub now: u32,
}

impl TickPort for ManualTick {
    fn take_tick(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    fn now_ms(&self) -> u32 {
        self.now
    }
}

// ── Recording event sink ──────────────────────────────────────

/// Captures every emitted event for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
