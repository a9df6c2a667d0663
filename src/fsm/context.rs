//! Shared mutable context threaded through every FSM handler.
//!
//! `LatchContext` is the single struct that state handlers read from and
//! write to: the latest input snapshot, the output commands, the two
//! countdowns, timing, and configuration. Think of it as the "blackboard"
//! the controller and the state table share.

use crate::config::ControllerConfig;
use crate::debounce::Edge;
use crate::led::Pattern;

// ---------------------------------------------------------------------------
// Input snapshot (read-only to state handlers; written by the controller)
// ---------------------------------------------------------------------------

/// Input levels and accepted edges as of the current loop pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// Raw (unfiltered) power-switch level. The startup sample and the
    /// hold-to-confirm abort check read the pin directly, per variant.
    pub power_switch_raw: bool,
    /// Debounced power-switch level. The release-to-off checks in
    /// `PowerOn`/`Warning` use this.
    pub power_switch: bool,
    /// Accepted edge on the external input this pass, if any.
    pub input_edge: Option<Edge>,
}

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; applied by the controller)
// ---------------------------------------------------------------------------

/// Requested output pin states. The controller applies these through the
/// `OutputPort` after each FSM tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputCommands {
    /// Power-enable pin gating the downstream supply.
    pub power_enable: bool,
    /// Relay / latched-output pin.
    pub relay: bool,
    /// Power-status LED pattern.
    pub power_led: Pattern,
    /// Output-status LED level.
    pub output_led: bool,
}

impl Default for OutputCommands {
    fn default() -> Self {
        Self::all_off()
    }
}

impl OutputCommands {
    /// Every output deasserted — the reset and terminal condition.
    pub fn all_off() -> Self {
        Self {
            power_enable: false,
            relay: false,
            power_led: Pattern::Off,
            output_led: false,
        }
    }
}

// ---------------------------------------------------------------------------
// LatchContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct LatchContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u32,
    /// Total consumed ticks (1 ms each). Wraps.
    pub total_ticks: u32,

    // -- Countdowns --
    /// Remaining hold-to-confirm time (Confirming only).
    pub hold_remaining_ms: u32,
    /// Remaining inactivity time before auto-power-off. Decrements by
    /// exactly 1 per consumed tick while power is latched; clamped at 0.
    pub activity_remaining_ms: u32,

    // -- I/O --
    /// Inputs as of this pass. Written by the controller before each tick.
    pub inputs: InputSnapshot,
    /// Outputs requested by the handlers. Applied after each tick.
    pub commands: OutputCommands,

    // -- Configuration --
    pub config: ControllerConfig,
}

impl LatchContext {
    /// Create a new context with the given configuration.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            hold_remaining_ms: 0,
            activity_remaining_ms: 0,
            inputs: InputSnapshot::default(),
            commands: OutputCommands::all_off(),
            config,
        }
    }

    /// Reload the inactivity countdown to its configured maximum.
    pub fn reset_activity(&mut self) {
        self.activity_remaining_ms = self.config.auto_off_timeout_ms;
    }

    /// Whether the remaining time is inside the pre-shutoff warning band.
    pub fn in_warning_band(&self) -> bool {
        self.activity_remaining_ms < self.config.warning_threshold_ms
    }
}
