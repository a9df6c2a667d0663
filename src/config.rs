//! System configuration parameters
//!
//! All tunable parameters for the latching power controller. The defaults
//! match the two-switch deployment; [`ControllerConfig::immediate_latch`]
//! reproduces the older single-switch board.

use serde::{Deserialize, Serialize};

/// Core controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Debounce ---
    /// Quiet period required after an accepted input transition (milliseconds).
    pub debounce_ms: u32,

    // --- Power latch ---
    /// Inactivity period after which the controller powers itself off (milliseconds).
    pub auto_off_timeout_ms: u32,
    /// Remaining time below which the power LED switches to the warning pattern (milliseconds).
    pub warning_threshold_ms: u32,
    /// Whether power-on requires the switch to be held for `confirm_hold_ms`
    /// before the power rail is applied. When `false`, power is applied the
    /// moment the switch is seen asserted at startup.
    pub confirm_hold: bool,
    /// Hold-to-confirm duration (milliseconds). Only meaningful when `confirm_hold` is set.
    pub confirm_hold_ms: u32,
    /// Window after power-up during which a power-switch release is ignored
    /// (milliseconds). Absorbs switch bounce right after the latch engages.
    pub release_grace_ms: u32,
    /// Whether releasing the power switch (after the grace window) powers the
    /// system off. The battery-powered boards wire the switch in series with
    /// the latch sense, so release must cut power; the three-pin board ties
    /// this to its dedicated switch input instead.
    pub power_off_on_release: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::hold_to_confirm()
    }
}

impl ControllerConfig {
    /// Two-switch deployment: 1 s hold before power is applied, 10 minute
    /// inactivity timeout, release powers off.
    pub fn hold_to_confirm() -> Self {
        Self {
            debounce_ms: 20,
            auto_off_timeout_ms: 600_000,
            warning_threshold_ms: 10_000,
            confirm_hold: true,
            confirm_hold_ms: 1_000,
            release_grace_ms: 200,
            power_off_on_release: true,
        }
    }

    /// Single-switch deployment: power applied immediately at startup, 2
    /// minute inactivity timeout, 200 ms bounce grace after the latch.
    pub fn immediate_latch() -> Self {
        Self {
            debounce_ms: 20,
            auto_off_timeout_ms: 120_000,
            warning_threshold_ms: 10_000,
            confirm_hold: false,
            confirm_hold_ms: 0,
            release_grace_ms: 200,
            power_off_on_release: true,
        }
    }
}
