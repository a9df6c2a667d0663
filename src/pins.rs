//! GPIO pin assignments for the LatchBox main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// User-held power button. Active LOW (internal pull-up), like the original
/// board's switch-to-ground wiring.
pub const POWER_SWITCH_GPIO: i32 = 3;

/// External accessibility switch (3.5 mm jack). Active LOW, internal pull-up.
pub const EXTERNAL_INPUT_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Gates the downstream supply (high-side P-FET driver). Active HIGH.
pub const POWER_ENABLE_GPIO: i32 = 5;

/// Relay / latched-output driver transistor. Active HIGH.
pub const RELAY_GPIO: i32 = 6;

/// Power-status LED. Active HIGH.
pub const POWER_LED_GPIO: i32 = 7;

/// Output-status LED. Active HIGH.
pub const OUTPUT_LED_GPIO: i32 = 8;
