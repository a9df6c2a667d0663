//! Blink patterns for the two single-colour status LEDs.
//!
//! The controller has no PWM duty to modulate — each LED is a plain digital
//! pin — so a pattern is just a boolean waveform sampled from the running
//! counters.
//!
//! | Pattern  | Description                                   | Source          |
//! |----------|-----------------------------------------------|-----------------|
//! | Off      | held low                                      | —               |
//! | Solid    | held high                                     | —               |
//! | Blink50  | 50% duty, alternating per tick low bit        | tick counter    |
//! | Warning  | irregular fast flicker before auto-power-off  | remaining ms    |

/// Pattern identifier for a status LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Off,
    Solid,
    /// Uniform 50% duty driven by the low bit of the tick counter.
    Blink50,
    /// Pre-shutoff warning: irregular flicker derived from the low-order
    /// bits of the remaining activity countdown.
    Warning,
}

/// Sample a pattern waveform.
///
/// `tick_count` is the running millisecond counter; `remaining_ms` is the
/// activity countdown (only the `Warning` pattern reads it).
pub fn level(pattern: Pattern, tick_count: u32, remaining_ms: u32) -> bool {
    match pattern {
        Pattern::Off => false,
        Pattern::Solid => true,
        Pattern::Blink50 => (tick_count & 1) == 0,
        // XOR of two countdown bits gives an uneven ~4-16 ms on/off mix that
        // reads as urgent next to the uniform blink.
        Pattern::Warning => ((remaining_ms >> 5) ^ (remaining_ms >> 7)) & 1 == 1,
    }
}
