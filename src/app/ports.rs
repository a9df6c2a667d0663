//! Port traits — the boundary between the control logic and the pins.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (GPIO, the hardware tick source, the log sink)
//! implement these traits. The [`Controller`](super::service::Controller)
//! consumes them via generics, so the domain core never touches hardware
//! directly and every test runs on the host against a mock bench.

/// Read-side port: raw, unfiltered switch levels.
///
/// `true` means asserted (the electrical polarity is the adapter's
/// business — active-low boards invert before reporting).
pub trait SwitchPort {
    /// Raw power-switch level this instant.
    fn power_switch(&mut self) -> bool;

    /// Raw external-input level this instant.
    fn external_input(&mut self) -> bool;
}

/// Write-side port: the four output pins.
pub trait OutputPort {
    /// Gate the downstream power supply.
    fn set_power_enable(&mut self, on: bool);

    /// Drive the relay / latched-output pin.
    fn set_relay(&mut self, on: bool);

    /// Drive the power-status LED.
    fn set_power_led(&mut self, on: bool);

    /// Drive the output-status LED.
    fn set_output_led(&mut self, on: bool);

    /// Deassert everything — the terminal condition.
    fn all_off(&mut self);
}

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log in this
/// firmware; the port exists so tests can record them).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

pub use crate::tick::TickPort;
