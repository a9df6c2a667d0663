//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port. The firmware routes them to
//! the serial log; test benches record them.

use crate::fsm::StateId;

/// Why the controller powered itself off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerOffReason {
    /// The inactivity countdown reached zero.
    TimeoutExpired,
    /// The physical power switch was released after the grace window.
    SwitchReleased,
    /// The switch was released before the hold-to-confirm delay elapsed;
    /// power was never applied.
    ConfirmAborted,
}

/// Structured events emitted by the control core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has started (carries the initial state).
    Started(StateId),

    /// The latch FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The relay output flipped (carries the new level).
    OutputToggled(bool),

    /// An accepted input transition reloaded the inactivity countdown.
    ActivityReset,

    /// Terminal power-off, with the cause.
    PoweredOff(PowerOffReason),
}
