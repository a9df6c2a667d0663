//! Countdown debounce filter.
//!
//! One instance per monitored input. The filter holds the last accepted
//! stable level and a millisecond countdown. While the countdown is
//! non-zero the filter is closed: raw samples are ignored and each control
//! tick decrements the countdown. At zero the filter is open, and the first
//! raw sample that disagrees with the stored level is accepted immediately:
//! the stable level flips, the countdown reloads, and an edge is reported.
//!
//! Chatter faster than the window therefore collapses to at most one
//! accepted transition per window.

/// An accepted input transition, distinguishing polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Stable level went inactive → active.
    Rising,
    /// Stable level went active → inactive.
    Falling,
}

/// Debounce state for a single digital input.
#[derive(Debug, Clone)]
pub struct DebounceFilter {
    /// Last accepted stable level.
    stable: bool,
    /// Remaining closed time. While > 0 the input is ignored.
    countdown_ms: u32,
    /// Reload value on every accepted transition.
    window_ms: u32,
}

impl DebounceFilter {
    /// Create a filter with a known initial level and the filter window.
    pub fn new(initial_level: bool, window_ms: u32) -> Self {
        Self {
            stable: initial_level,
            countdown_ms: 0,
            window_ms,
        }
    }

    /// Advance the countdown by one consumed tick. No other effect.
    pub fn on_tick(&mut self) {
        self.countdown_ms = self.countdown_ms.saturating_sub(1);
    }

    /// Compare a raw sample against the stable level. Called every loop
    /// pass, independent of the tick. Returns the accepted edge, if any.
    pub fn sample(&mut self, raw: bool) -> Option<Edge> {
        if self.countdown_ms > 0 || raw == self.stable {
            return None;
        }
        self.stable = raw;
        self.countdown_ms = self.window_ms;
        Some(if raw { Edge::Rising } else { Edge::Falling })
    }

    /// The last accepted stable level.
    pub fn level(&self) -> bool {
        self.stable
    }

    /// Whether the filter is currently closed (inside the quiet window).
    pub fn is_closed(&self) -> bool {
        self.countdown_ms > 0
    }
}
