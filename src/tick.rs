//! Millisecond tick source.
//!
//! A hardware timer fires at 1 kHz and calls [`timer_tick`], which bumps the
//! monotonic millisecond counter and raises a one-shot pending flag. The
//! main loop consumes the flag through [`take_tick`] (or, in tests, through
//! any [`TickPort`] implementation).
//!
//! ```text
//! ┌─────────────┐  timer_tick()   ┌──────────────┐  take_tick()  ┌──────────────┐
//! │ Timer ISR   │───────────────▶│ TICKS + flag  │──────────────▶│  Main Loop   │
//! │ (producer)  │                 │ (atomics)     │               │  (consumer)  │
//! └─────────────┘                 └──────────────┘               └──────────────┘
//! ```
//!
//! The flag deliberately coalesces: if the loop falls behind, any number of
//! timer callbacks collapse into a single pending tick. Countdown work is
//! therefore advanced at most one step per `take_tick`, never burst-replayed.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Monotonic millisecond counter. Wraps at `u32::MAX` (~49.7 days).
/// Written by the timer callback, read by the main loop.
static TICKS: AtomicU32 = AtomicU32::new(0);

/// One-shot "a tick occurred" flag.
/// Set by the timer callback, cleared by the consumer. At most one pending
/// tick is ever represented.
static TICK_PENDING: AtomicBool = AtomicBool::new(false);

/// Timer callback — register this on the 1 kHz periodic timer.
/// Safe to call from interrupt/timer-task context (lock-free atomics).
pub fn timer_tick() {
    TICKS.fetch_add(1, Ordering::Relaxed);
    TICK_PENDING.store(true, Ordering::Release);
}

/// Consume the pending tick, if any. Single consumer: the main loop.
pub fn take_tick() -> bool {
    TICK_PENDING.swap(false, Ordering::Acquire)
}

/// Current monotonic time in milliseconds. Wrapping.
pub fn now_ms() -> u32 {
    TICKS.load(Ordering::Relaxed)
}

/// Polled tick interface consumed by the control loop.
///
/// The hardware implementation reads the statics above; test benches inject
/// ticks by hand, one `poll` pass at a time.
pub trait TickPort {
    /// Did a tick occur since the last check? Clears the pending flag.
    fn take_tick(&mut self) -> bool;

    /// Monotonic millisecond counter, wrapping.
    fn now_ms(&self) -> u32;
}
