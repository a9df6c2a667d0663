//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  StateTable                                                │
//! │  ┌────────────┬───────────┬──────────┬───────────────────┐ │
//! │  │ StateId    │ on_enter  │ on_exit  │ on_update         │ │
//! │  ├────────────┼───────────┼──────────┼───────────────────┤ │
//! │  │ Idle       │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │ │
//! │  │ Confirming │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │ │
//! │  │ PowerOn    │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │ │
//! │  │ Warning    │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │ │
//! │  │ Off        │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │ │
//! │  └────────────┴───────────┴──────────┴───────────────────┘ │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine runs `on_update` for the current state once per consumed
//! millisecond tick. A returned `Some(next_id)` executes the transition:
//! `on_exit(current)` → pointer update → `on_enter(next)`. Every handler
//! receives `&mut LatchContext`, the blackboard holding the input snapshot,
//! output commands, countdowns, and configuration. Handlers are total
//! functions: no errors, no panics.

pub mod context;
pub mod states;

use context::LatchContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all power-latch states.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    /// Power not applied, waiting for the switch to be seen asserted.
    Idle = 0,
    /// Switch held, hold-to-confirm countdown running, power still off.
    Confirming = 1,
    /// Power rail latched, activity countdown running.
    PowerOn = 2,
    /// Activity countdown below the warning threshold; cutoff imminent.
    Warning = 3,
    /// Terminal: all outputs deasserted, session over.
    Off = 4,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 5;

    /// Convert a `u8` index back to `StateId`. Panics on out-of-range in
    /// debug builds; returns `Off` in release (safe terminal fallback).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Confirming,
            2 => Self::PowerOn,
            3 => Self::Warning,
            4 => Self::Off,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Off
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut LatchContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut LatchContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table and threads a mutable [`LatchContext`] through
/// every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Consumed-tick counter (1 tick = 1 ms). Wraps at `u32::MAX`.
    tick_count: u32,
    /// Tick at which the current state was entered.
    state_entry_tick: u32,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut LatchContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one consumed millisecond tick.
    pub fn tick(&mut self, ctx: &mut LatchContext) {
        self.tick_count = self.tick_count.wrapping_add(1);
        ctx.ticks_in_state = self.tick_count.wrapping_sub(self.state_entry_tick);
        ctx.total_ticks = self.tick_count;

        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// Force an immediate transition (startup shortcut for the
    /// immediate-latch variant; tests use it to pre-position the machine).
    pub fn force_transition(&mut self, next: StateId, ctx: &mut LatchContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// How many ticks the FSM has been in the current state.
    pub fn ticks_in_current_state(&self) -> u32 {
        self.tick_count.wrapping_sub(self.state_entry_tick)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut LatchContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.state_entry_tick = self.tick_count;
        ctx.ticks_in_state = 0;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
