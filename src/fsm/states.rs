//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap. Handlers are total functions over the context.
//!
//! ```text
//!  IDLE ──[switch held, confirm variant]──▶ CONFIRMING
//!    │                                          │
//!    │ [switch held,                 [hold elapsed]   [released early]
//!    │  immediate variant]                      │          │
//!    └──────────────▶ POWER-ON ◀────────────────┘          ▼
//!                        │  ▲                             OFF
//!        [remaining < warn] [input edge]                   ▲
//!                        ▼  │                              │
//!                      WARNING ────[remaining == 0]────────┤
//!                                                          │
//!  POWER-ON/WARNING ──[switch released after grace]────────┘
//! ```
//!
//! `OFF` is terminal for the session: the controlling circuit removes
//! power, so there is nothing left for software to do.

use super::context::LatchContext;
use super::{StateDescriptor, StateId};
use crate::led::Pattern;
use log::info;

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1 — Confirming
        StateDescriptor {
            id: StateId::Confirming,
            name: "Confirming",
            on_enter: Some(confirming_enter),
            on_exit: None,
            on_update: confirming_update,
        },
        // Index 2 — PowerOn
        StateDescriptor {
            id: StateId::PowerOn,
            name: "PowerOn",
            on_enter: Some(power_on_enter),
            on_exit: None,
            on_update: power_on_update,
        },
        // Index 3 — Warning
        StateDescriptor {
            id: StateId::Warning,
            name: "Warning",
            on_enter: Some(warning_enter),
            on_exit: None,
            on_update: warning_update,
        },
        // Index 4 — Off
        StateDescriptor {
            id: StateId::Off,
            name: "Off",
            on_enter: Some(off_enter),
            on_exit: None,
            on_update: off_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE — power not applied, waiting on the switch
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut LatchContext) {
    ctx.commands = super::context::OutputCommands::all_off();
}

fn idle_update(ctx: &mut LatchContext) -> Option<StateId> {
    if !ctx.inputs.power_switch_raw {
        return None;
    }
    if ctx.config.confirm_hold {
        Some(StateId::Confirming)
    } else {
        // Immediate-latch variant: apply power as soon as the switch is
        // seen; the grace window in PowerOn absorbs the engage bounce.
        Some(StateId::PowerOn)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  CONFIRMING — switch held, power withheld until the hold elapses
// ═══════════════════════════════════════════════════════════════════════════

fn confirming_enter(ctx: &mut LatchContext) {
    ctx.hold_remaining_ms = ctx.config.confirm_hold_ms;
    ctx.commands.power_led = Pattern::Blink50;
    info!("CONFIRMING: hold switch for {} ms", ctx.hold_remaining_ms);
}

fn confirming_update(ctx: &mut LatchContext) -> Option<StateId> {
    // Letting go before the hold elapses aborts power-on entirely.
    if !ctx.inputs.power_switch_raw {
        info!(
            "CONFIRMING: released with {} ms left, aborting",
            ctx.hold_remaining_ms
        );
        return Some(StateId::Off);
    }

    ctx.hold_remaining_ms = ctx.hold_remaining_ms.saturating_sub(1);
    if ctx.hold_remaining_ms == 0 {
        return Some(StateId::PowerOn);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  POWER-ON — rail latched, activity countdown running
// ═══════════════════════════════════════════════════════════════════════════

fn power_on_enter(ctx: &mut LatchContext) {
    ctx.commands.power_enable = true;
    ctx.commands.power_led = Pattern::Blink50;
    ctx.reset_activity();
    info!(
        "POWER-ON: latched, auto-off in {} ms",
        ctx.activity_remaining_ms
    );
}

fn power_on_update(ctx: &mut LatchContext) -> Option<StateId> {
    // Switch release cuts power, once past the engage grace window. The
    // debounced level is used here so contact chatter alone cannot drop
    // the rail.
    if ctx.config.power_off_on_release
        && !ctx.inputs.power_switch
        && ctx.ticks_in_state >= ctx.config.release_grace_ms
    {
        info!("POWER-ON: switch released, powering off");
        return Some(StateId::Off);
    }

    // Any accepted transition on the external input counts as activity.
    // The countdown is not decremented on a reload tick, so a reload
    // leaves exactly the configured maximum.
    if ctx.inputs.input_edge.is_some() {
        ctx.reset_activity();
        return None;
    }

    ctx.activity_remaining_ms = ctx.activity_remaining_ms.saturating_sub(1);
    if ctx.activity_remaining_ms == 0 {
        return Some(StateId::Off);
    }
    if ctx.in_warning_band() {
        return Some(StateId::Warning);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  WARNING — cutoff imminent, power LED flickers
// ═══════════════════════════════════════════════════════════════════════════

fn warning_enter(ctx: &mut LatchContext) {
    ctx.commands.power_led = Pattern::Warning;
    info!(
        "WARNING: auto-off in {} ms unless input activity resumes",
        ctx.activity_remaining_ms
    );
}

fn warning_update(ctx: &mut LatchContext) -> Option<StateId> {
    if ctx.config.power_off_on_release && !ctx.inputs.power_switch {
        info!("WARNING: switch released, powering off");
        return Some(StateId::Off);
    }

    // Activity rescues the session: back to the normal blink and a full
    // countdown (reloaded by power_on_enter).
    if ctx.inputs.input_edge.is_some() {
        return Some(StateId::PowerOn);
    }

    ctx.activity_remaining_ms = ctx.activity_remaining_ms.saturating_sub(1);
    if ctx.activity_remaining_ms == 0 {
        info!("WARNING: inactivity timeout expired");
        return Some(StateId::Off);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  OFF — terminal
// ═══════════════════════════════════════════════════════════════════════════

fn off_enter(ctx: &mut LatchContext) {
    ctx.commands = super::context::OutputCommands::all_off();
    info!("OFF: outputs deasserted, session over");
}

fn off_update(_ctx: &mut LatchContext) -> Option<StateId> {
    // The controlling circuit removes power; nothing to do but wait for it.
    None
}
