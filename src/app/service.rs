//! Controller service — the hexagonal core.
//!
//! [`Controller`] owns the latch FSM, the two debounce filters, and the
//! output toggle, and advances all of them in lockstep on the shared
//! millisecond time base. All I/O flows through port traits injected at
//! call sites, making the whole controller testable with a mock bench.
//!
//! ```text
//!  SwitchPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!  TickPort   ──▶ │          Controller          │
//!                 │  Debounce ×2 · Toggle · FSM  │
//!  OutputPort ◀── └──────────────────────────────┘
//! ```
//!
//! One [`poll`](Controller::poll) call is one pass of the main loop: raw
//! pins are read every pass for responsiveness, while countdown work is
//! advanced only when the tick source reports a consumed tick. The order
//! inside a pass is fixed — tick-driven countdown decrements happen before
//! the input samples are evaluated, so every accepted transition is judged
//! against the countdowns as of the most recently consumed tick.

use log::info;

use crate::config::ControllerConfig;
use crate::debounce::{DebounceFilter, Edge};
use crate::fsm::context::LatchContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::led;
use crate::toggle::OutputToggle;

use super::events::{AppEvent, PowerOffReason};
use super::ports::{EventSink, OutputPort, SwitchPort, TickPort};

/// The control core: debounce filters, output toggle, and power latch.
pub struct Controller {
    fsm: Fsm,
    ctx: LatchContext,
    power_sw: DebounceFilter,
    input_sw: DebounceFilter,
    toggle: OutputToggle,
    /// Edge accepted since the last consumed tick, held for the FSM.
    pending_input_edge: Option<Edge>,
    off_applied: bool,
}

impl Controller {
    /// Construct the controller. Does **not** start the FSM — call
    /// [`start`](Self::start) with live pin levels first.
    pub fn new(config: ControllerConfig) -> Self {
        let debounce_ms = config.debounce_ms;
        let ctx = LatchContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Idle);
        Self {
            fsm,
            ctx,
            power_sw: DebounceFilter::new(false, debounce_ms),
            input_sw: DebounceFilter::new(false, debounce_ms),
            toggle: OutputToggle::new(),
            pending_input_edge: None,
            off_applied: false,
        }
    }

    /// Sample the pins once, seed the debounce filters with the observed
    /// levels, and run the FSM's initial `on_enter`.
    pub fn start(&mut self, hw: &mut impl SwitchPort, sink: &mut impl EventSink) {
        let raw_power = hw.power_switch();
        let raw_input = hw.external_input();
        let window = self.ctx.config.debounce_ms;
        self.power_sw = DebounceFilter::new(raw_power, window);
        self.input_sw = DebounceFilter::new(raw_input, window);
        self.ctx.inputs.power_switch_raw = raw_power;
        self.ctx.inputs.power_switch = raw_power;

        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("Controller started in {:?}", self.fsm.current_state());
    }

    // ── Per-pass orchestration ────────────────────────────────

    /// Run one main-loop pass: poll raw pins, consume at most one tick,
    /// advance the three machines, apply outputs.
    pub fn poll(
        &mut self,
        hw: &mut (impl SwitchPort + OutputPort),
        tick: &mut impl TickPort,
        sink: &mut impl EventSink,
    ) {
        // 1. Raw pins, every pass.
        let raw_power = hw.power_switch();
        let raw_input = hw.external_input();

        // 2. Consume at most one coalesced tick; countdowns advance first.
        let ticked = tick.take_tick();
        if ticked {
            self.power_sw.on_tick();
            self.input_sw.on_tick();
        }

        // 3. Continuous debounce sampling against the post-tick countdowns.
        // The power filter only maintains its stable level; the latch reads
        // the level, not the edge.
        let _ = self.power_sw.sample(raw_power);
        if let Some(edge) = self.input_sw.sample(raw_input) {
            self.pending_input_edge = Some(edge);
            // The relay flips the moment the edge is accepted, not on the
            // next tick.
            if self.powered() && self.toggle.on_edge(edge) {
                sink.emit(&AppEvent::OutputToggled(self.toggle.asserted()));
            }
        }

        self.ctx.inputs.power_switch_raw = raw_power;
        self.ctx.inputs.power_switch = self.power_sw.level();

        // 4. Advance the latch FSM once per consumed tick.
        if ticked {
            self.ctx.inputs.input_edge = self.pending_input_edge.take();

            let prev = self.fsm.current_state();
            let edge_seen = self.ctx.inputs.input_edge.is_some();
            self.fsm.tick(&mut self.ctx);
            let state = self.fsm.current_state();

            if edge_seen && matches!(prev, StateId::PowerOn | StateId::Warning) {
                sink.emit(&AppEvent::ActivityReset);
            }
            if state != prev {
                sink.emit(&AppEvent::StateChanged { from: prev, to: state });
                if state == StateId::Off {
                    sink.emit(&AppEvent::PoweredOff(self.power_off_reason(prev)));
                }
            }

            self.ctx.inputs.input_edge = None;
        }

        // 5. Outputs.
        self.apply_outputs(hw);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current latch state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Terminal? The main loop spins once this reports true.
    pub fn is_off(&self) -> bool {
        self.fsm.current_state() == StateId::Off
    }

    /// Current relay level.
    pub fn relay_asserted(&self) -> bool {
        self.toggle.asserted()
    }

    /// Remaining inactivity time in milliseconds.
    pub fn activity_remaining_ms(&self) -> u32 {
        self.ctx.activity_remaining_ms
    }

    // ── Internal ──────────────────────────────────────────────

    fn powered(&self) -> bool {
        matches!(
            self.fsm.current_state(),
            StateId::PowerOn | StateId::Warning
        )
    }

    fn power_off_reason(&self, prev: StateId) -> PowerOffReason {
        if prev == StateId::Confirming {
            PowerOffReason::ConfirmAborted
        } else if self.ctx.activity_remaining_ms == 0 {
            PowerOffReason::TimeoutExpired
        } else {
            PowerOffReason::SwitchReleased
        }
    }

    /// Translate FSM commands and toggle state into port writes.
    fn apply_outputs(&mut self, hw: &mut impl OutputPort) {
        if self.is_off() {
            // Deassert once; the pins stay low until the rail collapses.
            if !self.off_applied {
                hw.all_off();
                self.off_applied = true;
            }
            return;
        }

        if self.powered() {
            self.ctx.commands.relay = self.toggle.asserted();
            self.ctx.commands.output_led = self.toggle.led_level(self.ctx.total_ticks);
        }

        let cmds = &self.ctx.commands;
        hw.set_power_enable(cmds.power_enable);
        hw.set_relay(cmds.relay);
        hw.set_power_led(led::level(
            cmds.power_led,
            self.ctx.total_ticks,
            self.ctx.activity_remaining_ms,
        ));
        hw.set_output_led(cmds.output_led);
    }
}
