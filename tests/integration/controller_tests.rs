//! Integration tests for the Controller → FSM → output pipeline.
//!
//! These run on the host (x86_64) and drive whole sessions through
//! `Controller::poll` with hand-injected ticks: power-up, relay toggling,
//! activity reloads, the warning phase, and the terminal power-off.

use crate::mock_hw::{ManualTick, MockBench, RecordingSink};

use latchbox::app::events::{AppEvent, PowerOffReason};
use latchbox::app::service::Controller;
use latchbox::config::ControllerConfig;
use latchbox::fsm::StateId;

// Short timings so full sessions stay cheap to simulate. Ratios mirror the
// shipping config: debounce < grace < hold < warning < timeout.
fn bench_config() -> ControllerConfig {
    ControllerConfig {
        debounce_ms: 20,
        auto_off_timeout_ms: 5_000,
        warning_threshold_ms: 1_000,
        confirm_hold: true,
        confirm_hold_ms: 300,
        release_grace_ms: 200,
        power_off_on_release: true,
    }
}

struct Bench {
    controller: Controller,
    hw: MockBench,
    tick: ManualTick,
    sink: RecordingSink,
}

impl Bench {
    /// Build and start a controller with the power switch already held,
    /// as when the user's press is what woke the board.
    fn power_held(config: ControllerConfig) -> Self {
        let mut hw = MockBench::new();
        hw.power_switch = true;
        let mut controller = Controller::new(config);
        let mut sink = RecordingSink::new();
        controller.start(&mut hw, &mut sink);
        Self {
            controller,
            hw,
            tick: ManualTick::default(),
            sink,
        }
    }

    fn idle(config: ControllerConfig) -> Self {
        let mut hw = MockBench::new();
        let mut controller = Controller::new(config);
        let mut sink = RecordingSink::new();
        controller.start(&mut hw, &mut sink);
        Self {
            controller,
            hw,
            tick: ManualTick::default(),
            sink,
        }
    }

    /// Advance `n` milliseconds, one tick and one poll pass each.
    fn step_ms(&mut self, n: u32) {
        for _ in 0..n {
            self.tick.pending = true;
            self.tick.now = self.tick.now.wrapping_add(1);
            self.controller
                .poll(&mut self.hw, &mut self.tick, &mut self.sink);
        }
    }

    /// One poll pass with no tick — raw sampling between timer edges.
    fn pass(&mut self) {
        self.controller
            .poll(&mut self.hw, &mut self.tick, &mut self.sink);
    }

    /// Walk from startup (switch held) into PowerOn.
    fn into_power_on(config: ControllerConfig) -> Self {
        let hold = config.confirm_hold_ms;
        let mut b = Self::power_held(config);
        b.step_ms(1 + hold);
        assert_eq!(b.controller.state(), StateId::PowerOn);
        b
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn starts_idle_with_outputs_off() {
    let mut b = Bench::idle(bench_config());
    assert_eq!(b.controller.state(), StateId::Idle);
    assert!(b.sink.contains(&AppEvent::Started(StateId::Idle)));

    b.step_ms(100);
    assert_eq!(b.controller.state(), StateId::Idle, "no switch, no session");
    assert!(!b.hw.power_enable_ever_on);
    assert!(!b.hw.relay);
}

#[test]
fn held_switch_walks_through_confirm_into_power_on() {
    let mut b = Bench::power_held(bench_config());

    b.step_ms(1);
    assert_eq!(b.controller.state(), StateId::Confirming);
    assert!(!b.hw.power_enable, "rail stays down during the hold");

    b.step_ms(299);
    assert_eq!(b.controller.state(), StateId::Confirming, "hold not yet elapsed");
    assert!(!b.hw.power_enable_ever_on);

    b.step_ms(1);
    assert_eq!(b.controller.state(), StateId::PowerOn);
    assert!(b.hw.power_enable);
    assert_eq!(b.controller.activity_remaining_ms(), 5_000);
    assert!(b.sink.contains(&AppEvent::StateChanged {
        from: StateId::Confirming,
        to: StateId::PowerOn,
    }));
}

#[test]
fn immediate_variant_latches_on_first_tick() {
    let mut cfg = ControllerConfig::immediate_latch();
    cfg.auto_off_timeout_ms = 5_000;
    let mut b = Bench::power_held(cfg);

    b.step_ms(1);
    assert_eq!(b.controller.state(), StateId::PowerOn, "no confirm phase");
    assert!(b.hw.power_enable);
}

// ── Confirm abort ─────────────────────────────────────────────

#[test]
fn releasing_during_confirm_aborts_without_power() {
    let mut b = Bench::power_held(bench_config());
    b.step_ms(101);
    assert_eq!(b.controller.state(), StateId::Confirming);

    b.hw.power_switch = false;
    b.step_ms(1);

    assert_eq!(b.controller.state(), StateId::Off);
    assert!(
        !b.hw.power_enable_ever_on,
        "rail must never come up on an aborted confirm"
    );
    assert!(b
        .sink
        .contains(&AppEvent::PoweredOff(PowerOffReason::ConfirmAborted)));
}

// ── Relay toggle ──────────────────────────────────────────────

#[test]
fn input_press_toggles_relay_and_reloads_countdown() {
    let mut b = Bench::into_power_on(bench_config());

    b.step_ms(50);
    assert_eq!(b.controller.activity_remaining_ms(), 4_950);

    // Press: relay on, countdown back at the full maximum (reload ticks
    // do not decrement).
    b.hw.external_input = true;
    b.step_ms(1);
    assert!(b.hw.relay);
    assert_eq!(b.controller.activity_remaining_ms(), 5_000);
    assert!(b.sink.contains(&AppEvent::OutputToggled(true)));
    assert!(b.sink.contains(&AppEvent::ActivityReset));

    // Release: activity again, relay unchanged.
    b.step_ms(25);
    b.hw.external_input = false;
    b.step_ms(1);
    assert!(b.hw.relay, "relay only flips on a press, never a release");
    assert_eq!(b.controller.activity_remaining_ms(), 5_000);

    // Second press: relay back off.
    b.step_ms(25);
    b.hw.external_input = true;
    b.step_ms(1);
    assert!(!b.hw.relay);
    assert!(b.sink.contains(&AppEvent::OutputToggled(false)));
}

#[test]
fn relay_flips_between_ticks_too() {
    // The edge is acted on the pass it is accepted, even with no tick
    // pending on that pass.
    let mut b = Bench::into_power_on(bench_config());
    b.step_ms(30);

    b.hw.external_input = true;
    b.pass();
    assert!(b.hw.relay, "press takes effect without waiting for the tick");
}

#[test]
fn input_chatter_yields_one_toggle_per_press() {
    let mut b = Bench::into_power_on(bench_config());
    b.step_ms(30);
    let before = b.hw.relay_transitions.len();

    // Contact bounce: 10 ms of alternating levels, then a solid press.
    for i in 0..10 {
        b.hw.external_input = i % 2 == 0;
        b.step_ms(1);
    }
    b.hw.external_input = true;
    b.step_ms(30);

    assert_eq!(
        b.hw.relay_transitions.len() - before,
        1,
        "bounce collapses to a single relay transition"
    );
    assert!(b.hw.relay);

    // Bouncy release: no relay change at all.
    for i in 0..10 {
        b.hw.external_input = i % 2 == 1;
        b.step_ms(1);
    }
    b.hw.external_input = false;
    b.step_ms(30);

    assert_eq!(b.hw.relay_transitions.len() - before, 1);
    assert!(b.hw.relay);
}

// ── Inactivity timeout ────────────────────────────────────────

#[test]
fn full_session_times_out_through_warning() {
    let mut b = Bench::into_power_on(bench_config());

    // Countdown runs to the warning band: 5000 -> 999 is 4001 ticks.
    b.step_ms(4_001);
    assert_eq!(b.controller.state(), StateId::Warning);
    assert_eq!(b.controller.activity_remaining_ms(), 999);

    // And on to zero.
    b.step_ms(999);
    assert_eq!(b.controller.state(), StateId::Off);
    assert_eq!(b.controller.activity_remaining_ms(), 0);
    assert!(!b.hw.power_enable);
    assert!(!b.hw.relay);
    assert!(b.hw.all_off_calls >= 1);
    assert!(b
        .sink
        .contains(&AppEvent::PoweredOff(PowerOffReason::TimeoutExpired)));
}

#[test]
fn shipping_config_times_out_at_exactly_ten_minutes() {
    // Full-scale run with the real config: 1 s confirm hold, then 600 000
    // quiet ticks to cutoff, not one early.
    let mut b = Bench::into_power_on(ControllerConfig::hold_to_confirm());

    b.step_ms(599_999);
    assert_ne!(b.controller.state(), StateId::Off);
    assert_eq!(b.controller.activity_remaining_ms(), 1);

    b.step_ms(1);
    assert_eq!(b.controller.state(), StateId::Off);
    assert!(!b.hw.power_enable);
}

#[test]
fn edge_at_one_millisecond_remaining_still_rescues() {
    let mut b = Bench::into_power_on(bench_config());
    b.step_ms(4_999);
    assert_eq!(b.controller.activity_remaining_ms(), 1);
    assert_eq!(b.controller.state(), StateId::Warning);

    b.hw.external_input = true;
    b.step_ms(1);
    assert_eq!(b.controller.state(), StateId::PowerOn);
    assert_eq!(b.controller.activity_remaining_ms(), 5_000);
}

#[test]
fn warning_entry_is_strictly_below_threshold() {
    let mut b = Bench::into_power_on(bench_config());

    b.step_ms(4_000);
    assert_eq!(b.controller.activity_remaining_ms(), 1_000);
    assert_eq!(
        b.controller.state(),
        StateId::PowerOn,
        "exactly at the threshold is not yet warning"
    );

    b.step_ms(1);
    assert_eq!(b.controller.state(), StateId::Warning);
}

#[test]
fn input_during_warning_rescues_the_session() {
    let mut b = Bench::into_power_on(bench_config());
    b.step_ms(4_500);
    assert_eq!(b.controller.state(), StateId::Warning);

    b.hw.external_input = true;
    b.step_ms(1);

    assert_eq!(b.controller.state(), StateId::PowerOn);
    assert_eq!(
        b.controller.activity_remaining_ms(),
        5_000,
        "re-entry reloads the full countdown"
    );
    assert!(b.hw.relay, "the rescuing press still toggles the output");
}

// ── Power switch release ──────────────────────────────────────

#[test]
fn release_after_grace_powers_off() {
    let mut b = Bench::into_power_on(bench_config());
    b.step_ms(300); // well past the 200 ms grace

    b.hw.power_switch = false;
    b.step_ms(1);

    assert_eq!(b.controller.state(), StateId::Off);
    assert!(b
        .sink
        .contains(&AppEvent::PoweredOff(PowerOffReason::SwitchReleased)));
}

#[test]
fn release_blip_inside_grace_is_absorbed() {
    let mut b = Bench::into_power_on(bench_config());
    b.step_ms(50);

    // Engage bounce: the switch floats open for 10 ms right after the
    // latch closes, then settles held.
    b.hw.power_switch = false;
    b.step_ms(10);
    assert_eq!(b.controller.state(), StateId::PowerOn);

    b.hw.power_switch = true;
    b.step_ms(400);
    assert_eq!(
        b.controller.state(),
        StateId::PowerOn,
        "still latched long after the grace window"
    );
}

#[test]
fn release_during_warning_powers_off() {
    let mut b = Bench::into_power_on(bench_config());
    b.step_ms(4_100);
    assert_eq!(b.controller.state(), StateId::Warning);

    b.hw.power_switch = false;
    b.step_ms(1);
    assert_eq!(b.controller.state(), StateId::Off);
}

// ── Terminal state ────────────────────────────────────────────

#[test]
fn off_is_terminal_and_deasserts_once() {
    let mut b = Bench::into_power_on(bench_config());
    b.step_ms(5_001);
    assert_eq!(b.controller.state(), StateId::Off);
    let offs = b.hw.all_off_calls;

    // Nothing revives the session, and the outputs are not re-written.
    b.hw.power_switch = true;
    b.hw.external_input = true;
    b.step_ms(500);
    assert_eq!(b.controller.state(), StateId::Off);
    assert_eq!(b.hw.all_off_calls, offs, "outputs deasserted exactly once");
    assert!(b.controller.is_off());
}
