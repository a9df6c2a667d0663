//! LatchBox Firmware — Main Entry Point
//!
//! Hexagonal architecture with a polled 1 kHz control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter      LogEventSink        HwTick         │
//! │  (Switch+Output)      (EventSink)         (TickPort)     │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ─────────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │            Controller (pure logic)             │      │
//! │  │  Debounce · Toggle · Latch FSM · LED patterns  │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use latchbox::adapters::hardware::HardwareAdapter;
use latchbox::adapters::log_sink::LogEventSink;
use latchbox::adapters::tick::HwTick;
use latchbox::app::service::Controller;
use latchbox::config::ControllerConfig;
use latchbox::drivers::hw_init::{SysInputPin, SysOutputPin};
use latchbox::{drivers, pins};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("LatchBox v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Hardware bring-up ──────────────────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // GPIO init failure is critical; outputs may float.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let mut hw = HardwareAdapter::new(
        SysInputPin::new(pins::POWER_SWITCH_GPIO),
        SysInputPin::new(pins::EXTERNAL_INPUT_GPIO),
        SysOutputPin::new(pins::POWER_ENABLE_GPIO),
        SysOutputPin::new(pins::RELAY_GPIO),
        SysOutputPin::new(pins::POWER_LED_GPIO),
        SysOutputPin::new(pins::OUTPUT_LED_GPIO),
    );

    drivers::hw_timer::start_tick_timer();

    // ── 3. Control core ───────────────────────────────────────
    let config = ControllerConfig::default();
    info!(
        "Config: debounce={}ms timeout={}ms warning={}ms hold={}",
        config.debounce_ms,
        config.auto_off_timeout_ms,
        config.warning_threshold_ms,
        if config.confirm_hold {
            "confirm"
        } else {
            "immediate"
        }
    );

    let mut sink = LogEventSink::new();
    let mut tick = HwTick::new();
    let mut controller = Controller::new(config);
    controller.start(&mut hw, &mut sink);

    info!("System ready. Entering control loop.");

    // ── 4. Control loop ───────────────────────────────────────
    loop {
        // Simulate the 1 kHz timer via sleep on non-espidf targets.
        #[cfg(not(target_os = "espidf"))]
        {
            std::thread::sleep(std::time::Duration::from_millis(1));
            latchbox::tick::timer_tick();
        }

        controller.poll(&mut hw, &mut tick, &mut sink);

        // Yield to the idle task between passes; the pending-tick flag
        // coalesces anything we miss.
        #[cfg(target_os = "espidf")]
        esp_idf_hal::delay::FreeRtos::delay_ms(1);

        if controller.is_off() {
            // Terminal state: outputs are latched low and the power rail
            // is released. Nothing left to do but wait for the supply to
            // actually collapse.
            std::thread::sleep(std::time::Duration::from_millis(100));
        }
    }
}
