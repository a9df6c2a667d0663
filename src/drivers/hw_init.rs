//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions and pull-ups using raw ESP-IDF sys calls,
//! drives every output low, and disables the task watchdog (the control
//! loop never blocks, so the watchdog adds nothing but a reset hazard on
//! long debug halts). Called once from `main()` before the control loop
//! starts.
//!
//! Also provides [`SysInputPin`]/[`SysOutputPin`], thin `embedded-hal`
//! wrappers over `gpio_get_level`/`gpio_set_level` so the generic
//! [`HardwareAdapter`](crate::adapters::hardware::HardwareAdapter) can run
//! on the real pins.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    WatchdogDeinitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::WatchdogDeinitFailed(rc) => write!(f, "task watchdog deinit failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        disable_task_watchdog()?;
    }
    info!("hw_init: GPIO configured, watchdog disabled");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // Both switches close to ground; internal pull-ups hold the idle level.
    let input_pins = [pins::POWER_SWITCH_GPIO, pins::EXTERNAL_INPUT_GPIO];

    for &pin in &input_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::POWER_ENABLE_GPIO,
        pins::RELAY_GPIO,
        pins::POWER_LED_GPIO,
        pins::OUTPUT_LED_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        // Everything stays de-energised until the latch FSM asks otherwise.
        unsafe { gpio_set_level(pin, 0) };
    }
    Ok(())
}

// ── Task watchdog ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn disable_task_watchdog() -> Result<(), HwInitError> {
    let ret = unsafe { esp_task_wdt_deinit() };
    // ESP_ERR_INVALID_STATE means the watchdog was never initialised,
    // which is the state we want anyway.
    if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
        return Err(HwInitError::WatchdogDeinitFailed(ret));
    }
    Ok(())
}

// ── embedded-hal pin wrappers ─────────────────────────────────

/// Input pin backed by a raw GPIO number.
///
/// On the device this reads the live register; on simulation targets the
/// pin floats high (pulled up, switch open).
pub struct SysInputPin {
    pin: i32,
}

impl SysInputPin {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl ErrorType for SysInputPin {
    type Error = core::convert::Infallible;
}

impl InputPin for SysInputPin {
    #[cfg(target_os = "espidf")]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        // SAFETY: gpio_get_level is a read-only register access on a pin
        // configured during init_peripherals().
        Ok(unsafe { gpio_get_level(self.pin) } != 0)
    }

    #[cfg(not(target_os = "espidf"))]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let _ = self.pin;
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|h| !h)
    }
}

/// Output pin backed by a raw GPIO number.
pub struct SysOutputPin {
    pin: i32,
}

impl SysOutputPin {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl ErrorType for SysOutputPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for SysOutputPin {
    #[cfg(target_os = "espidf")]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        // SAFETY: gpio_set_level writes to an already-configured output pin.
        unsafe { gpio_set_level(self.pin, 1) };
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        // SAFETY: see set_high.
        unsafe { gpio_set_level(self.pin, 0) };
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        log::debug!("gpio{}(sim) -> high", self.pin);
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        log::debug!("gpio{}(sim) -> low", self.pin);
        Ok(())
    }
}
