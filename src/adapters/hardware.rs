//! Hardware adapter: port implementations over `embedded-hal` digital pins.
//!
//! Generic over the concrete pin types, so the same adapter drives real
//! ESP-IDF `PinDriver`s on the device and plain mock pins in host tests.
//! Both switches are wired active-low (switch to ground, internal pull-up),
//! so the adapter inverts on read; the ports speak in asserted/deasserted.
//!
//! The port traits are infallible by design — a failed GPIO access here has
//! no meaningful recovery in a controller whose only job is to hold pins at
//! levels, so reads fall back to "deasserted" and write errors are dropped.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{OutputPort, SwitchPort};

/// Owns the six pins and maps them onto the port traits.
pub struct HardwareAdapter<PS, EI, PE, RL, PL, OL> {
    power_switch: PS,
    external_input: EI,
    power_enable: PE,
    relay: RL,
    power_led: PL,
    output_led: OL,
}

impl<PS, EI, PE, RL, PL, OL> HardwareAdapter<PS, EI, PE, RL, PL, OL>
where
    PS: InputPin,
    EI: InputPin,
    PE: OutputPin,
    RL: OutputPin,
    PL: OutputPin,
    OL: OutputPin,
{
    pub fn new(
        power_switch: PS,
        external_input: EI,
        power_enable: PE,
        relay: RL,
        power_led: PL,
        output_led: OL,
    ) -> Self {
        Self {
            power_switch,
            external_input,
            power_enable,
            relay,
            power_led,
            output_led,
        }
    }
}

impl<PS, EI, PE, RL, PL, OL> SwitchPort for HardwareAdapter<PS, EI, PE, RL, PL, OL>
where
    PS: InputPin,
    EI: InputPin,
    PE: OutputPin,
    RL: OutputPin,
    PL: OutputPin,
    OL: OutputPin,
{
    fn power_switch(&mut self) -> bool {
        // Active low: closed switch pulls the pin to ground.
        self.power_switch.is_low().unwrap_or(false)
    }

    fn external_input(&mut self) -> bool {
        self.external_input.is_low().unwrap_or(false)
    }
}

impl<PS, EI, PE, RL, PL, OL> OutputPort for HardwareAdapter<PS, EI, PE, RL, PL, OL>
where
    PS: InputPin,
    EI: InputPin,
    PE: OutputPin,
    RL: OutputPin,
    PL: OutputPin,
    OL: OutputPin,
{
    fn set_power_enable(&mut self, on: bool) {
        set_level(&mut self.power_enable, on);
    }

    fn set_relay(&mut self, on: bool) {
        set_level(&mut self.relay, on);
    }

    fn set_power_led(&mut self, on: bool) {
        set_level(&mut self.power_led, on);
    }

    fn set_output_led(&mut self, on: bool) {
        set_level(&mut self.output_led, on);
    }

    fn all_off(&mut self) {
        set_level(&mut self.power_enable, false);
        set_level(&mut self.relay, false);
        set_level(&mut self.power_led, false);
        set_level(&mut self.output_led, false);
    }
}

fn set_level(pin: &mut impl OutputPin, on: bool) {
    let result = if on { pin.set_high() } else { pin.set_low() };
    result.ok();
}
