//! Configuration-mode status LED.
//!
//! Discrete LED wired active-low (sink to GPIO): LOW = on, HIGH = off.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO via hw_init.
//! On host/test: writes the simulated level table.

use crate::app::ports::ModeIndicator;
use crate::drivers::hw_init::{self, HwInitError};

pub struct ModeLed {
    gpio: i32,
    on: bool,
}

impl ModeLed {
    /// Configure the pin and start with the LED off.
    pub fn new(gpio: i32) -> Result<Self, HwInitError> {
        hw_init::configure_output(gpio, true)?;
        Ok(Self { gpio, on: false })
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl ModeIndicator for ModeLed {
    fn set_mode_active(&mut self, active: bool) {
        if active == self.on {
            return;
        }
        hw_init::gpio_write(self.gpio, !active);
        self.on = active;
    }
}
