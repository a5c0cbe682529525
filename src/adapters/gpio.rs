//! GPIO input adapter.
//!
//! Implements [`InputLine`] and [`EdgeInterrupt`] on top of the raw
//! `hw_init` pin helpers.  Construction configures the pad, so an existing
//! `GpioInput` is always a configured input.

use crate::app::ports::{Edge, EdgeInterrupt, InputLine, Level, Pull};
use crate::drivers::hw_init;
use crate::error::Result;
use crate::latch::InterruptLatch;

pub struct GpioInput {
    gpio: i32,
    pull: Pull,
}

impl GpioInput {
    pub fn new(gpio: i32, pull: Pull) -> Result<Self> {
        hw_init::configure_input(gpio, pull)?;
        Ok(Self { gpio, pull })
    }
}

impl InputLine for GpioInput {
    fn read(&mut self) -> Level {
        Level::from(hw_init::gpio_read(self.gpio))
    }

    fn pull(&self) -> Pull {
        self.pull
    }
}

impl EdgeInterrupt for GpioInput {
    fn register_edge_handler(&mut self, edge: Edge, latch: &'static InterruptLatch) -> Result<()> {
        hw_init::add_edge_handler(self.gpio, edge, latch)?;
        Ok(())
    }
}
