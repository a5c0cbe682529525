//! Single re-sample debouncer.
//!
//! Read, wait out the settle window, read again: the level is accepted only
//! if both samples agree.  Rejects contact bounce and short glitches on a
//! quick press.  The long-press path does not use this; its continuous-hold
//! requirement already filters bounce.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{InputLine, Level};
use crate::config::TriggerConfig;

#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    settle_ms: u32,
}

impl Debouncer {
    pub fn new(settle_ms: u32) -> Self {
        Self { settle_ms }
    }

    pub fn from_config(config: &TriggerConfig) -> Self {
        Self::new(config.debounce_settle_ms)
    }

    pub fn settle_ms(&self) -> u32 {
        self.settle_ms
    }

    /// True if `pin` reads `expected` now and still reads it after the
    /// settle window.  Blocks the caller for the window on a first match.
    pub fn confirm_level<P, D>(&self, pin: &mut P, delay: &mut D, expected: Level) -> bool
    where
        P: InputLine,
        D: DelayNs,
    {
        if pin.read() != expected {
            return false;
        }
        delay.delay_ms(self.settle_ms);
        pin.read() == expected
    }

    /// Debounced "is the line asserted" for the line's own pull polarity.
    pub fn confirm_asserted<P, D>(&self, pin: &mut P, delay: &mut D) -> bool
    where
        P: InputLine,
        D: DelayNs,
    {
        let active = pin.pull().active_level();
        self.confirm_level(pin, delay, active)
    }
}
