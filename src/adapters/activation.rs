//! Mode activation adapter.
//!
//! Implements [`ModeActivator`]: lights the mode indicator and hands off to
//! whatever starts the configuration web server.  The hand-off is opaque to
//! the trigger subsystem; `main` supplies it as a closure.

use log::info;

use crate::app::events::TriggerSource;
use crate::app::ports::{ModeActivator, ModeIndicator};

pub struct ModeActivation<I, F>
where
    I: ModeIndicator,
    F: FnMut(TriggerSource),
{
    indicator: I,
    hand_off: F,
}

impl<I, F> ModeActivation<I, F>
where
    I: ModeIndicator,
    F: FnMut(TriggerSource),
{
    pub fn new(indicator: I, hand_off: F) -> Self {
        Self { indicator, hand_off }
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }
}

impl<I, F> ModeActivator for ModeActivation<I, F>
where
    I: ModeIndicator,
    F: FnMut(TriggerSource),
{
    fn activate(&mut self, source: TriggerSource) {
        info!("Starting configuration web server ({:?})", source);
        (self.hand_off)(source);
        self.indicator.set_mode_active(true);
    }
}
