//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing trigger events to the logger (UART /
//! USB-CDC in production).  These lines are the operator's only feedback
//! while holding the BOOT button.

use log::{info, warn};

use crate::app::events::{TriggerEvent, TriggerSource};
use crate::app::ports::EventSink;

/// Milliseconds as seconds to one decimal place, e.g. `2300` -> `"2.3s"`.
pub fn seconds(ms: u32) -> String {
    format!("{:.1}s", f64::from(ms) / 1000.0)
}

/// Adapter that logs every [`TriggerEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &TriggerEvent) {
        match event {
            TriggerEvent::Armed {
                immediate_gpio,
                button_gpio,
                long_press_ms,
            } => {
                info!(
                    "TRIGGER | armed | hold GPIO {} (BOOT) for {}, or tie GPIO {} to 3.3V at boot",
                    button_gpio,
                    seconds(*long_press_ms),
                    immediate_gpio
                );
            }
            TriggerEvent::ImmediateTrigger { gpio } => {
                info!("TRIGGER | GPIO {} HIGH at startup, starting immediately", gpio);
            }
            TriggerEvent::InterruptReceived => {
                info!("TRIGGER | button press detected, checking for long press");
            }
            TriggerEvent::HoldStarted { required_ms } => {
                info!(
                    "TRIGGER | button pressed, hold for {} to start the web server",
                    seconds(*required_ms)
                );
            }
            TriggerEvent::HoldProgress { remaining_secs } => {
                info!("TRIGGER | hold for {} more seconds", remaining_secs);
            }
            TriggerEvent::HoldConfirmed { held_ms } => {
                info!("TRIGGER | long press confirmed after {}", seconds(*held_ms));
            }
            TriggerEvent::HoldCancelled { held_ms } => {
                info!(
                    "TRIGGER | button released after {}, trigger cancelled",
                    seconds(*held_ms)
                );
            }
            TriggerEvent::SpuriousInterrupt => {
                warn!("TRIGGER | interrupt without a held button, ignored");
            }
            TriggerEvent::ModeActivated(source) => {
                let via = match source {
                    TriggerSource::ImmediateLevelPin => "immediate pin",
                    TriggerSource::LongPressButton => "long press",
                };
                info!("MODE | configuration mode active (via {})", via);
            }
            TriggerEvent::Status(s) => {
                info!(
                    "STATUS | uptime={}s | web={} | triggers: GPIO {} / GPIO {}",
                    s.uptime_secs,
                    if s.mode_active { "RUNNING" } else { "STOPPED" },
                    s.immediate_gpio,
                    s.button_gpio,
                );
            }
        }
    }
}
