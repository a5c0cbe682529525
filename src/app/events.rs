//! Outbound trigger events.
//!
//! The trigger core emits these through the
//! [`EventSink`](super::ports::EventSink) port.  They are the observable
//! contract of the subsystem; the rendered text is not.

/// Which physical path requested the mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    /// Immediate-trigger pin read HIGH at boot.
    ImmediateLevelPin,
    /// BOOT button held for the full long-press duration.
    LongPressButton,
}

/// Structured events emitted by the trigger core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Boot banner: both trigger paths are armed.
    Armed {
        immediate_gpio: i32,
        button_gpio: i32,
        long_press_ms: u32,
    },

    /// Immediate-trigger pin was HIGH at startup.
    ImmediateTrigger { gpio: i32 },

    /// The polling loop consumed a pending button interrupt.
    InterruptReceived,

    /// Button is down; hold confirmation has started.
    HoldStarted { required_ms: u32 },

    /// Once-per-second hold feedback.
    HoldProgress { remaining_secs: u32 },

    /// Hold reached the required duration.
    HoldConfirmed { held_ms: u32 },

    /// Button released before the required duration.
    HoldCancelled { held_ms: u32 },

    /// Interrupt fired but the button was already up on re-check.
    SpuriousInterrupt,

    /// Configuration / web-server mode has been entered.
    ModeActivated(TriggerSource),

    /// Periodic status line.
    Status(StatusData),
}

/// Point-in-time status snapshot for the periodic status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusData {
    pub mode_active: bool,
    pub uptime_secs: u64,
    pub immediate_gpio: i32,
    pub button_gpio: i32,
}
