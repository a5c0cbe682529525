//! GPIO pin assignments for the gateway main board.
//!
//! Single source of truth for the default wiring.  The trigger pins can be
//! overridden through [`TriggerConfig`](crate::config::TriggerConfig); the
//! values here are the fallbacks used when an override is out of range.

// ---------------------------------------------------------------------------
// Config-mode triggers
// ---------------------------------------------------------------------------

/// Immediate trigger: jumper / switch to 3.3 V.  HIGH = enter config mode.
///
/// Input-only on the ESP32 and has no internal pull resistors, so the board
/// carries an external pull-down.
pub const IMMEDIATE_TRIGGER_GPIO: i32 = 34;

/// BOOT push-button.  Active-low with pull-up; falling edge raises the
/// long-press interrupt.
pub const BOOT_BUTTON_GPIO: i32 = 0;

// ---------------------------------------------------------------------------
// Status LEDs (active-low: LOW = LED on)
// ---------------------------------------------------------------------------

/// Lit while the web-server / configuration mode is active.
pub const MODE_LED_GPIO: i32 = 25;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Highest GPIO number present on the ESP32.
pub const MAX_GPIO: i32 = 39;

/// True if `gpio` names a pad that exists on this chip.
pub const fn is_valid_gpio(gpio: i32) -> bool {
    gpio >= 0 && gpio <= MAX_GPIO
}

/// GPIOs 34-39 are input-only and lack internal pull resistors.
pub const fn has_internal_pulls(gpio: i32) -> bool {
    gpio < 34
}
