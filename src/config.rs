//! Trigger configuration parameters
//!
//! All tunable parameters for config-mode trigger detection.  Defaults match
//! the shipped gateway wiring; a build-time JSON override can replace any
//! subset of fields (missing fields keep their defaults).

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pins;

/// Name of the compile-time environment variable holding a JSON override.
pub const CONFIG_ENV: &str = "GATEWAY_TRIGGER_CONFIG";

/// Trigger detection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    // --- Pins ---
    /// Immediate-trigger input (pull-down, HIGH = activate at boot)
    pub immediate_gpio: i32,
    /// Long-press button input (pull-up, LOW = pressed)
    pub button_gpio: i32,
    /// Active-low mode indicator LED
    pub mode_led_gpio: i32,

    // --- Long press ---
    /// Continuous hold required to confirm (milliseconds)
    pub long_press_ms: u32,
    /// Sample interval while the button is held (milliseconds)
    pub hold_sample_ms: u32,
    /// Poll interval while waiting for release after confirmation (milliseconds)
    pub release_poll_ms: u32,

    // --- Debounce ---
    /// Settle window for single re-sample debounce (milliseconds)
    pub debounce_settle_ms: u32,

    // --- Main loop ---
    /// Idle polling interval of the main loop (milliseconds)
    pub idle_poll_ms: u32,
    /// Status line interval (milliseconds)
    pub status_interval_ms: u32,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            // Pins
            immediate_gpio: pins::IMMEDIATE_TRIGGER_GPIO,
            button_gpio: pins::BOOT_BUTTON_GPIO,
            mode_led_gpio: pins::MODE_LED_GPIO,

            // Long press
            long_press_ms: 5000,
            hold_sample_ms: 50,
            release_poll_ms: 10,

            // Debounce
            debounce_settle_ms: 50,

            // Main loop
            idle_poll_ms: 100,
            status_interval_ms: 30_000,
        }
    }
}

impl TriggerConfig {
    /// Reject configurations the trigger core cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, gpio) in [
            ("immediate_gpio", self.immediate_gpio),
            ("button_gpio", self.button_gpio),
            ("mode_led_gpio", self.mode_led_gpio),
        ] {
            if !pins::is_valid_gpio(gpio) {
                return Err(ConfigError::InvalidGpio { field, gpio });
            }
        }
        if self.immediate_gpio == self.button_gpio {
            return Err(ConfigError::InvalidGpio {
                field: "button_gpio",
                gpio: self.button_gpio,
            });
        }
        // The LED is an output: it needs its own pad, and 34-39 are input-only.
        if self.mode_led_gpio == self.immediate_gpio
            || self.mode_led_gpio == self.button_gpio
            || !pins::has_internal_pulls(self.mode_led_gpio)
        {
            return Err(ConfigError::InvalidGpio {
                field: "mode_led_gpio",
                gpio: self.mode_led_gpio,
            });
        }

        if self.long_press_ms == 0 {
            return Err(ConfigError::InvalidTiming("long_press_ms must be > 0"));
        }
        if self.hold_sample_ms == 0 || self.hold_sample_ms >= self.long_press_ms {
            return Err(ConfigError::InvalidTiming(
                "hold_sample_ms must be > 0 and shorter than long_press_ms",
            ));
        }
        if self.release_poll_ms == 0 || self.debounce_settle_ms == 0 || self.idle_poll_ms == 0 {
            return Err(ConfigError::InvalidTiming("poll and settle intervals must be > 0"));
        }
        if self.status_interval_ms < self.idle_poll_ms {
            return Err(ConfigError::InvalidTiming(
                "status_interval_ms must not be shorter than idle_poll_ms",
            ));
        }
        Ok(())
    }

    /// Replace out-of-range pin numbers with the board defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !pins::is_valid_gpio(self.immediate_gpio) {
            warn!(
                "Invalid immediate trigger GPIO {}, using default GPIO {}",
                self.immediate_gpio, defaults.immediate_gpio
            );
            self.immediate_gpio = defaults.immediate_gpio;
        }
        if !pins::is_valid_gpio(self.button_gpio) {
            warn!(
                "Invalid button GPIO {}, using default GPIO {}",
                self.button_gpio, defaults.button_gpio
            );
            self.button_gpio = defaults.button_gpio;
        }
        if !pins::is_valid_gpio(self.mode_led_gpio) {
            warn!(
                "Invalid mode LED GPIO {}, using default GPIO {}",
                self.mode_led_gpio, defaults.mode_led_gpio
            );
            self.mode_led_gpio = defaults.mode_led_gpio;
        }
        self
    }

    /// Parse a JSON override.  Pin numbers are sanitised before validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        let cfg = cfg.sanitized();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build-time override if one was compiled in, defaults otherwise.
    pub fn load() -> Self {
        Self::from_override(option_env!("GATEWAY_TRIGGER_CONFIG"))
    }

    fn from_override(json: Option<&str>) -> Self {
        match json {
            None => Self::default(),
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                warn!("{} override rejected ({}), using defaults", CONFIG_ENV, e);
                Self::default()
            }),
        }
    }
}
