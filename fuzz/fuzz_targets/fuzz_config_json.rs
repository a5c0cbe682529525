//! Fuzz target: `TriggerConfig::from_json`
//!
//! Feeds arbitrary bytes to the override parser and verifies:
//! - No panics on malformed UTF-8 or JSON
//! - Any accepted config passes `validate()` and has in-range pins
//! - The mode LED never shares a trigger pin or sits on an input-only pad
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use gateway_trigger::config::TriggerConfig;
use gateway_trigger::pins::{has_internal_pulls, is_valid_gpio};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(cfg) = TriggerConfig::from_json(text) {
        assert!(cfg.validate().is_ok());
        assert!(is_valid_gpio(cfg.immediate_gpio));
        assert!(is_valid_gpio(cfg.button_gpio));
        assert!(is_valid_gpio(cfg.mode_led_gpio));
        assert_ne!(cfg.immediate_gpio, cfg.button_gpio);
        assert!(has_internal_pulls(cfg.mode_led_gpio), "LED on an output-capable pad");
        assert_ne!(cfg.mode_led_gpio, cfg.immediate_gpio);
        assert_ne!(cfg.mode_led_gpio, cfg.button_gpio);
    }
});
