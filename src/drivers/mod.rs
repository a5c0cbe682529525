//! Trigger detectors, the mode LED, and one-shot GPIO setup.

pub mod button;
pub mod debounce;
pub mod hw_init;
pub mod mode_led;
