//! Gateway trigger library.
//!
//! Decides when an ESP32 gateway enters its configuration mode: either a
//! level pin tied HIGH at boot, or the BOOT button held for a sustained
//! long press.  Exposes the pure-logic modules for integration testing.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod latch;
pub mod pins;

pub use error::{Error, Result};
