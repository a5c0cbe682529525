//! Unified error types for the trigger firmware.
//!
//! The trigger core itself has no failure modes (spurious interrupts and
//! early releases are ordinary outcomes).  Errors only arise while wiring
//! the core to hardware and while loading configuration, and all of them
//! funnel into [`Error`].  Variants are `Copy` so they can be logged and
//! passed around without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An ESP-IDF GPIO call returned a non-`ESP_OK` code.
    Gpio { gpio: i32, code: i32 },
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be parsed.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio { gpio, code } => write!(f, "gpio {gpio}: esp error {code}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A GPIO field names a pad that does not exist.
    InvalidGpio { field: &'static str, gpio: i32 },
    /// A timing field is zero or inconsistent with another field.
    InvalidTiming(&'static str),
    /// The override document is not valid JSON for [`TriggerConfig`].
    ///
    /// [`TriggerConfig`]: crate::config::TriggerConfig
    Parse,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGpio { field, gpio } => write!(f, "{field}: GPIO {gpio} out of range"),
            Self::InvalidTiming(msg) => write!(f, "timing: {msg}"),
            Self::Parse => write!(f, "override is not valid trigger config JSON"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
