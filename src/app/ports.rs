//! Port traits: the hexagonal boundary between trigger logic and hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ModeController / LongPressDetector (domain)
//! ```
//!
//! Driven adapters (GPIO lines, the clock, the activation hook, event sinks)
//! implement these traits.  The domain consumes them via generics, so the
//! trigger core never touches hardware directly and runs unchanged against
//! the mocks in `tests/integration/mock_hw.rs`.

use embedded_hal::delay::DelayNs;

use crate::error::Result;
use crate::latch::InterruptLatch;

use super::events::{TriggerEvent, TriggerSource};

// ───────────────────────────────────────────────────────────────
// Digital levels
// ───────────────────────────────────────────────────────────────

/// Logic level of a digital input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

/// Pull resistor configured on an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    /// Line idles HIGH; an active signal pulls it LOW.
    Up,
    /// Line idles LOW; an active signal drives it HIGH.
    Down,
}

impl Pull {
    /// Level the line reads while its signal is asserted.
    pub fn active_level(self) -> Level {
        match self {
            Self::Up => Level::Low,
            Self::Down => Level::High,
        }
    }
}

/// Interrupt trigger edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// HIGH → LOW.
    Falling,
    /// LOW → HIGH.
    Rising,
}

// ───────────────────────────────────────────────────────────────
// Input line port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// A configured digital input.
///
/// Reads are assumed to succeed; a failing GPIO block is a board fault
/// below this layer.
pub trait InputLine {
    /// Sample the current level.  No side effects.
    fn read(&mut self) -> Level;

    /// Pull resistor this line was configured with.
    fn pull(&self) -> Pull;

    /// True while the line's signal is asserted (LOW for pull-up lines,
    /// HIGH for pull-down lines).
    fn is_asserted(&mut self) -> bool {
        self.read() == self.pull().active_level()
    }
}

/// Interrupt-capable input.
///
/// The only capability handed to interrupt context is the latch: the
/// handler installed by the adapter calls [`InterruptLatch::set`] and
/// nothing else.
pub trait EdgeInterrupt {
    fn register_edge_handler(&mut self, edge: Edge, latch: &'static InterruptLatch) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock plus blocking delay.
///
/// `now_ms` never goes backwards and never resets while the firmware runs.
/// Delays come from [`DelayNs`] so target and host adapters can reuse
/// existing `embedded-hal` delay providers.
pub trait Clock: DelayNs {
    fn now_ms(&self) -> u64;

    /// Milliseconds since `start_ms`, saturated to `u32`.
    fn elapsed_ms(&self, start_ms: u64) -> u32 {
        self.now_ms().saturating_sub(start_ms).min(u32::MAX as u64) as u32
    }
}

// ───────────────────────────────────────────────────────────────
// Mode activation port (driven adapter: domain → outside world)
// ───────────────────────────────────────────────────────────────

/// The opaque "enter configuration / web-server mode" action.
///
/// The domain guarantees this is called at most once per process.
pub trait ModeActivator {
    fn activate(&mut self, source: TriggerSource);
}

/// Visual indication of the current mode (status LED).
pub trait ModeIndicator {
    fn set_mode_active(&mut self, active: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`TriggerEvent`]s through this port.
/// Adapters decide where they go (serial log, test recorder, ...).
pub trait EventSink {
    fn emit(&mut self, event: &TriggerEvent);
}
