//! Shared state between the button ISR and the main polling loop.
//!
//! ```text
//! ┌─────────────┐  set()   ┌────────────────┐  take()  ┌──────────────┐
//! │ Button ISR  │─────────▶│ InterruptLatch │─────────▶│  Main Loop   │
//! │ (any time)  │          │ (AtomicBool)   │          │  (consumer)  │
//! └─────────────┘          └────────────────┘          └──────┬───────┘
//!                                                             │ activate
//!                                                             ▼
//!                                                      ┌──────────────┐
//!                                                      │   ModeFlag   │
//!                                                      └──────────────┘
//! ```
//!
//! The latch is the only word the ISR ever touches.  It holds at most one
//! pending notification: presses that arrive before the loop consumes the
//! latch coalesce into one, which is harmless because the confirmation
//! routine re-samples the live button level anyway.

use core::sync::atomic::{AtomicBool, Ordering};

// ── Interrupt latch ───────────────────────────────────────────

/// Single-slot notification from interrupt context to the polling loop.
///
/// Lives in a `static` on target so the ISR can reach it through the
/// registration argument; tests may use a local instance.
#[derive(Debug)]
pub struct InterruptLatch {
    pending: AtomicBool,
}

impl InterruptLatch {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Mark a notification pending.
    /// Safe to call from ISR context (single lock-free store).
    pub fn set(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Consume the pending notification, if any.
    ///
    /// Read and clear happen in one atomic swap, so a set that races the
    /// consumer is either returned now or left pending for the next poll.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Peek without consuming.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

impl Default for InterruptLatch {
    fn default() -> Self {
        Self::new()
    }
}

// ── Mode flag ─────────────────────────────────────────────────

/// `higher_power_mode_active`.  Once raised it stays raised for the life of
/// the process.
///
/// Only [`ModeController`](crate::app::service::ModeController) raises it;
/// other tasks may observe it through a shared reference.
#[derive(Debug)]
pub struct ModeFlag {
    active: AtomicBool,
}

impl ModeFlag {
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Raise the flag.  Returns `true` if this call changed it.
    pub(crate) fn raise(&self) -> bool {
        !self.active.swap(true, Ordering::AcqRel)
    }
}

impl Default for ModeFlag {
    fn default() -> Self {
        Self::new()
    }
}
