//! Mode controller: the hexagonal core of the trigger subsystem.
//!
//! [`ModeController`] owns the [`ModeFlag`], reads the [`InterruptLatch`]
//! and drives the [`LongPressDetector`].  All I/O flows through port traits
//! injected at call sites, so the whole controller runs against mocks.
//!
//! ```text
//!  InputLine (immediate) ──▶ ┌──────────────────────┐ ──▶ ModeActivator
//!  InputLine (button)    ──▶ │    ModeController    │ ──▶ EventSink
//!  InterruptLatch        ──▶ │  ModeFlag · Detector │
//!  Clock                 ──▶ └──────────────────────┘
//! ```
//!
//! Boot runs the immediate-pin fast path once.  After that every `poll`
//! checks, in order: mode already active, latch pending, button episode.

use log::{debug, info};

use crate::config::TriggerConfig;
use crate::drivers::button::{LongPressDetector, PressOutcome};
use crate::latch::{InterruptLatch, ModeFlag};

use super::events::{StatusData, TriggerEvent, TriggerSource};
use super::ports::{Clock, EventSink, InputLine, ModeActivator};

/// What a single [`ModeController::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// No interrupt pending.
    Idle,
    /// Mode already active; the latch was not examined.
    AlreadyActive,
    /// Interrupt consumed, but the button was up on re-check.
    Spurious,
    /// Interrupt consumed, press released early.
    Cancelled { held_ms: u32 },
    /// Interrupt consumed, press confirmed, mode activated.
    Activated,
}

// ───────────────────────────────────────────────────────────────
// ModeController
// ───────────────────────────────────────────────────────────────

pub struct ModeController<'a> {
    config: TriggerConfig,
    latch: &'a InterruptLatch,
    mode: ModeFlag,
    detector: LongPressDetector,
    last_status_ms: u64,
}

impl<'a> ModeController<'a> {
    pub fn new(config: TriggerConfig, latch: &'a InterruptLatch) -> Self {
        let detector = LongPressDetector::from_config(&config);
        Self {
            config,
            latch,
            mode: ModeFlag::new(),
            detector,
            last_status_ms: 0,
        }
    }

    /// Shared view of the mode flag for other tasks.
    pub fn mode_flag(&self) -> &ModeFlag {
        &self.mode
    }

    pub fn is_active(&self) -> bool {
        self.mode.is_active()
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the trigger paths and run the immediate-pin fast path.
    ///
    /// Returns `true` if the mode was activated here.
    pub fn boot<P, A, S>(&mut self, immediate: &mut P, activator: &mut A, sink: &mut S) -> bool
    where
        P: InputLine,
        A: ModeActivator,
        S: EventSink,
    {
        sink.emit(&TriggerEvent::Armed {
            immediate_gpio: self.config.immediate_gpio,
            button_gpio: self.config.button_gpio,
            long_press_ms: self.config.long_press_ms,
        });

        if !immediate.is_asserted() {
            debug!("boot: immediate trigger GPIO {} idle", self.config.immediate_gpio);
            return false;
        }

        sink.emit(&TriggerEvent::ImmediateTrigger {
            gpio: self.config.immediate_gpio,
        });
        self.activate(TriggerSource::ImmediateLevelPin, activator, sink)
    }

    /// Enter the higher-power mode.  No-op if it is already active.
    ///
    /// The external action runs first; the flag is raised once it returns.
    pub fn activate<A, S>(&mut self, source: TriggerSource, activator: &mut A, sink: &mut S) -> bool
    where
        A: ModeActivator,
        S: EventSink,
    {
        if self.mode.is_active() {
            debug!("activate({:?}) ignored: mode already active", source);
            return false;
        }

        info!("Entering configuration mode ({:?})", source);
        activator.activate(source);
        self.mode.raise();
        sink.emit(&TriggerEvent::ModeActivated(source));
        true
    }

    // ── Polling ───────────────────────────────────────────────

    /// One main-loop iteration: consume a pending interrupt and, if the
    /// button is down, run a long-press episode to completion.
    pub fn poll<B, C, A, S>(
        &mut self,
        button: &mut B,
        clock: &mut C,
        activator: &mut A,
        sink: &mut S,
    ) -> PollOutcome
    where
        B: InputLine,
        C: Clock,
        A: ModeActivator,
        S: EventSink,
    {
        let outcome = self.handle_trigger(button, clock, activator, sink);
        self.report_status(clock, sink);
        outcome
    }

    /// Poll forever, sleeping `idle_poll_ms` between iterations.
    pub fn run<B, C, A, S>(&mut self, button: &mut B, clock: &mut C, activator: &mut A, sink: &mut S) -> !
    where
        B: InputLine,
        C: Clock,
        A: ModeActivator,
        S: EventSink,
    {
        info!(
            "Trigger loop running (poll {}ms), hold BOOT for {}s to enter config mode",
            self.config.idle_poll_ms,
            self.config.long_press_ms / 1000
        );
        loop {
            self.poll(button, clock, activator, sink);
            clock.delay_ms(self.config.idle_poll_ms);
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn handle_trigger<B, C, A, S>(
        &mut self,
        button: &mut B,
        clock: &mut C,
        activator: &mut A,
        sink: &mut S,
    ) -> PollOutcome
    where
        B: InputLine,
        C: Clock,
        A: ModeActivator,
        S: EventSink,
    {
        if self.mode.is_active() {
            return PollOutcome::AlreadyActive;
        }

        // Cleared before the episode: a press that lands during it is
        // covered by the live re-sampling, not queued.
        if !self.latch.take() {
            return PollOutcome::Idle;
        }
        sink.emit(&TriggerEvent::InterruptReceived);

        match self.detector.run_episode(button, clock, sink) {
            PressOutcome::NotPressed => {
                sink.emit(&TriggerEvent::SpuriousInterrupt);
                PollOutcome::Spurious
            }
            PressOutcome::Cancelled { held_ms } => PollOutcome::Cancelled { held_ms },
            PressOutcome::Confirmed { .. } => {
                self.activate(TriggerSource::LongPressButton, activator, sink);
                PollOutcome::Activated
            }
        }
    }

    fn report_status<C, S>(&mut self, clock: &C, sink: &mut S)
    where
        C: Clock,
        S: EventSink,
    {
        let now = clock.now_ms();
        if now.saturating_sub(self.last_status_ms) < u64::from(self.config.status_interval_ms) {
            return;
        }
        self.last_status_ms = now;
        sink.emit(&TriggerEvent::Status(StatusData {
            mode_active: self.mode.is_active(),
            uptime_secs: now / 1000,
            immediate_gpio: self.config.immediate_gpio,
            button_gpio: self.config.button_gpio,
        }));
    }
}
