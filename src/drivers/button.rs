//! Long-press confirmation for the BOOT button.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up.  The GPIO fires on the falling
//! edge; the ISR only sets the [`InterruptLatch`](crate::latch::InterruptLatch).
//! The main loop then calls [`LongPressDetector::run_episode`], which samples
//! the pin and the clock until the press is confirmed or abandoned.
//!
//! ## Protocol
//!
//! | State     | Condition                           | Next / result          |
//! |-----------|-------------------------------------|------------------------|
//! | Idle      | button up on entry                  | `NotPressed`           |
//! | Idle      | button down                         | Pressed { start }      |
//! | Pressed   | released before `required_ms`       | `Cancelled { held }`   |
//! | Pressed   | held `>= required_ms`               | Confirmed              |
//! | Confirmed | button still down                   | wait for release       |
//! | Confirmed | released                            | `Confirmed { held }`   |
//!
//! While pressed, one `HoldProgress` event is emitted per whole elapsed
//! second with the remaining seconds rounded up.
//!
//! The release wait after confirmation has no timeout: the button is
//! operated by a person, and returning while it is still down would let the
//! same press trigger twice.

use log::debug;

use crate::app::events::TriggerEvent;
use crate::app::ports::{Clock, EventSink, InputLine};
use crate::config::TriggerConfig;

/// Result of one confirmation episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Button was already up when the episode started.
    NotPressed,
    /// Released after `held_ms`, short of the required duration.
    Cancelled { held_ms: u32 },
    /// Held for `held_ms >= required`; the button has since been released.
    Confirmed { held_ms: u32 },
}

impl PressOutcome {
    pub fn is_confirmed(self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

/// Per-episode state.  Lives on the stack of `run_episode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonState {
    Idle,
    Pressed { start_ms: u64 },
    Confirmed { held_ms: u32 },
}

#[derive(Debug, Clone, Copy)]
pub struct LongPressDetector {
    required_ms: u32,
    sample_ms: u32,
    release_poll_ms: u32,
}

impl LongPressDetector {
    pub fn new(required_ms: u32, sample_ms: u32, release_poll_ms: u32) -> Self {
        Self {
            required_ms,
            sample_ms,
            release_poll_ms,
        }
    }

    pub fn from_config(config: &TriggerConfig) -> Self {
        Self::new(
            config.long_press_ms,
            config.hold_sample_ms,
            config.release_poll_ms,
        )
    }

    /// True only if the press was held for the full duration.
    pub fn confirm<B, C, S>(&self, button: &mut B, clock: &mut C, sink: &mut S) -> bool
    where
        B: InputLine,
        C: Clock,
        S: EventSink,
    {
        self.run_episode(button, clock, sink).is_confirmed()
    }

    /// Run one press episode to completion.  Blocks the caller while the
    /// button is held.
    pub fn run_episode<B, C, S>(&self, button: &mut B, clock: &mut C, sink: &mut S) -> PressOutcome
    where
        B: InputLine,
        C: Clock,
        S: EventSink,
    {
        let mut state = ButtonState::Idle;
        let mut announced_secs: u32 = 0;

        loop {
            match state {
                ButtonState::Idle => {
                    if !button.is_asserted() {
                        return PressOutcome::NotPressed;
                    }
                    sink.emit(&TriggerEvent::HoldStarted {
                        required_ms: self.required_ms,
                    });
                    state = ButtonState::Pressed {
                        start_ms: clock.now_ms(),
                    };
                }

                ButtonState::Pressed { start_ms } => {
                    if !button.is_asserted() {
                        let held_ms = clock.elapsed_ms(start_ms);
                        sink.emit(&TriggerEvent::HoldCancelled { held_ms });
                        return PressOutcome::Cancelled { held_ms };
                    }

                    let held_ms = clock.elapsed_ms(start_ms);
                    if held_ms >= self.required_ms {
                        sink.emit(&TriggerEvent::HoldConfirmed { held_ms });
                        state = ButtonState::Confirmed { held_ms };
                        continue;
                    }

                    let whole_secs = held_ms / 1000;
                    if whole_secs > announced_secs {
                        announced_secs = whole_secs;
                        sink.emit(&TriggerEvent::HoldProgress {
                            remaining_secs: self.remaining_secs(held_ms),
                        });
                    }

                    clock.delay_ms(self.sample_ms);
                }

                ButtonState::Confirmed { held_ms } => {
                    while button.is_asserted() {
                        clock.delay_ms(self.release_poll_ms);
                    }
                    debug!("long press: released after confirmation");
                    return PressOutcome::Confirmed { held_ms };
                }
            }
        }
    }

    /// Whole seconds still to hold, rounded up.
    fn remaining_secs(&self, held_ms: u32) -> u32 {
        self.required_ms.saturating_sub(held_ms).div_ceil(1000)
    }
}
