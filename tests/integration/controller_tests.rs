//! Integration tests for the latch → ModeController → activator pipeline.
//!
//! Every scenario runs on a simulated timeline: the button is scripted by
//! the intervals it is held for, and the clock only moves when the
//! controller sleeps.

use gateway_trigger::adapters::log_sink::seconds;
use gateway_trigger::app::events::{StatusData, TriggerEvent, TriggerSource};
use gateway_trigger::app::ports::{Clock, Level};
use gateway_trigger::app::service::{ModeController, PollOutcome};
use gateway_trigger::config::TriggerConfig;
use gateway_trigger::latch::InterruptLatch;

use crate::mock_hw::{
    LevelPin, RecordingActivator, RecordingSink, ScriptedButton, SimClock, timeline,
};

// ── Boot fast path ────────────────────────────────────────────

#[test]
fn immediate_pin_high_at_boot_activates_once() {
    let latch = InterruptLatch::new();
    let mut ctl = ModeController::new(TriggerConfig::default(), &latch);
    let mut act = RecordingActivator::default();
    let mut sink = RecordingSink::default();

    assert!(ctl.boot(&mut LevelPin(Level::High), &mut act, &mut sink));
    assert!(ctl.is_active());
    assert_eq!(act.calls, vec![TriggerSource::ImmediateLevelPin]);
    assert_eq!(
        sink.events,
        vec![
            TriggerEvent::Armed {
                immediate_gpio: 34,
                button_gpio: 0,
                long_press_ms: 5000,
            },
            TriggerEvent::ImmediateTrigger { gpio: 34 },
            TriggerEvent::ModeActivated(TriggerSource::ImmediateLevelPin),
        ]
    );
}

#[test]
fn immediate_pin_low_leaves_mode_inactive() {
    let latch = InterruptLatch::new();
    let mut ctl = ModeController::new(TriggerConfig::default(), &latch);
    let mut act = RecordingActivator::default();
    let mut sink = RecordingSink::default();

    assert!(!ctl.boot(&mut LevelPin(Level::Low), &mut act, &mut sink));
    assert!(!ctl.is_active());
    assert!(act.calls.is_empty());
    assert_eq!(sink.events.len(), 1, "only the armed banner");
}

#[test]
fn press_after_immediate_activation_is_ignored() {
    let now = timeline();
    let latch = InterruptLatch::new();
    let mut ctl = ModeController::new(TriggerConfig::default(), &latch);
    let mut act = RecordingActivator::default();
    let mut sink = RecordingSink::default();
    ctl.boot(&mut LevelPin(Level::High), &mut act, &mut sink);
    sink.clear();

    let mut btn = ScriptedButton::new(now.clone(), &[(0, 10_000)]);
    let mut clock = SimClock::new(now);
    latch.set();

    assert_eq!(
        ctl.poll(&mut btn, &mut clock, &mut act, &mut sink),
        PollOutcome::AlreadyActive
    );
    assert_eq!(act.calls.len(), 1);
    assert_eq!(btn.reads, 0, "button not sampled once active");
    assert_eq!(clock.slept_ms, 0);
    assert!(latch.is_pending(), "latch left alone once active");
    assert!(sink.events.is_empty());
}

// ── Long press ────────────────────────────────────────────────

#[test]
fn six_second_hold_confirms_after_release() {
    let now = timeline();
    let latch = InterruptLatch::new();
    let mut ctl = ModeController::new(TriggerConfig::default(), &latch);
    let mut btn = ScriptedButton::new(now.clone(), &[(0, 6200)]);
    let mut clock = SimClock::new(now);
    let mut act = RecordingActivator::default();
    let mut sink = RecordingSink::default();

    latch.set();
    assert_eq!(
        ctl.poll(&mut btn, &mut clock, &mut act, &mut sink),
        PollOutcome::Activated
    );

    assert!(ctl.is_active());
    assert!(!latch.is_pending());
    assert_eq!(act.calls, vec![TriggerSource::LongPressButton]);
    assert!(clock.now_ms() >= 6200, "returned only after release");
    assert_eq!(sink.progress(), vec![4, 3, 2, 1]);
    assert_eq!(
        sink.events.first(),
        Some(&TriggerEvent::InterruptReceived)
    );
    assert!(sink.events.contains(&TriggerEvent::HoldConfirmed { held_ms: 5000 }));
    assert_eq!(
        sink.events.last(),
        Some(&TriggerEvent::ModeActivated(TriggerSource::LongPressButton))
    );
}

#[test]
fn short_hold_cancels_and_rearms() {
    let now = timeline();
    let latch = InterruptLatch::new();
    let mut ctl = ModeController::new(TriggerConfig::default(), &latch);
    let mut btn = ScriptedButton::new(now.clone(), &[(0, 2300)]);
    let mut clock = SimClock::new(now);
    let mut act = RecordingActivator::default();
    let mut sink = RecordingSink::default();

    latch.set();
    assert_eq!(
        ctl.poll(&mut btn, &mut clock, &mut act, &mut sink),
        PollOutcome::Cancelled { held_ms: 2300 }
    );
    assert!(!ctl.is_active());
    assert!(act.calls.is_empty());
    assert_eq!(
        sink.events,
        vec![
            TriggerEvent::InterruptReceived,
            TriggerEvent::HoldStarted { required_ms: 5000 },
            TriggerEvent::HoldProgress { remaining_secs: 4 },
            TriggerEvent::HoldProgress { remaining_secs: 3 },
            TriggerEvent::HoldCancelled { held_ms: 2300 },
        ]
    );
    match sink.events.last() {
        Some(TriggerEvent::HoldCancelled { held_ms }) => assert_eq!(seconds(*held_ms), "2.3s"),
        other => panic!("expected cancel notice, got {:?}", other),
    }

    // Nothing pending: the next poll is idle.
    assert_eq!(
        ctl.poll(&mut btn, &mut clock, &mut act, &mut sink),
        PollOutcome::Idle
    );
}

#[test]
fn second_press_after_cancel_can_still_confirm() {
    let now = timeline();
    let latch = InterruptLatch::new();
    let mut ctl = ModeController::new(TriggerConfig::default(), &latch);
    let mut btn = ScriptedButton::new(now.clone(), &[(0, 1500), (3000, 9000)]);
    let mut clock = SimClock::new(now.clone());
    let mut act = RecordingActivator::default();
    let mut sink = RecordingSink::default();

    latch.set();
    assert!(matches!(
        ctl.poll(&mut btn, &mut clock, &mut act, &mut sink),
        PollOutcome::Cancelled { .. }
    ));

    now.set(3000);
    latch.set();
    assert_eq!(
        ctl.poll(&mut btn, &mut clock, &mut act, &mut sink),
        PollOutcome::Activated
    );
    assert_eq!(act.calls, vec![TriggerSource::LongPressButton]);
}

#[test]
fn exact_threshold_release_is_cancelled() {
    let now = timeline();
    let latch = InterruptLatch::new();
    let mut ctl = ModeController::new(TriggerConfig::default(), &latch);
    let mut btn = ScriptedButton::new(now.clone(), &[(0, 5000)]);
    let mut clock = SimClock::new(now);
    let mut act = RecordingActivator::default();
    let mut sink = RecordingSink::default();

    latch.set();
    assert_eq!(
        ctl.poll(&mut btn, &mut clock, &mut act, &mut sink),
        PollOutcome::Cancelled { held_ms: 5000 }
    );
    assert!(!ctl.is_active());
}

// ── Latch handling ────────────────────────────────────────────

#[test]
fn no_interrupt_means_idle_and_untouched_button() {
    let now = timeline();
    let latch = InterruptLatch::new();
    let mut ctl = ModeController::new(TriggerConfig::default(), &latch);
    let mut btn = ScriptedButton::new(now.clone(), &[(0, 10_000)]);
    let mut clock = SimClock::new(now);
    let mut act = RecordingActivator::default();
    let mut sink = RecordingSink::default();

    assert_eq!(
        ctl.poll(&mut btn, &mut clock, &mut act, &mut sink),
        PollOutcome::Idle
    );
    assert_eq!(btn.reads, 0);
    assert!(sink.events.is_empty());
}

#[test]
fn interrupt_with_button_up_is_spurious() {
    let now = timeline();
    let latch = InterruptLatch::new();
    let mut ctl = ModeController::new(TriggerConfig::default(), &latch);
    let mut btn = ScriptedButton::never_pressed(now.clone());
    let mut clock = SimClock::new(now);
    let mut act = RecordingActivator::default();
    let mut sink = RecordingSink::default();

    latch.set();
    assert_eq!(
        ctl.poll(&mut btn, &mut clock, &mut act, &mut sink),
        PollOutcome::Spurious
    );
    assert!(!latch.is_pending());
    assert_eq!(clock.slept_ms, 0);
    assert_eq!(
        sink.events,
        vec![TriggerEvent::InterruptReceived, TriggerEvent::SpuriousInterrupt]
    );
}

#[test]
fn bounced_edges_coalesce_into_one_episode() {
    let now = timeline();
    let latch = InterruptLatch::new();
    let mut ctl = ModeController::new(TriggerConfig::default(), &latch);
    let mut btn = ScriptedButton::new(now.clone(), &[(0, 800)]);
    let mut clock = SimClock::new(now);
    let mut act = RecordingActivator::default();
    let mut sink = RecordingSink::default();

    for _ in 0..5 {
        latch.set();
    }
    assert!(matches!(
        ctl.poll(&mut btn, &mut clock, &mut act, &mut sink),
        PollOutcome::Cancelled { .. }
    ));
    assert_eq!(
        ctl.poll(&mut btn, &mut clock, &mut act, &mut sink),
        PollOutcome::Idle
    );
    assert_eq!(
        sink.count(|e| matches!(e, TriggerEvent::HoldStarted { .. })),
        1
    );
}

// ── Idempotence ───────────────────────────────────────────────

#[test]
fn repeated_activation_calls_external_action_once() {
    let latch = InterruptLatch::new();
    let mut ctl = ModeController::new(TriggerConfig::default(), &latch);
    let mut act = RecordingActivator::default();
    let mut sink = RecordingSink::default();

    assert!(ctl.activate(TriggerSource::LongPressButton, &mut act, &mut sink));
    assert!(!ctl.activate(TriggerSource::LongPressButton, &mut act, &mut sink));
    assert!(!ctl.activate(TriggerSource::ImmediateLevelPin, &mut act, &mut sink));

    assert_eq!(act.calls, vec![TriggerSource::LongPressButton]);
    assert!(ctl.mode_flag().is_active());
    assert_eq!(
        sink.count(|e| matches!(e, TriggerEvent::ModeActivated(_))),
        1
    );
}

// ── Status ────────────────────────────────────────────────────

#[test]
fn status_reported_once_per_interval() {
    let now = timeline();
    let latch = InterruptLatch::new();
    let mut ctl = ModeController::new(TriggerConfig::default(), &latch);
    let mut btn = ScriptedButton::never_pressed(now.clone());
    let mut clock = SimClock::new(now);
    let mut act = RecordingActivator::default();
    let mut sink = RecordingSink::default();

    clock.advance(29_900);
    ctl.poll(&mut btn, &mut clock, &mut act, &mut sink);
    assert!(sink.events.is_empty());

    clock.advance(100);
    ctl.poll(&mut btn, &mut clock, &mut act, &mut sink);
    assert_eq!(
        sink.events,
        vec![TriggerEvent::Status(StatusData {
            mode_active: false,
            uptime_secs: 30,
            immediate_gpio: 34,
            button_gpio: 0,
        })]
    );

    clock.advance(100);
    ctl.poll(&mut btn, &mut clock, &mut act, &mut sink);
    assert_eq!(sink.events.len(), 1);
}

#[test]
fn custom_timing_shortens_the_hold() {
    let config = TriggerConfig::from_json(r#"{ "long_press_ms": 2000, "hold_sample_ms": 20 }"#)
        .expect("valid override");
    let now = timeline();
    let latch = InterruptLatch::new();
    let mut ctl = ModeController::new(config, &latch);
    let mut btn = ScriptedButton::new(now.clone(), &[(0, 2500)]);
    let mut clock = SimClock::new(now);
    let mut act = RecordingActivator::default();
    let mut sink = RecordingSink::default();

    latch.set();
    assert_eq!(
        ctl.poll(&mut btn, &mut clock, &mut act, &mut sink),
        PollOutcome::Activated
    );
    assert_eq!(sink.progress(), vec![1]);
}
