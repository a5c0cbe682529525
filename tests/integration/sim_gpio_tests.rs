//! Integration tests wiring the real adapters to the simulated GPIO block.
//!
//! The simulated pads are process-global, so each test owns its own pins
//! and its own `static` latch.

use gateway_trigger::adapters::activation::ModeActivation;
use gateway_trigger::adapters::gpio::GpioInput;
use gateway_trigger::adapters::log_sink::LogEventSink;
use gateway_trigger::adapters::time::Esp32Clock;
use gateway_trigger::app::events::{StatusData, TriggerEvent, TriggerSource};
use gateway_trigger::app::ports::{Edge, EdgeInterrupt, EventSink, Pull};
use gateway_trigger::app::service::{ModeController, PollOutcome};
use gateway_trigger::config::TriggerConfig;
use gateway_trigger::drivers::hw_init::sim;
use gateway_trigger::drivers::mode_led::ModeLed;
use gateway_trigger::latch::InterruptLatch;

use crate::mock_hw::RecordingSink;

fn config(immediate: i32, button: i32, led: i32) -> TriggerConfig {
    TriggerConfig {
        immediate_gpio: immediate,
        button_gpio: button,
        mode_led_gpio: led,
        ..TriggerConfig::default()
    }
}

#[test]
fn boot_pin_driven_high_lights_mode_led() {
    static LATCH: InterruptLatch = InterruptLatch::new();
    let cfg = config(21, 22, 23);

    let mut immediate = GpioInput::new(cfg.immediate_gpio, Pull::Down).unwrap();
    sim::drive(cfg.immediate_gpio, true);

    let led = ModeLed::new(cfg.mode_led_gpio).unwrap();
    assert!(sim::read(23), "LED off (HIGH) after init");

    let mut handed_off = Vec::new();
    let mut act = ModeActivation::new(led, |s| handed_off.push(s));
    let mut sink = RecordingSink::default();

    let mut ctl = ModeController::new(cfg, &LATCH);
    assert!(ctl.boot(&mut immediate, &mut act, &mut sink));
    assert!(act.indicator().is_on());
    assert!(!sim::read(23), "active-low LED driven LOW");
    drop(act);
    assert_eq!(handed_off, vec![TriggerSource::ImmediateLevelPin]);
}

#[test]
fn falling_edge_that_bounces_back_is_spurious() {
    static LATCH: InterruptLatch = InterruptLatch::new();
    let cfg = config(27, 32, 33);

    let mut button = GpioInput::new(cfg.button_gpio, Pull::Up).unwrap();
    button.register_edge_handler(Edge::Falling, &LATCH).unwrap();

    // Glitch: down and back up before the main loop looks.
    sim::drive(cfg.button_gpio, false);
    sim::drive(cfg.button_gpio, true);
    sim::drive(cfg.button_gpio, false);
    sim::drive(cfg.button_gpio, true);
    assert!(LATCH.is_pending());

    let mut clock = Esp32Clock::new();
    let mut act = ModeActivation::new(ModeLed::new(cfg.mode_led_gpio).unwrap(), |_| {});
    let mut sink = RecordingSink::default();
    let mut ctl = ModeController::new(cfg, &LATCH);

    assert_eq!(
        ctl.poll(&mut button, &mut clock, &mut act, &mut sink),
        PollOutcome::Spurious
    );
    assert!(!LATCH.is_pending());
    assert!(!act.indicator().is_on());
}

#[test]
fn rising_edge_does_not_fire_falling_handler() {
    static LATCH: InterruptLatch = InterruptLatch::new();
    let mut button = GpioInput::new(19, Pull::Down).unwrap();
    button.register_edge_handler(Edge::Falling, &LATCH).unwrap();

    sim::drive(19, true);
    assert!(!LATCH.is_pending());
    sim::drive(19, false);
    assert!(LATCH.is_pending());
}

#[test]
fn log_sink_renders_every_event() {
    let mut sink = LogEventSink::new();
    let events = [
        TriggerEvent::Armed {
            immediate_gpio: 34,
            button_gpio: 0,
            long_press_ms: 5000,
        },
        TriggerEvent::ImmediateTrigger { gpio: 34 },
        TriggerEvent::InterruptReceived,
        TriggerEvent::HoldStarted { required_ms: 5000 },
        TriggerEvent::HoldProgress { remaining_secs: 4 },
        TriggerEvent::HoldConfirmed { held_ms: 5000 },
        TriggerEvent::HoldCancelled { held_ms: 2340 },
        TriggerEvent::SpuriousInterrupt,
        TriggerEvent::ModeActivated(TriggerSource::LongPressButton),
        TriggerEvent::Status(StatusData {
            mode_active: true,
            uptime_secs: 60,
            immediate_gpio: 34,
            button_gpio: 0,
        }),
    ];
    for event in &events {
        sink.emit(event);
    }
}
