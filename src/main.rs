//! Gateway trigger: main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  GpioInput ×2        Esp32Clock      LogEventSink            │
//! │  (InputLine/ISR)     (Clock)         (EventSink)             │
//! │  ModeActivation ── ModeLed                                   │
//! │  (ModeActivator)     (ModeIndicator)                         │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │         ModeController (pure logic)                    │  │
//! │  │  ModeFlag · LongPressDetector · InterruptLatch         │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use gateway_trigger::adapters::activation::ModeActivation;
use gateway_trigger::adapters::gpio::GpioInput;
use gateway_trigger::adapters::log_sink::LogEventSink;
use gateway_trigger::adapters::time::Esp32Clock;
use gateway_trigger::app::events::TriggerSource;
use gateway_trigger::app::ports::{Edge, EdgeInterrupt, Pull};
use gateway_trigger::app::service::ModeController;
use gateway_trigger::config::TriggerConfig;
use gateway_trigger::drivers::hw_init;
use gateway_trigger::drivers::mode_led::ModeLed;
use gateway_trigger::latch::InterruptLatch;

/// Set by the BOOT-button falling-edge ISR, consumed by the main loop.
static BUTTON_LATCH: InterruptLatch = InterruptLatch::new();

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║   Gateway Trigger v{}              ║", env!("CARGO_PKG_VERSION"));
    info!("║   boot pin · long-press BOOT button  ║");
    info!("╚══════════════════════════════════════╝");

    let config = TriggerConfig::load();

    // ── Hardware ──────────────────────────────────────────────
    hw_init::init_isr_service()?;

    let mut immediate = GpioInput::new(config.immediate_gpio, Pull::Down)?;
    let mut button = GpioInput::new(config.button_gpio, Pull::Up)?;
    button.register_edge_handler(Edge::Falling, &BUTTON_LATCH)?;

    let led = ModeLed::new(config.mode_led_gpio)?;
    let mut activator = ModeActivation::new(led, |source: TriggerSource| {
        info!("Handing off to configuration server ({:?})", source);
    });

    let mut clock = Esp32Clock::new();
    let mut sink = LogEventSink::new();

    // ── Trigger loop ──────────────────────────────────────────
    let mut controller = ModeController::new(config, &BUTTON_LATCH);
    controller.boot(&mut immediate, &mut activator, &mut sink);
    controller.run(&mut button, &mut clock, &mut activator, &mut sink)
}
