//! Fuzz target: `ModeController` over arbitrary press timelines
//!
//! Each input byte pair is one press: a gap before it and its length (both
//! in 50 ms units).  Every press fires the latch.  Verifies:
//! - No panics and no hang for any timeline
//! - The external activation runs at most once
//! - The mode flag agrees with the activation count
//!
//! cargo fuzz run fuzz_press_timeline

#![no_main]

use std::cell::Cell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use gateway_trigger::app::events::{TriggerEvent, TriggerSource};
use gateway_trigger::app::ports::{Clock, EventSink, InputLine, Level, ModeActivator, Pull};
use gateway_trigger::app::service::ModeController;
use gateway_trigger::config::TriggerConfig;
use gateway_trigger::latch::InterruptLatch;
use libfuzzer_sys::fuzz_target;

struct Clk(Rc<Cell<u64>>);

impl DelayNs for Clk {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.set(self.0.get() + u64::from(ms));
    }
}

impl Clock for Clk {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

struct Btn {
    now: Rc<Cell<u64>>,
    windows: Vec<(u64, u64)>,
}

impl InputLine for Btn {
    fn read(&mut self) -> Level {
        let t = self.now.get();
        Level::from(!self.windows.iter().any(|&(s, e)| t >= s && t < e))
    }

    fn pull(&self) -> Pull {
        Pull::Up
    }
}

struct Count(usize);

impl ModeActivator for Count {
    fn activate(&mut self, _source: TriggerSource) {
        self.0 += 1;
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &TriggerEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let now = Rc::new(Cell::new(0u64));
    let mut windows = Vec::new();
    let mut t = 0u64;
    for pair in data.chunks_exact(2).take(32) {
        t += u64::from(pair[0]) * 50;
        let len = u64::from(pair[1]) * 50;
        windows.push((t, t + len));
        t += len;
    }

    let latch = InterruptLatch::new();
    let mut ctl = ModeController::new(TriggerConfig::default(), &latch);
    let mut btn = Btn { now: now.clone(), windows: windows.clone() };
    let mut clk = Clk(now.clone());
    let mut act = Count(0);

    for &(start, _) in &windows {
        if now.get() < start {
            now.set(start);
        }
        latch.set();
        ctl.poll(&mut btn, &mut clk, &mut act, &mut Discard);
    }

    assert!(act.0 <= 1);
    assert_eq!(ctl.is_active(), act.0 == 1);
});
