//! ESP32 clock adapter.
//!
//! Provides the monotonic millisecond clock and blocking delays used by the
//! trigger loop.
//!
//! - **`target_os = "espidf"`**: time from `esp_timer_get_time()`
//!   (microsecond precision, monotonic); delays via
//!   `esp_idf_hal::delay::FreeRtos`, which yields to other tasks.
//! - **`not(target_os = "espidf")`**: `std::time::Instant` and
//!   `std::thread::sleep` for host-side simulation.

use embedded_hal::delay::DelayNs;

use crate::app::ports::Clock;

pub struct Esp32Clock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Esp32Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32Clock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since start (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl Clock for Esp32Clock {
    fn now_ms(&self) -> u64 {
        self.uptime_us() / 1000
    }
}

#[cfg(target_os = "espidf")]
impl DelayNs for Esp32Clock {
    fn delay_ns(&mut self, ns: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ns.div_ceil(1_000_000));
    }

    fn delay_us(&mut self, us: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(us.div_ceil(1000));
    }

    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }
}

#[cfg(not(target_os = "espidf"))]
impl DelayNs for Esp32Clock {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
