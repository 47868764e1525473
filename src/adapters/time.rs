//! Clock adapters.
//!
//! - [`MonotonicClock`]: real time.  On `target_os = "espidf"` it wraps
//!   `esp_timer_get_time()` (microsecond precision, monotonic) and sleeps
//!   through FreeRTOS; on the host it uses `std::time::Instant` and
//!   `std::thread::sleep`.
//! - [`SimClock`]: simulated time for tests and the simulator.  Sleeping
//!   advances the clock instantly.

use core::cell::Cell;

use embedded_hal::delay::DelayNs;

use crate::app::ports::TimePort;

/// Real monotonic clock.
pub struct MonotonicClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        // SAFETY: esp_timer_get_time has no preconditions once the system
        // has booted.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since this clock was created (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl TimePort for MonotonicClock {
    /// Milliseconds, truncated to 32 bits (wraps after ~49.7 days).
    fn now_ms(&self) -> u32 {
        (self.uptime_us() / 1000) as u32
    }
}

impl DelayNs for MonotonicClock {
    #[cfg(target_os = "espidf")]
    fn delay_ns(&mut self, ns: u32) {
        esp_idf_hal::delay::Ets::delay_us(ns.div_ceil(1000));
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    /// Millisecond sleeps yield to the scheduler on target.
    #[cfg(target_os = "espidf")]
    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

/// Manually driven clock.  Time only moves when told to.
#[derive(Debug, Default)]
pub struct SimClock {
    now_ns: Cell<u64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a given millisecond timestamp.
    pub fn starting_at(ms: u32) -> Self {
        let clock = Self::new();
        clock.set_ms(ms);
        clock
    }

    pub fn set_ms(&self, ms: u32) {
        self.now_ns.set(u64::from(ms) * 1_000_000);
    }

    pub fn advance_ms(&self, ms: u32) {
        self.now_ns.set(self.now_ns.get() + u64::from(ms) * 1_000_000);
    }

    /// Total simulated milliseconds, without 32-bit wrap.
    pub fn elapsed_ms(&self) -> u64 {
        self.now_ns.get() / 1_000_000
    }
}

impl TimePort for SimClock {
    fn now_ms(&self) -> u32 {
        self.elapsed_ms() as u32
    }
}

impl DelayNs for SimClock {
    fn delay_ns(&mut self, ns: u32) {
        self.now_ns.set(self.now_ns.get() + u64::from(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance_ms(ms);
    }
}
