//! Time adapters.
//!
//! - [`SystemClock`]: wall-clock time from `std::time::Instant`; delays
//!   really sleep.  Used by the host binary.
//! - [`VirtualClock`]: a counter that only moves when a delay is
//!   requested or the owner advances it.  Blocking episodes therefore
//!   complete instantly while still consuming simulated time.

use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;

use crate::app::ports::ClockPort;

/// Monotonic wall clock, milliseconds since construction.
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl ClockPort for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl DelayNs for SystemClock {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// Simulated time in nanoseconds; reads round down to milliseconds.
#[derive(Debug, Default, Clone, Copy)]
pub struct VirtualClock {
    now_ns: u64,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time (ms).
    pub fn now(&self) -> u64 {
        self.now_ns / 1_000_000
    }

    /// Move time forward without blocking anything.
    pub fn advance(&mut self, ms: u64) {
        self.now_ns += ms * 1_000_000;
    }
}

impl ClockPort for VirtualClock {
    fn now_ms(&self) -> u64 {
        self.now()
    }
}

impl DelayNs for VirtualClock {
    fn delay_ns(&mut self, ns: u32) {
        self.now_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance(u64::from(ms));
    }
}
