//! Session clock and time sources
//!
//! Timestamps are milliseconds as `f64`. Only the difference between two
//! timestamps matters, so any monotonic origin works.

use std::time::{Duration, Instant};

/// Source of "now" for a driver loop
pub trait TimeSource {
    /// Current monotonic time in milliseconds
    fn now_ms(&self) -> f64;

    /// Block (or advance) until roughly `ms` later
    fn wait_ms(&mut self, ms: f64);
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl TimeSource for SystemTimeSource {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn wait_ms(&mut self, ms: f64) {
        if ms > 0.0 && ms.is_finite() {
            std::thread::sleep(Duration::from_secs_f64(ms / 1000.0));
        }
    }
}

/// Simulated clock that only moves when told to (headless runs, tests)
#[derive(Debug, Clone, Default)]
pub struct ManualTimeSource {
    now_ms: f64,
}

impl ManualTimeSource {
    pub fn new(start_ms: f64) -> Self {
        Self { now_ms: start_ms }
    }

    pub fn advance(&mut self, ms: f64) {
        if ms > 0.0 && ms.is_finite() {
            self.now_ms += ms;
        }
    }
}

impl TimeSource for ManualTimeSource {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn wait_ms(&mut self, ms: f64) {
        self.advance(ms);
    }
}

/// Tracks session start and paused intervals to yield active play time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionClock {
    start_ms: Option<f64>,
    paused_total_ms: f64,
    pause_started_ms: Option<f64>,
}

impl SessionClock {
    /// Begin a new session at `now_ms`, forgetting any previous pauses
    pub fn start(&mut self, now_ms: f64) {
        self.start_ms = Some(now_ms);
        self.paused_total_ms = 0.0;
        self.pause_started_ms = None;
    }

    /// Mark the start of a pause (no-op if not started or already paused)
    pub fn pause(&mut self, now_ms: f64) {
        if self.start_ms.is_none() || self.pause_started_ms.is_some() {
            return;
        }
        self.pause_started_ms = Some(now_ms);
    }

    /// Close the open pause and fold it into the paused total
    pub fn resume(&mut self, now_ms: f64) {
        if let Some(paused_at) = self.pause_started_ms.take() {
            self.paused_total_ms += (now_ms - paused_at).max(0.0);
        }
    }

    pub fn is_started(&self) -> bool {
        self.start_ms.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.pause_started_ms.is_some()
    }

    /// Closed pause intervals only
    pub fn paused_total_ms(&self) -> f64 {
        self.paused_total_ms
    }

    /// Wall time since start minus all paused time; `None` before `start`
    pub fn active_elapsed_ms(&self, now_ms: f64) -> Option<f64> {
        let start = self.start_ms?;
        let open_pause = self
            .pause_started_ms
            .map(|paused_at| (now_ms - paused_at).max(0.0))
            .unwrap_or(0.0);
        Some((now_ms - start - self.paused_total_ms - open_pause).max(0.0))
    }
}
