//! Test and helper mocks for blinds_core.

use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use blinds_traits::{Actuator, Clock, StateSink};

/// One recorded relay trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Open,
    Close,
    Stop,
}

/// Actuator that records every trigger. Clones share the same log, so a
/// handle can be kept outside the core for assertions.
#[derive(Debug, Default, Clone)]
pub struct RecordingActuator {
    triggers: Arc<Mutex<Vec<Trigger>>>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triggers(&self) -> Vec<Trigger> {
        self.triggers.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Trigger> {
        self.triggers().last().copied()
    }

    fn record(&self, trigger: Trigger) {
        if let Ok(mut t) = self.triggers.lock() {
            t.push(trigger);
        }
    }
}

impl Actuator for RecordingActuator {
    fn drive_open(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(Trigger::Open);
        Ok(())
    }
    fn drive_close(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(Trigger::Close);
        Ok(())
    }
    fn stop(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(Trigger::Stop);
        Ok(())
    }
}

/// State sink that records every published (position, tilt) pair.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    states: Arc<Mutex<Vec<(f32, f32)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> Vec<(f32, f32)> {
        self.states.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<(f32, f32)> {
        self.states().last().copied()
    }
}

impl StateSink for RecordingSink {
    fn publish(&mut self, position: f32, tilt: f32) {
        if let Ok(mut s) = self.states.lock() {
            s.push((position, tilt));
        }
    }
}

/// Deterministic test clock whose time is advanced manually.
///
/// now() = origin + offset; sleep(d) advances the offset without actually
/// sleeping. Clones share the same offset.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Advance the clock by the given duration.
    pub fn advance(&self, d: Duration) {
        if let Ok(mut off) = self.offset.lock() {
            *off = off.saturating_add(d);
        }
    }

    /// Advance the clock by whole milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let off = self.offset.lock().map(|g| *g).unwrap_or(Duration::ZERO);
        self.origin + off
    }

    fn sleep(&self, d: Duration) {
        self.advance(d);
    }
}
