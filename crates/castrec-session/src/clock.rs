//! Elapsed-recording-time clock.

use std::time::{Duration, Instant};

/// Monotonic clock tracking recorded time across pause/resume.
///
/// Pausing freezes the reading; resuming continues from where it stopped.
#[derive(Debug, Default)]
pub struct ElapsedClock {
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl ElapsedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin timing from zero.
    pub fn start(&mut self) {
        self.accumulated = Duration::ZERO;
        self.running_since = Some(Instant::now());
    }

    pub fn pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += since.elapsed();
        }
    }

    pub fn resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.running_since = None;
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.accumulated
            + self
                .running_since
                .map(|since| since.elapsed())
                .unwrap_or_default()
    }
}
