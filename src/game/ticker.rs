//! Fixed-step ticker
//!
//! Turns variable frame times into whole simulation ticks. The ticker only
//! runs while the game has movement to simulate; stopping it discards any
//! partial step so a restart always waits one full step before the first
//! tick.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FixedTicker {
    step: Duration,
    max_ticks: u32,
    accumulator: Duration,
    running: bool,
}

impl FixedTicker {
    pub fn new(step: Duration, max_ticks: u32) -> Self {
        Self { step, max_ticks: max_ticks.max(1), accumulator: Duration::ZERO, running: false }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start ticking. No-op if already running.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.accumulator = Duration::ZERO;
        }
    }

    /// Stop ticking. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = Duration::ZERO;
    }

    /// Feed elapsed time; returns how many ticks are due.
    ///
    /// At most `max_ticks` per call. Backlog beyond that is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running || self.step.is_zero() {
            return 0;
        }
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if self.accumulator >= self.step {
            self.accumulator = Duration::ZERO;
        }
        ticks
    }
}
