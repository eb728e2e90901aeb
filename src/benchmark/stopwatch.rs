//! Accumulating wall-clock timer
//!
//! Wraps a start/stop pair around a unit of work and sums the elapsed time of
//! every lap. Used to time force accumulation + integration without I/O.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
    total: Duration,
    laps: u64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a lap. Restarting an open lap discards it
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Close the open lap and add it to the total. Returns the lap length,
    /// zero when no lap was open
    pub fn stop(&mut self) -> Duration {
        match self.started.take() {
            Some(t0) => {
                let lap = t0.elapsed();
                self.total += lap;
                self.laps += 1;
                lap
            }
            None => Duration::ZERO,
        }
    }

    /// Time a closure as one lap
    pub fn time<R>(&mut self, f: impl FnOnce() -> R) -> R {
        self.start();
        let r = f();
        self.stop();
        r
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn laps(&self) -> u64 {
        self.laps
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }
}
