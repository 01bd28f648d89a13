//! Time source and frame pacing for the loop.

use std::thread;
use std::time::{Duration, Instant};

/// Monotonic milliseconds since some fixed start.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// "Run again next frame": `begin` at the top of a frame, `wait` at the
/// bottom sleeps out whatever is left of it.
pub struct FramePacer {
    frame: Duration,
    frame_start: Instant,
}

impl FramePacer {
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            frame_start: Instant::now(),
        }
    }

    pub fn begin(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Time left in the current frame, zero if it overran.
    pub fn remaining(&self) -> Duration {
        self.frame.saturating_sub(self.frame_start.elapsed())
    }

    pub fn wait(&self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }
}
