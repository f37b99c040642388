use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source measured from an arbitrary origin.
pub trait TimeSource {
    /// Returns the time elapsed since the source's origin.
    ///
    /// Successive calls must never go backwards.
    fn elapsed(&self) -> Duration;
}

/// Wall-clock source backed by `Instant`, started at construction.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::start()
    }
}

impl TimeSource for Stopwatch {
    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Manually driven source.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// hand another to a `FrameClock`.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<Duration>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.now.set(self.now.get() + step);
    }

    /// Sets the absolute elapsed time. Values earlier than the current time are ignored.
    pub fn set(&self, at: Duration) {
        if at > self.now.get() {
            self.now.set(at);
        }
    }
}

impl TimeSource for ManualTime {
    fn elapsed(&self) -> Duration {
        self.now.get()
    }
}
