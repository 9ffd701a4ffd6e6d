use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Millisecond time source sampled by the scheduler on every tick.
///
/// The scheduler never uses timestamps provided by the host; it always asks its
/// own clock.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Monotonic wall clock, in milliseconds since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock.
///
/// Clones share the same time, so a test can keep one handle and give the other
/// to a scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self { now: Rc::new(Cell::new(start_ms)) }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
