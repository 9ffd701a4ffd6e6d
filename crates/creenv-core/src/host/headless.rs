use std::time::Duration;

use crate::core::Sketch;
use crate::scheduler::{FrameScheduler, TickOutcome};
use crate::time::{validate_rate, Clock, FramerateError};

use super::FrameRequester;

/// Windowless host firing requested frames at a fixed refresh rate.
///
/// Emulates a display refresh callback: the scheduler requests a frame, the
/// host waits one refresh interval and calls `update`. The loop ends when no
/// frame is pending (the scheduler stopped) or the optional tick limit is hit.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    refresh: Duration,
    tick_limit: Option<u64>,
    pending: bool,
    ticks: u64,
}

impl HeadlessHost {
    /// Rejects a zero, negative or non-finite refresh rate.
    pub fn new(refresh_hz: f64) -> Result<Self, FramerateError> {
        let refresh_hz = validate_rate(refresh_hz)?;
        Ok(Self::with_refresh(Duration::from_secs_f64(1.0 / refresh_hz)))
    }

    fn with_refresh(refresh: Duration) -> Self {
        Self {
            refresh,
            tick_limit: None,
            pending: false,
            ticks: 0,
        }
    }

    /// Caps the total number of ticks `run` will fire.
    pub fn with_tick_limit(mut self, limit: u64) -> Self {
        self.tick_limit = Some(limit);
        self
    }

    /// Whether a frame has been requested and not fired yet.
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Total ticks fired so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh
    }

    /// Fires the pending frame immediately, without waiting for the refresh
    /// interval. Returns `None` if nothing was requested.
    pub fn step<S: Sketch, C: Clock>(&mut self, scheduler: &mut FrameScheduler<S, C>) -> Option<TickOutcome> {
        if !self.pending {
            return None;
        }

        self.pending = false;
        self.ticks += 1;
        Some(scheduler.update(self))
    }

    /// Paced loop. Returns the number of ticks fired by this call.
    pub fn run<S: Sketch, C: Clock>(&mut self, scheduler: &mut FrameScheduler<S, C>) -> u64 {
        let start = self.ticks;

        while self.pending && !self.limit_reached() {
            std::thread::sleep(self.refresh);
            self.step(scheduler);
        }

        log::debug!(
            "headless host idle after {} ticks ({} frames rendered)",
            self.ticks - start,
            scheduler.state().frame_count()
        );

        self.ticks - start
    }

    fn limit_reached(&self) -> bool {
        self.tick_limit.is_some_and(|limit| self.ticks >= limit)
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::with_refresh(Duration::from_secs_f64(1.0 / 60.0))
    }
}

impl FrameRequester for HeadlessHost {
    fn request_frame(&mut self) {
        self.pending = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AppControl, FrameCtx};
    use crate::scheduler::SchedulerStatus;
    use crate::time::ManualClock;

    struct Counter {
        frames: u64,
        stop_at: u64,
    }

    impl Sketch for Counter {
        fn render(&mut self, _frame: &mut FrameCtx<'_>) -> AppControl {
            self.frames += 1;
            if self.frames == self.stop_at {
                AppControl::Exit
            } else {
                AppControl::Continue
            }
        }
    }

    fn counter(stop_at: u64) -> Counter {
        Counter { frames: 0, stop_at }
    }

    #[test]
    fn rejects_invalid_refresh_rate() {
        assert_eq!(HeadlessHost::new(0.0).unwrap_err(), FramerateError::NotPositive(0.0));
        assert_eq!(HeadlessHost::new(-60.0).unwrap_err(), FramerateError::NotPositive(-60.0));
        assert!(matches!(HeadlessHost::new(f64::NAN), Err(FramerateError::NotFinite(_))));
    }

    #[test]
    fn refresh_interval_from_hz() {
        let host = HeadlessHost::new(250.0).unwrap();
        assert_eq!(host.refresh_interval(), Duration::from_millis(4));
        assert_eq!(HeadlessHost::default().refresh_interval(), Duration::from_secs_f64(1.0 / 60.0));
    }

    #[test]
    fn request_marks_pending() {
        let mut host = HeadlessHost::default();
        assert!(!host.pending());
        host.request_frame();
        host.request_frame();
        assert!(host.pending());
    }

    #[test]
    fn step_without_request_does_nothing() {
        let mut host = HeadlessHost::default();
        let mut s = FrameScheduler::with_clock(counter(0), ManualClock::new(0.0));
        assert_eq!(host.step(&mut s), None);
        assert_eq!(host.ticks(), 0);
    }

    #[test]
    fn bootstrap_leaves_one_frame_pending() {
        let mut host = HeadlessHost::default();
        let mut s = FrameScheduler::with_clock(counter(0), ManualClock::new(0.0));
        assert_eq!(s.bootstrap(&mut host), SchedulerStatus::Running);
        assert!(host.pending());
    }

    #[test]
    fn step_drives_scheduler_with_manual_clock() {
        let clock = ManualClock::new(0.0);
        let mut host = HeadlessHost::new(240.0).unwrap();
        let mut s = FrameScheduler::with_clock(counter(0), clock.clone());
        s.bootstrap(&mut host);

        let mut outcomes = Vec::new();
        for _ in 0..8 {
            clock.advance(5.0);
            outcomes.extend(host.step(&mut s));
        }

        use crate::scheduler::TickOutcome::{Rendered, Skipped};
        assert_eq!(
            outcomes,
            vec![Skipped, Skipped, Skipped, Rendered, Skipped, Skipped, Skipped, Rendered]
        );
        assert_eq!(host.ticks(), 8);
        assert!(host.pending());
    }

    #[test]
    fn run_honors_tick_limit() {
        let mut host = HeadlessHost::new(1000.0).unwrap().with_tick_limit(5);
        let mut s = FrameScheduler::new(counter(0));
        s.bootstrap(&mut host);

        assert_eq!(host.run(&mut s), 5);
        assert!(s.is_running());
        assert!(host.pending());
    }

    #[test]
    fn step_until_sketch_exits() {
        let clock = ManualClock::new(0.0);
        let mut host = HeadlessHost::new(1000.0).unwrap();
        let mut s = FrameScheduler::with_clock(counter(3), clock.clone());
        s.bootstrap(&mut host);

        // Every tick is far enough apart to render.
        while host.pending() {
            clock.advance(20.0);
            host.step(&mut s);
        }

        assert_eq!(s.sketch().frames, 3);
        assert_eq!(s.status(), SchedulerStatus::Stopped);
        assert!(!host.pending());
        // Three rendered ticks, then one inactive tick for the last request.
        assert_eq!(host.ticks(), 4);
    }

    #[test]
    fn run_returns_once_scheduler_stops() {
        let mut host = HeadlessHost::new(1000.0).unwrap().with_tick_limit(10_000);
        let mut s = FrameScheduler::new(counter(2));
        s.bootstrap(&mut host);

        let ticks = host.run(&mut s);
        assert_eq!(s.sketch().frames, 2);
        assert!(!host.pending());
        assert!(ticks < 10_000);
    }
}
