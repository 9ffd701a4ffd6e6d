use crate::core::{apply_framerate, AppControl, FrameCtx, InitCtx, Sketch};
use crate::host::FrameRequester;
use crate::time::{Clock, FpsCounter, FrameLimiter, FramerateError, SystemClock, DEFAULT_FRAMERATE};

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Target framerate, in frames per second.
    pub framerate: f64,

    /// Period over which the achieved framerate is measured, in milliseconds.
    pub fps_report_period_ms: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            framerate: DEFAULT_FRAMERATE,
            fps_report_period_ms: 1000.0,
        }
    }
}

/// Lifecycle of a scheduler.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SchedulerStatus {
    /// Constructed, `bootstrap` not called yet.
    Idle,
    /// Initialized; every tick re-registers with the host.
    Running,
    /// `Sketch::init` failed; the loop never started.
    Failed,
    /// Stopped explicitly or by `AppControl::Exit`.
    Stopped,
}

/// Result of one tick driver invocation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickOutcome {
    /// Delta exceeded the target interval; `render` was called.
    Rendered,
    /// Too early; the frame was skipped.
    Skipped,
    /// The scheduler is not running; nothing was re-registered.
    Inactive,
}

/// Drives a [`Sketch`] from host frame callbacks at a limited framerate.
///
/// The scheduler is an explicit state machine: a host calls
/// [`FrameScheduler::update`] whenever a frame it requested fires, and `update`
/// requests the next one before doing anything else. Ticks arriving sooner than
/// the target interval after the last rendered frame are skipped.
///
/// ```rust,ignore
/// let mut scheduler = FrameScheduler::new(MySketch::default());
/// let mut host = HeadlessHost::new(144.0)?;
/// scheduler.bootstrap(&mut host);
/// host.run(&mut scheduler);
/// ```
pub struct FrameScheduler<S, C = SystemClock> {
    sketch: S,
    clock: C,
    limiter: FrameLimiter,
    fps: FpsCounter,
    status: SchedulerStatus,
}

impl<S: Sketch> FrameScheduler<S, SystemClock> {
    /// Creates a scheduler on the system clock with the default framerate.
    pub fn new(sketch: S) -> Self {
        Self::with_clock(sketch, SystemClock::new())
    }
}

impl<S: Sketch, C: Clock> FrameScheduler<S, C> {
    pub fn with_clock(sketch: S, clock: C) -> Self {
        Self {
            sketch,
            clock,
            limiter: FrameLimiter::new(),
            fps: FpsCounter::default(),
            status: SchedulerStatus::Idle,
        }
    }

    /// Fails on an invalid framerate or fps report period.
    pub fn with_config(sketch: S, clock: C, config: SchedulerConfig) -> Result<Self, FramerateError> {
        let mut scheduler = Self::with_clock(sketch, clock);
        scheduler.limiter.set_framerate(config.framerate)?;
        scheduler.fps = FpsCounter::new(config.fps_report_period_ms)?;
        Ok(scheduler)
    }

    /// Runs `Sketch::init` to completion, then the first tick.
    ///
    /// Blocks the calling thread while the init future is pending. Hosts that
    /// own an executor should use [`FrameScheduler::bootstrap_async`].
    pub fn bootstrap(&mut self, host: &mut dyn FrameRequester) -> SchedulerStatus {
        pollster::block_on(self.bootstrap_async(host))
    }

    /// Starts the timer, awaits `Sketch::init`, then ticks once.
    ///
    /// Must be called exactly once; later calls are ignored. An init error is
    /// handed to `Sketch::error` and the loop never starts.
    pub async fn bootstrap_async(&mut self, host: &mut dyn FrameRequester) -> SchedulerStatus {
        if self.status != SchedulerStatus::Idle {
            log::warn!("bootstrap called while {:?}; ignoring", self.status);
            return self.status;
        }

        self.limiter.start(self.clock.now_ms());

        let result = {
            let mut ctx = InitCtx::new(&mut self.limiter);
            self.sketch.init(&mut ctx).await
        };

        match result {
            Ok(()) => {
                self.status = SchedulerStatus::Running;
                log::info!(
                    "sketch initialized; rendering at {:.1} fps",
                    self.limiter.framerate()
                );
                self.update(host);
            }
            Err(err) => {
                self.status = SchedulerStatus::Failed;
                self.sketch.error(err);
            }
        }

        self.status
    }

    /// Tick driver. Call once per host frame callback.
    ///
    /// Re-registers with `host` first, so the schedule survives a panicking
    /// `render`.
    pub fn update(&mut self, host: &mut dyn FrameRequester) -> TickOutcome {
        if self.status != SchedulerStatus::Running {
            return TickOutcome::Inactive;
        }

        host.request_frame();

        let now = self.clock.now_ms();
        if !self.limiter.tick(now) {
            log::trace!("frame skipped (delta {:.3} ms)", self.limiter.delta_ms());
            return TickOutcome::Skipped;
        }

        if let Some(fps) = self.fps.record(now) {
            log::debug!("achieved {fps:.1} fps (target {:.1})", self.limiter.framerate());
        }

        let control = {
            let mut frame = FrameCtx::new(&mut self.limiter, self.fps.fps());
            self.sketch.render(&mut frame)
        };

        if control == AppControl::Exit {
            self.stop();
        }

        TickOutcome::Rendered
    }

    /// Sets the target framerate in frames per second.
    pub fn set_framerate(&mut self, fps: f64) -> Result<(), FramerateError> {
        apply_framerate(&mut self.limiter, fps)
    }

    /// Tears the recurring schedule down. The next tick does not re-register.
    pub fn stop(&mut self) {
        match self.status {
            SchedulerStatus::Idle | SchedulerStatus::Running => {
                log::debug!("scheduler stopped after {} frames", self.limiter.frame_count());
                self.status = SchedulerStatus::Stopped;
            }
            SchedulerStatus::Failed | SchedulerStatus::Stopped => {}
        }
    }

    /// Elapsed milliseconds between the latest tick and the last rendered frame.
    pub fn compute_delta_ms(&self) -> f64 {
        self.limiter.compute_delta_ms()
    }

    pub fn status(&self) -> SchedulerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SchedulerStatus::Running
    }

    pub fn state(&self) -> &FrameLimiter {
        &self.limiter
    }

    pub fn achieved_fps(&self) -> Option<f64> {
        self.fps.fps()
    }

    pub fn sketch(&self) -> &S {
        &self.sketch
    }

    pub fn sketch_mut(&mut self) -> &mut S {
        &mut self.sketch
    }

    pub fn into_sketch(self) -> S {
        self.sketch
    }
}
