use std::fmt;

/// Default target framerate, in frames per second.
pub const DEFAULT_FRAMERATE: f64 = 60.0;

/// Frame timing snapshot handed to `Sketch::render`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Milliseconds elapsed since the previously accepted frame.
    pub delta_ms: f64,

    /// Clock timestamp sampled at the tick, in milliseconds.
    pub now_ms: f64,

    /// Number of accepted frames, including this one.
    pub frame_count: u64,
}

/// Rejected framerate, refresh rate or report period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FramerateError {
    /// Zero or negative frames per second.
    NotPositive(f64),
    /// NaN or infinite frames per second.
    NotFinite(f64),
    /// Zero, negative or non-finite achieved-fps report period, in milliseconds.
    ReportPeriod(f64),
}

impl fmt::Display for FramerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive(fps) => write!(f, "framerate must be positive, got {fps}"),
            Self::NotFinite(fps) => write!(f, "framerate must be finite, got {fps}"),
            Self::ReportPeriod(ms) => write!(f, "fps report period must be positive and finite, got {ms} ms"),
        }
    }
}

impl std::error::Error for FramerateError {}

/// Checks a frames-per-second style rate: finite and strictly positive.
pub(crate) fn validate_rate(rate: f64) -> Result<f64, FramerateError> {
    if !rate.is_finite() {
        return Err(FramerateError::NotFinite(rate));
    }
    if rate <= 0.0 {
        return Err(FramerateError::NotPositive(rate));
    }
    Ok(rate)
}

/// Framerate gate and delta-time bookkeeping.
///
/// `FrameLimiter` is the whole scheduler state. It is clock-free: every
/// operation takes the timestamp it should act on, which keeps the gating math
/// testable without sleeping.
///
/// Gating is measured against the last *accepted* frame, not the last tick, and
/// a tick is accepted only when its delta strictly exceeds the target interval.
/// Skipped ticks carry nothing over, so the achieved rate is at most the target
/// rate and drift is not corrected.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    frame_count: u64,
    target_interval_ms: f64,
    last_accepted_ms: Option<f64>,
    current_ms: Option<f64>,
    delta_ms: f64,
}

impl FrameLimiter {
    /// Creates a limiter targeting [`DEFAULT_FRAMERATE`], with no timestamps yet.
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            target_interval_ms: 1000.0 / DEFAULT_FRAMERATE,
            last_accepted_ms: None,
            current_ms: None,
            delta_ms: 0.0,
        }
    }

    /// Sets the target framerate, storing `1000 / fps` as the frame interval.
    ///
    /// Non-finite or non-positive values are rejected and the current interval
    /// is kept.
    pub fn set_framerate(&mut self, fps: f64) -> Result<(), FramerateError> {
        let fps = validate_rate(fps)?;
        self.target_interval_ms = 1000.0 / fps;
        Ok(())
    }

    /// Establishes the timer baseline: the last accepted frame is `now_ms` and
    /// the delta is reset.
    pub fn start(&mut self, now_ms: f64) {
        self.last_accepted_ms = Some(now_ms);
        self.delta_ms = 0.0;
    }

    /// Processes one tick at `now_ms`. Returns `true` if the frame is accepted.
    ///
    /// A tick on a limiter that was never started only sets the baseline.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.current_ms = Some(now_ms);

        if self.last_accepted_ms.is_none() {
            self.start(now_ms);
            return false;
        }

        self.delta_ms = self.compute_delta_ms();

        if self.delta_ms > self.target_interval_ms {
            self.last_accepted_ms = Some(now_ms);
            self.frame_count += 1;
            return true;
        }

        false
    }

    /// Elapsed milliseconds between the current tick and the last accepted
    /// frame; `0.0` until both are known.
    pub fn compute_delta_ms(&self) -> f64 {
        match (self.current_ms, self.last_accepted_ms) {
            (Some(current), Some(last)) => current - last,
            _ => 0.0,
        }
    }

    /// Snapshot of the most recent tick.
    pub fn frame_time(&self) -> FrameTime {
        FrameTime {
            delta_ms: self.delta_ms,
            now_ms: self.current_ms.unwrap_or_default(),
            frame_count: self.frame_count,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn target_interval_ms(&self) -> f64 {
        self.target_interval_ms
    }

    /// Target framerate derived from the interval.
    pub fn framerate(&self) -> f64 {
        1000.0 / self.target_interval_ms
    }

    pub fn last_accepted_ms(&self) -> Option<f64> {
        self.last_accepted_ms
    }

    pub fn current_ms(&self) -> Option<f64> {
        self.current_ms
    }

    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self::new()
    }
}
