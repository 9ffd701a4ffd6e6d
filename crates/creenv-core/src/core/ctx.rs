use crate::time::{FrameLimiter, FrameTime, FramerateError};

/// Context passed to `Sketch::init`.
pub struct InitCtx<'a> {
    limiter: &'a mut FrameLimiter,
}

impl<'a> InitCtx<'a> {
    pub(crate) fn new(limiter: &'a mut FrameLimiter) -> Self {
        Self { limiter }
    }

    /// Sets the target framerate in frames per second.
    pub fn set_framerate(&mut self, fps: f64) -> Result<(), FramerateError> {
        apply_framerate(self.limiter, fps)
    }

    pub fn framerate(&self) -> f64 {
        self.limiter.framerate()
    }
}

/// Per-frame context passed to `Sketch::render`.
pub struct FrameCtx<'a> {
    pub time: FrameTime,
    limiter: &'a mut FrameLimiter,
    achieved_fps: Option<f64>,
}

impl<'a> FrameCtx<'a> {
    pub(crate) fn new(limiter: &'a mut FrameLimiter, achieved_fps: Option<f64>) -> Self {
        Self {
            time: limiter.frame_time(),
            limiter,
            achieved_fps,
        }
    }

    /// Sets the target framerate. The next tick is gated by the new interval.
    pub fn set_framerate(&mut self, fps: f64) -> Result<(), FramerateError> {
        apply_framerate(self.limiter, fps)
    }

    pub fn framerate(&self) -> f64 {
        self.limiter.framerate()
    }

    /// Measured rate of accepted frames over the last full report period.
    pub fn achieved_fps(&self) -> Option<f64> {
        self.achieved_fps
    }
}

pub(crate) fn apply_framerate(limiter: &mut FrameLimiter, fps: f64) -> Result<(), FramerateError> {
    match limiter.set_framerate(fps) {
        Ok(()) => {
            log::debug!("target framerate set to {fps} fps ({:.3} ms)", limiter.target_interval_ms());
            Ok(())
        }
        Err(e) => {
            log::warn!("{e}; keeping {:.3} ms interval", limiter.target_interval_ms());
            Err(e)
        }
    }
}
