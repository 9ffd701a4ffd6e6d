use super::limiter::FramerateError;

/// Default report period, in milliseconds.
const DEFAULT_PERIOD_MS: f64 = 1000.0;

/// Achieved frame rate over a rolling report period.
///
/// Fed with the timestamp of every accepted frame. Because the limiter never
/// carries time over from skipped ticks, the measured rate sits at or below
/// the target rate.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    period_ms: f64,
    window_start_ms: Option<f64>,
    frames_in_window: u32,
    last_report: Option<f64>,
}

impl FpsCounter {
    /// Rejects a zero, negative or non-finite period.
    pub fn new(period_ms: f64) -> Result<Self, FramerateError> {
        if !period_ms.is_finite() || period_ms <= 0.0 {
            return Err(FramerateError::ReportPeriod(period_ms));
        }
        Ok(Self::with_valid_period(period_ms))
    }

    fn with_valid_period(period_ms: f64) -> Self {
        Self {
            period_ms,
            window_start_ms: None,
            frames_in_window: 0,
            last_report: None,
        }
    }

    /// Records one frame at `now_ms`. Returns a fresh measurement when the
    /// report period has elapsed.
    pub fn record(&mut self, now_ms: f64) -> Option<f64> {
        let Some(start) = self.window_start_ms else {
            self.window_start_ms = Some(now_ms);
            return None;
        };

        self.frames_in_window += 1;

        let elapsed = now_ms - start;
        if elapsed < self.period_ms {
            return None;
        }

        let fps = f64::from(self.frames_in_window) * 1000.0 / elapsed;
        self.window_start_ms = Some(now_ms);
        self.frames_in_window = 0;
        self.last_report = Some(fps);
        Some(fps)
    }

    /// Most recent measurement, if a full period has been observed.
    pub fn fps(&self) -> Option<f64> {
        self.last_report
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::with_valid_period(DEFAULT_PERIOD_MS)
    }
}
