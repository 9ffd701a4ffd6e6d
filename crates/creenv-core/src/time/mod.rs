//! Time subsystem.
//!
//! Clock-free framerate gating plus the clocks that feed it.
//! Intended usage:
//! - one `FrameLimiter` per scheduler
//! - call `tick(now_ms)` once per host frame callback; render only when it returns `true`

mod clock;
mod fps;
mod limiter;

pub use clock::{Clock, ManualClock, SystemClock};
pub use fps::FpsCounter;
pub use limiter::{FrameLimiter, FrameTime, FramerateError, DEFAULT_FRAMERATE};

pub(crate) use limiter::validate_rate;
