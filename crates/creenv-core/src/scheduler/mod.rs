//! Frame scheduler.
//!
//! Bootstraps a sketch and gates host frame callbacks down to the target
//! framerate.

mod frame_scheduler;

pub use frame_scheduler::{FrameScheduler, SchedulerConfig, SchedulerStatus, TickOutcome};
