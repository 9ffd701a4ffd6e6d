//! Core sketch-facing contracts.
//!
//! This module defines the interface between the scheduler and user sketches:
//! the hook trait and the contexts handed to each hook.

mod app;
mod ctx;

pub use app::{AppControl, Sketch};
pub use ctx::{FrameCtx, InitCtx};

pub(crate) use ctx::apply_framerate;
