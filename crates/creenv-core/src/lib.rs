//! creenv core crate.
//!
//! Frame scheduling base for rendering sketches: a [`core::Sketch`] is
//! bootstrapped once (awaiting its asynchronous `init`), then rendered from
//! host frame callbacks at a limited framerate by a
//! [`scheduler::FrameScheduler`].

pub mod core;
pub mod host;
pub mod scheduler;
pub mod time;
pub mod window;

pub mod logging;
