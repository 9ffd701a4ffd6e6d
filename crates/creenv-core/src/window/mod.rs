//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires redraw requests to the
//! frame scheduler.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
