use std::future::Future;

use super::ctx::{FrameCtx, InitCtx};

/// Control directive returned by `Sketch::render`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    /// Stop the recurring schedule after this frame.
    Exit,
}

/// Hooks implemented by a rendering sketch and driven by `FrameScheduler`.
///
/// Every method has a default, so an empty `impl Sketch for T {}` is a valid
/// (if invisible) sketch.
pub trait Sketch {
    /// Asynchronous setup, awaited once by `FrameScheduler::bootstrap` before
    /// the first tick.
    ///
    /// The scheduler has already established the timer baseline when this is
    /// called, so overrides do not need to touch timing state. Returning an
    /// error routes it to [`Sketch::error`] and the loop never starts.
    fn init(&mut self, ctx: &mut InitCtx<'_>) -> impl Future<Output = anyhow::Result<()>> {
        let _ = ctx;
        async { Ok(()) }
    }

    /// Called once per accepted frame.
    fn render(&mut self, frame: &mut FrameCtx<'_>) -> AppControl {
        let _ = frame;
        AppControl::Continue
    }

    /// Receives initialization failures.
    fn error(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
    }
}
