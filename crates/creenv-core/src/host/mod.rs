//! Frame callback sources.
//!
//! A host fires the frames the scheduler requests. The window runtime
//! (`crate::window`) is one host; `HeadlessHost` is a windowless one.

mod headless;

pub use headless::HeadlessHost;

/// Request-next-frame primitive of a host.
///
/// Each call asks the host to invoke `FrameScheduler::update` once more on its
/// next refresh. Requests made before that refresh coalesce.
pub trait FrameRequester {
    fn request_frame(&mut self);
}
