use anyhow::{anyhow, Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::Sketch;
use crate::host::FrameRequester;
use crate::scheduler::{FrameScheduler, SchedulerStatus};
use crate::time::Clock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "creenv".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the windowed runtime.
///
/// `Window::request_redraw` is the request-next-frame primitive and every
/// `RedrawRequested` event is one scheduler tick.
pub struct Runtime;

impl Runtime {
    /// Opens a window, bootstraps `scheduler` and ticks it until it stops or
    /// the window is closed. Returns the scheduler so callers can inspect the
    /// sketch afterwards.
    pub fn run<S, C>(config: RuntimeConfig, scheduler: FrameScheduler<S, C>) -> Result<FrameScheduler<S, C>>
    where
        S: Sketch + 'static,
        C: Clock + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, scheduler);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        if let Some(err) = state.failure.take() {
            return Err(err);
        }

        Ok(state.scheduler)
    }
}

/// Frame requests against a single window.
struct WindowRequester<'a>(&'a Window);

impl FrameRequester for WindowRequester<'_> {
    fn request_frame(&mut self) {
        self.0.request_redraw();
    }
}

/// Error for a bootstrap that did not start the loop.
///
/// The init error itself is consumed by `Sketch::error`, so this only points
/// at it.
fn bootstrap_failure(status: SchedulerStatus) -> Option<anyhow::Error> {
    match status {
        SchedulerStatus::Running => None,
        SchedulerStatus::Failed => Some(anyhow!(
            "sketch initialization failed (status {status:?}); cause reported through Sketch::error"
        )),
        SchedulerStatus::Idle | SchedulerStatus::Stopped => Some(anyhow!(
            "sketch did not start (status {status:?})"
        )),
    }
}

struct AppState<S, C> {
    config: RuntimeConfig,
    scheduler: FrameScheduler<S, C>,

    window: Option<Window>,
    failure: Option<anyhow::Error>,
}

impl<S, C> AppState<S, C>
where
    S: Sketch,
    C: Clock,
{
    fn new(config: RuntimeConfig, scheduler: FrameScheduler<S, C>) -> Self {
        Self {
            config,
            scheduler,
            window: None,
            failure: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.scheduler.stop();
        event_loop.exit();
    }
}

impl<S, C> ApplicationHandler for AppState<S, C>
where
    S: Sketch,
    C: Clock,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e.context("failed to create initial window"));
            return;
        }

        let Some(window) = self.window.as_ref() else {
            return;
        };

        let status = self.scheduler.bootstrap(&mut WindowRequester(window));
        if let Some(err) = bootstrap_failure(status) {
            self.failure = Some(err);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Redraws are only requested by the scheduler itself.
        event_loop.set_control_flow(ControlFlow::Wait);

        if self.window.is_some() && !self.scheduler.is_running() {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        if window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.scheduler.stop();
                self.window = None;
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                self.scheduler.update(&mut WindowRequester(window));
                if !self.scheduler.is_running() {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_bootstrap_is_not_a_failure() {
        assert!(bootstrap_failure(SchedulerStatus::Running).is_none());
    }

    #[test]
    fn failed_bootstrap_names_status_and_error_hook() {
        let msg = bootstrap_failure(SchedulerStatus::Failed).unwrap().to_string();
        assert!(msg.contains("Failed"));
        assert!(msg.contains("Sketch::error"));
    }

    #[test]
    fn stopped_before_start_is_reported() {
        let msg = bootstrap_failure(SchedulerStatus::Stopped).unwrap().to_string();
        assert!(msg.contains("Stopped"));
    }
}
