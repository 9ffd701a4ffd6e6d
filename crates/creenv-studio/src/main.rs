use std::f64::consts::TAU;

use anyhow::{bail, Result};
use clap::Parser;
use winit::dpi::LogicalSize;

use creenv_core::core::{AppControl, FrameCtx, InitCtx, Sketch};
use creenv_core::host::HeadlessHost;
use creenv_core::logging::{init_logging, LoggingConfig};
use creenv_core::scheduler::{FrameScheduler, SchedulerStatus};
use creenv_core::window::{Runtime, RuntimeConfig};

/// Headless runs simulate a high refresh display so the limiter has work to do.
const HEADLESS_REFRESH_HZ: f64 = 144.0;

const DEFAULT_HEADLESS_FRAMES: u64 = 150;

/// Backstop for the headless loop: enough ticks for `frames` renders at one
/// frame per second or faster, plus slack.
fn headless_tick_limit(frames: u64) -> u64 {
    frames.saturating_mul(HEADLESS_REFRESH_HZ as u64).saturating_add(1000)
}

/// A bank of oscillators sampled once per rendered frame.
struct Pulse {
    framerate: f64,
    frame_limit: Option<u64>,
    phases: Vec<f64>,
}

impl Pulse {
    fn new(framerate: f64, frame_limit: Option<u64>) -> Self {
        Self { framerate, frame_limit, phases: Vec::new() }
    }

    fn level(&self, t_sec: f64) -> f64 {
        let sum: f64 = self.phases.iter().map(|p| (t_sec + p).sin()).sum();
        sum / self.phases.len().max(1) as f64
    }
}

impl Sketch for Pulse {
    async fn init(&mut self, ctx: &mut InitCtx<'_>) -> Result<()> {
        self.phases = (0..16).map(|i| f64::from(i) / 16.0 * TAU * 0.25).collect();
        ctx.set_framerate(self.framerate)?;
        log::info!("pulse ready: {} oscillators", self.phases.len());
        Ok(())
    }

    fn render(&mut self, frame: &mut FrameCtx<'_>) -> AppControl {
        let t = frame.time;

        if t.frame_count % 30 == 0 {
            let achieved = frame
                .achieved_fps()
                .map_or_else(|| "n/a".to_string(), |fps| format!("{fps:.1}"));
            log::info!(
                "frame {:>5}  dt {:>6.2} ms  level {:+.3}  fps {}",
                t.frame_count,
                t.delta_ms,
                self.level(t.now_ms / 1000.0),
                achieved
            );
        }

        if self.frame_limit == Some(t.frame_count) {
            return AppControl::Exit;
        }
        AppControl::Continue
    }
}

/// Frame-limited oscillator demo.
#[derive(Parser, Debug)]
#[command(name = "creenv-studio", version)]
struct Options {
    /// Run without a window, paced by a simulated display refresh.
    #[arg(long, default_value_t = false)]
    headless: bool,

    /// Target framerate, in frames per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Stop after this many rendered frames (headless default: 150).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    frames: Option<u64>,
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let opts = Options::parse();

    if opts.headless {
        // Without a window only the frame limit ends the loop.
        let frames = opts.frames.unwrap_or(DEFAULT_HEADLESS_FRAMES);
        let mut scheduler = FrameScheduler::new(Pulse::new(opts.fps, Some(frames)));
        let mut host =
            HeadlessHost::new(HEADLESS_REFRESH_HZ)?.with_tick_limit(headless_tick_limit(frames));

        if scheduler.bootstrap(&mut host) != SchedulerStatus::Running {
            bail!("pulse failed to initialize");
        }

        let ticks = host.run(&mut scheduler);
        if scheduler.is_running() {
            log::warn!("tick limit reached before frame {frames}");
        }
        log::info!(
            "{} frames rendered from {} host ticks",
            scheduler.state().frame_count(),
            ticks + 1
        );
        return Ok(());
    }

    let config = RuntimeConfig {
        title: "creenv studio".to_string(),
        initial_size: LogicalSize::new(640.0, 360.0),
    };

    let scheduler = Runtime::run(config, FrameScheduler::new(Pulse::new(opts.fps, opts.frames)))?;
    log::info!("window closed after {} frames", scheduler.state().frame_count());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, clap::Error> {
        Options::try_parse_from(std::iter::once("creenv-studio").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let opts = parse(&[]).unwrap();
        assert!(!opts.headless);
        assert_eq!(opts.fps, 30.0);
        assert_eq!(opts.frames, None);
    }

    #[test]
    fn headless_with_limits() {
        let opts = parse(&["--headless", "--fps", "24", "--frames", "10"]).unwrap();
        assert!(opts.headless);
        assert_eq!(opts.fps, 24.0);
        assert_eq!(opts.frames, Some(10));
    }

    #[test]
    fn zero_frames_rejected() {
        assert!(parse(&["--headless", "--frames", "0"]).is_err());
    }

    #[test]
    fn unknown_argument_rejected() {
        assert!(parse(&["--fast"]).is_err());
    }

    #[test]
    fn tick_limit_covers_requested_frames() {
        assert!(headless_tick_limit(1) > 1);
        assert_eq!(headless_tick_limit(u64::MAX), u64::MAX);
    }
}
