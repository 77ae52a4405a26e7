//! Frame loop between a host and a world
//!
//! The host owns the window, the keyboard and the clock. Each frame the
//! runner asks it for input, ticks the world with the time the previous
//! frame took, hands the host a snapshot to draw, and then waits on the
//! host's frame clock for the next dt.

use crate::sim::{BodySnapshot, TickInput, TickOutcome, World, tick};

/// Everything the host needs after one frame
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub frame: u64,
    pub outcome: TickOutcome,
    /// Seconds this frame advanced the simulation by
    pub dt: f32,
    /// Bodies after integration, safe to read from any thread
    pub snapshot: Vec<BodySnapshot>,
}

/// Host side of the loop
pub trait Host {
    /// Key state and quit request for the coming tick
    fn poll_input(&mut self, world: &World) -> TickInput;

    /// Draw (or otherwise consume) a finished frame
    fn present(&mut self, report: &FrameReport);

    /// Block until the next frame is due; returns seconds elapsed since the
    /// previous call
    fn wait_frame(&mut self, fps: u32) -> f32;
}

/// Drives a world one frame at a time
#[derive(Debug, Clone)]
pub struct Runner {
    pub world: World,
    dt: f32,
    prev_dt: f32,
}

impl Runner {
    /// The first frame uses the nominal frame time
    pub fn new(world: World) -> Self {
        let dt = world.config.frame_dt();
        Self {
            world,
            dt,
            prev_dt: dt,
        }
    }

    /// Seconds the next frame will advance by
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Seconds the last completed frame advanced by
    pub fn prev_dt(&self) -> f32 {
        self.prev_dt
    }

    /// Record how long the host clock says the last frame took.
    ///
    /// Non-positive or non-finite readings keep the previous dt: a zero dt
    /// would blow up `Kick` responses.
    pub fn set_elapsed(&mut self, elapsed: f32) {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.dt = elapsed;
        } else {
            log::warn!("Ignoring bad frame time {}, keeping dt {}", elapsed, self.dt);
        }
    }

    /// Tick once with the current dt
    pub fn frame(&mut self, input: &TickInput) -> FrameReport {
        let dt = self.dt;
        let outcome = tick(&mut self.world, input, dt);
        self.prev_dt = dt;
        FrameReport {
            frame: self.world.frame,
            outcome,
            dt,
            snapshot: self.world.snapshot(),
        }
    }

    /// Loop until the host quits or `max_frames` frames have run.
    ///
    /// Returns the number of frames ticked.
    pub fn run<H: Host>(&mut self, host: &mut H, max_frames: Option<u64>) -> u64 {
        let fps = self.world.config.fps;
        log::info!("Running at {} fps with {} bodies", fps, self.world.len());

        let mut frames = 0;
        while max_frames.is_none_or(|max| frames < max) {
            let input = host.poll_input(&self.world);
            let report = self.frame(&input);
            if report.outcome == TickOutcome::Quit {
                break;
            }
            frames += 1;
            host.present(&report);

            let elapsed = host.wait_frame(fps);
            self.set_elapsed(elapsed);
        }

        log::info!("Stopped after {} frames", frames);
        frames
    }
}
