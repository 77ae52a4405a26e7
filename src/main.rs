//! Swimball headless entry point
//!
//! Runs the demo scene without a window. A seeded autopilot stands in for
//! the keyboard, and the final body snapshot is printed as JSON.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use swimball::runner::{FrameReport, Host, Runner};
use swimball::sim::{Action, TickInput, World};
use swimball::SimConfig;

/// How often the autopilot picks a new set of keys
const AUTOPILOT_HOLD_FRAMES: u64 = 20;
/// How often a progress line is logged
const LOG_EVERY_FRAMES: u64 = 60;

/// Headless swimball run
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON config file; defaults are used when omitted
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,
    /// Autopilot seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,
    /// Sleep between frames to hold the configured fps
    #[arg(long)]
    realtime: bool,
}

/// Presses random movement keys, occasionally diving
struct Autopilot {
    rng: Pcg32,
    held: TickInput,
    frame: u64,
    realtime: bool,
    last_wait: Instant,
}

impl Autopilot {
    fn new(seed: u64, realtime: bool) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            held: TickInput::default(),
            frame: 0,
            realtime,
            last_wait: Instant::now(),
        }
    }

    fn pick_keys(&mut self, world: &World) -> TickInput {
        let bindings = world.input.bindings();
        let keys: Vec<_> = bindings
            .pairs()
            .into_iter()
            .filter(|&(action, _)| {
                let chance = if action == Action::Dive { 0.25 } else { 0.4 };
                self.rng.random_bool(chance)
            })
            .map(|(_, key)| key)
            .collect();
        TickInput::with_keys(&keys)
    }
}

impl Host for Autopilot {
    fn poll_input(&mut self, world: &World) -> TickInput {
        if self.frame % AUTOPILOT_HOLD_FRAMES == 0 {
            self.held = self.pick_keys(world);
            log::debug!("Autopilot holding {:?}", self.held.keys_down);
        }
        self.frame += 1;
        self.held.clone()
    }

    fn present(&mut self, report: &FrameReport) {
        if report.frame % LOG_EVERY_FRAMES != 0 {
            return;
        }
        for body in &report.snapshot {
            log::info!(
                "frame {} {:?} {} at ({:.1}, {:.1}, {:.1})",
                report.frame,
                body.kind,
                body.id,
                body.position.x,
                body.position.y,
                body.position.z
            );
        }
    }

    fn wait_frame(&mut self, fps: u32) -> f32 {
        let frame_time = Duration::from_secs_f32(1.0 / fps as f32);
        if !self.realtime {
            return frame_time.as_secs_f32();
        }
        let spent = self.last_wait.elapsed();
        if spent < frame_time {
            std::thread::sleep(frame_time - spent);
        }
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_wait);
        self.last_wait = now;
        elapsed.as_secs_f32()
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Swimball (headless) starting...");

    let config = match &args.config {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::info!("No config given, using defaults");
            SimConfig::default()
        }
    };

    let world = match World::demo(config) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Could not build the demo scene: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut runner = Runner::new(world);
    let mut autopilot = Autopilot::new(args.seed, args.realtime);
    runner.run(&mut autopilot, Some(args.frames));

    match serde_json::to_string_pretty(&runner.world.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Could not serialize snapshot: {}", e);
            ExitCode::FAILURE
        }
    }
}
