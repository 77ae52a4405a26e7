//! Swimball - a 2.5D swimmer-and-ball simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, shapes, input, world tick)
//! - `config`: Data-driven tuning loaded from JSON
//! - `runner`: Frame loop that drives a world from a host
//!
//! The host (window, sprites, audio) stays outside this crate. It feeds key
//! state and elapsed time in and reads [`sim::BodySnapshot`]s back out.

pub mod config;
pub mod runner;
pub mod sim;

pub use config::{ConfigError, SimConfig};
pub use runner::{FrameReport, Runner};

/// Simulation tuning defaults
///
/// World axes: x to the right, y down the screen, z up out of the water.
/// The fluid surface is the plane `z = 0`.
pub mod consts {
    /// Target frame rate of the host clock
    pub const DEFAULT_FPS: u32 = 60;

    /// Linear drag coefficient (force per unit velocity)
    pub const DEFAULT_FRICTION: f32 = 4.0;
    /// Neutral buoyancy: buoyancy exactly cancels gravity below the surface
    pub const DEFAULT_DENSITY: f32 = 1.0;
    /// Downward pull along -z (units/s²)
    pub const GRAVITY: f32 = 400.0;

    /// Swimmer thrust while surfaced
    pub const DEFAULT_MOVEMENT_FORCE: f32 = 2000.0;
    /// Thrust multiplier while the dive button is held
    pub const DIVE_FORCE_MULTIPLIER: f32 = 2.0;
    /// Swimmer density while surfaced (floats up hard)
    pub const SWIM_DENSITY: f32 = 0.25;
    /// Swimmer density while diving (sinks slowly)
    pub const DIVE_DENSITY: f32 = 1.5;

    /// Scale of the velocity kick a `Kick` body takes on contact
    pub const KICK_MULTIPLIER: f32 = 1.0;

    /// Squared magnitude at or below which a vector is not normalized
    pub const NORMALIZE_EPSILON_SQ: f32 = 0.000_001;

    /// Demo scene layout
    pub const SWIMMER_SPAWN: (f32, f32) = (30.0, 30.0);
    pub const SWIMMER_RADIUS: f32 = 40.0;
    pub const BALL_SPAWN: (f32, f32) = (200.0, 200.0);
    pub const BALL_RADIUS: f32 = 30.0;
}
