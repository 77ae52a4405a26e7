//! Simulation tuning
//!
//! Loaded from a JSON file by the native runner. Missing fields fall back to
//! the values in [`crate::consts`].

use std::fmt;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Bindings;

/// Errors from loading or validating a config
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read config: {}", e),
            ConfigError::Parse(e) => write!(f, "could not parse config: {}", e),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config field `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Target frame rate; also sets the first tick's dt
    pub fps: u32,

    // === Environment ===
    /// Gravity magnitude, pulling along -z
    pub gravity: f32,
    /// Linear drag for bodies that don't set their own
    pub default_friction: f32,
    /// Density for bodies that don't set their own (1.0 = neutral)
    pub default_density: f32,

    // === Swimmer ===
    pub movement_force: f32,
    /// Dive thrust = movement_force * this
    pub dive_force_multiplier: f32,
    pub swim_density: f32,
    pub dive_density: f32,

    // === Contacts ===
    pub kick_multiplier: f32,

    // === Controls ===
    pub bindings: Bindings,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,

            gravity: GRAVITY,
            default_friction: DEFAULT_FRICTION,
            default_density: DEFAULT_DENSITY,

            movement_force: DEFAULT_MOVEMENT_FORCE,
            dive_force_multiplier: DIVE_FORCE_MULTIPLIER,
            swim_density: SWIM_DENSITY,
            dive_density: DIVE_DENSITY,

            kick_multiplier: KICK_MULTIPLIER,

            bindings: Bindings::default(),
        }
    }
}

impl SimConfig {
    /// Gravity as a force vector
    pub fn gravity_vector(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, -self.gravity)
    }

    /// Nominal seconds per frame at the target fps
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Reject values that would break the simulation: zero fps, densities
    /// that divide buoyancy by zero, negative drag, non-finite forces
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::Invalid {
                field: "fps",
                reason: "must be at least 1",
            });
        }
        let densities = [
            ("default_density", self.default_density),
            ("swim_density", self.swim_density),
            ("dive_density", self.dive_density),
        ];
        for (field, value) in densities {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be positive and finite",
                });
            }
        }
        if !(self.default_friction.is_finite() && self.default_friction >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "default_friction",
                reason: "must be non-negative and finite",
            });
        }
        let scalars = [
            ("gravity", self.gravity),
            ("movement_force", self.movement_force),
            ("dive_force_multiplier", self.dive_force_multiplier),
            ("kick_multiplier", self.kick_multiplier),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
