//! Deterministic simulation module
//!
//! All simulation logic lives here. This module must be pure and deterministic:
//! - Time only enters through the `dt` passed to `tick`
//! - Input only enters through `TickInput`
//! - Stable iteration order (registry order, ids never reused)
//! - No rendering or platform dependencies

pub mod body;
pub mod error;
pub mod forces;
pub mod input;
pub mod shape;
pub mod tick;
pub mod vector;
pub mod world;

pub use body::{Body, BodyBuilder, BodyKind, CollisionResponse, SwimController};
pub use error::SimError;
pub use forces::ForceAccumulator;
pub use input::{Action, Bindings, ButtonState, InputState, Key};
pub use shape::Shape;
pub use tick::{TickInput, TickOutcome, resolve_collisions, tick};
pub use vector::{normalized, normalized_2d, to_2d, to_3d, unit_vector_to};
pub use world::{BodySnapshot, World};
