//! Simulation world: the body registry and everything a tick needs
//!
//! Each `World` is an independent simulation. Nothing is global, so tests
//! can run as many side by side as they like.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyBuilder, BodyKind, CollisionResponse, SwimController};
use super::error::SimError;
use super::input::InputState;
use super::shape::Shape;
use crate::config::SimConfig;
use crate::consts::*;

/// Read-only view of one live body, handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: u32,
    pub kind: BodyKind,
    pub position: Vec3,
    pub shape: Option<Shape>,
    pub solid: bool,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id,
            kind: body.kind,
            position: body.position,
            shape: body.shape,
            solid: body.solid,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub config: SimConfig,
    /// Button states, advanced once per tick
    pub input: InputState,
    /// Ticks advanced so far
    pub frame: u64,
    /// Live bodies in registry (spawn) order
    pub(crate) bodies: Vec<Body>,
    next_id: u32,
}

impl World {
    /// Create an empty world
    pub fn new(config: SimConfig) -> Self {
        let input = InputState::new(config.bindings.clone());
        Self {
            config,
            input,
            frame: 0,
            bodies: Vec::new(),
            next_id: 1,
        }
    }

    /// The default scene: a controllable swimmer and a ball.
    ///
    /// Fails if `config` carries densities a body cannot be built with.
    pub fn demo(config: SimConfig) -> Result<Self, SimError> {
        let mut world = Self::new(config);

        let (sx, sy) = SWIMMER_SPAWN;
        let swimmer = BodyBuilder::new(BodyKind::Swimmer, Vec3::new(sx, sy, 0.0))
            .shape(Shape::sphere(SWIMMER_RADIUS))
            .controller(SwimController::from_config(&world.config))
            .response(CollisionResponse::Push)
            .solid(true);
        world.spawn(swimmer)?;

        let (bx, by) = BALL_SPAWN;
        let ball = BodyBuilder::new(BodyKind::Ball, Vec3::new(bx, by, 0.0))
            .shape(Shape::sphere(BALL_RADIUS))
            .response(CollisionResponse::Kick {
                multiplier: world.config.kick_multiplier,
            })
            .solid(true);
        world.spawn(ball)?;

        Ok(world)
    }

    /// Allocate a new entity ID. Ids are never reused, so running out is
    /// an error rather than a wrap.
    pub fn next_entity_id(&mut self) -> Result<u32, SimError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(SimError::IdsExhausted)?;
        Ok(id)
    }

    /// Add a body at the end of the registry, returning its id.
    ///
    /// A body that fails to build does not use up an id.
    pub fn spawn(&mut self, builder: BodyBuilder) -> Result<u32, SimError> {
        let body = builder.build(self.next_id, &self.config)?;
        let id = self.next_entity_id()?;
        log::info!("Spawned {:?} {} at {}", body.kind, id, body.position);
        self.bodies.push(body);
        Ok(id)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: u32) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: u32) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Flag a body for eviction; it leaves the registry on the next tick
    pub fn remove(&mut self, id: u32) -> Result<(), SimError> {
        let body = self.body_mut(id).ok_or(SimError::UnknownBody { id })?;
        body.mark_for_removal();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Positions and shapes of every live body, for drawing
    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.bodies
            .iter()
            .filter(|b| !b.marked_for_removal)
            .map(BodySnapshot::from)
            .collect()
    }
}
