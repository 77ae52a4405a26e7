//! Simulated bodies and their per-tick integration
//!
//! A body accumulates forces during the tick (collision responses, swimmer
//! thrust, gravity, buoyancy, drag) and then integrates them with
//! semi-implicit Euler: velocity first, then position from the new velocity.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::forces::ForceAccumulator;
use super::input::{Action, InputState};
use super::shape::Shape;
use super::vector::unit_vector_to;
use crate::config::SimConfig;
use crate::consts::*;

/// What the host should draw for a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Player-controlled swimmer
    Swimmer,
    Ball,
    /// Anything else (walls, debris)
    Prop,
}

/// How a body reacts when it touches another
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum CollisionResponse {
    #[default]
    Ignore,
    /// Take the other body's velocity as a force
    Push,
    /// Get knocked away from the other body, scaled by its speed.
    ///
    /// The force is divided by `dt` so the resulting velocity change stays
    /// roughly the same whatever the frame rate. Grows without bound as `dt`
    /// approaches zero.
    Kick { multiplier: f32 },
}

impl CollisionResponse {
    /// Force `me` takes from touching `other`, if any
    pub fn force(&self, me: &Body, other: &Body, dt: f32) -> Option<Vec3> {
        match *self {
            CollisionResponse::Ignore => None,
            CollisionResponse::Push => Some(other.velocity),
            CollisionResponse::Kick { multiplier } => {
                let away = -unit_vector_to(me.position, other.position);
                Some(away * other.velocity.length() * multiplier / dt)
            }
        }
    }
}

/// Movement tuning for a controllable swimmer.
///
/// Diving switches thrust and density together: a diver pushes harder and
/// sinks, a surfaced swimmer is slower and floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwimController {
    pub swim_force: f32,
    pub dive_force: f32,
    pub swim_density: f32,
    pub dive_density: f32,
    pub diving: bool,
}

impl Default for SwimController {
    fn default() -> Self {
        Self {
            swim_force: DEFAULT_MOVEMENT_FORCE,
            dive_force: DEFAULT_MOVEMENT_FORCE * DIVE_FORCE_MULTIPLIER,
            swim_density: SWIM_DENSITY,
            dive_density: DIVE_DENSITY,
            diving: false,
        }
    }
}

impl SwimController {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            swim_force: config.movement_force,
            dive_force: config.movement_force * config.dive_force_multiplier,
            swim_density: config.swim_density,
            dive_density: config.dive_density,
            diving: false,
        }
    }

    /// Thrust magnitude for the current dive state
    pub fn thrust(&self) -> f32 {
        if self.diving { self.dive_force } else { self.swim_force }
    }

    /// Density for the current dive state
    pub fn density(&self) -> f32 {
        if self.diving { self.dive_density } else { self.swim_density }
    }
}

/// One simulated entity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: u32,
    pub kind: BodyKind,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Sum of last tick's forces (mass is implicitly 1)
    pub acceleration: Vec3,
    /// Linear drag coefficient
    pub friction: f32,
    /// Buoyancy scale; 1.0 is neutral
    pub density: f32,
    /// `None` never takes part in contact tests
    pub shape: Option<Shape>,
    /// Advisory only, the simulation does not branch on it
    pub solid: bool,
    pub marked_for_removal: bool,
    pub controller: Option<SwimController>,
    pub response: CollisionResponse,
}

impl Body {
    pub fn new(id: u32, kind: BodyKind, position: Vec3) -> Self {
        Self {
            id,
            kind,
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            friction: DEFAULT_FRICTION,
            density: DEFAULT_DENSITY,
            shape: None,
            solid: false,
            marked_for_removal: false,
            controller: None,
            response: CollisionResponse::Ignore,
        }
    }

    /// Flag for eviction on the next integration pass
    pub fn mark_for_removal(&mut self) {
        self.marked_for_removal = true;
    }

    /// Below (or on) the fluid surface
    pub fn is_submerged(&self) -> bool {
        self.position.z <= 0.0
    }

    /// Contact test against another body.
    ///
    /// Fails with `MissingShape` if either body has no shape.
    pub fn is_touching(&self, other: &Body) -> Result<bool, SimError> {
        let own = self.shape.ok_or(SimError::MissingShape { id: self.id })?;
        let theirs = other.shape.ok_or(SimError::MissingShape { id: other.id })?;
        Ok(own.is_touching(self.position, &theirs, other.position))
    }

    /// React to touching `other`, queueing any resulting force
    pub fn on_collision(&self, other: &Body, dt: f32, forces: &mut ForceAccumulator) {
        if let Some(force) = self.response.force(self, other, dt) {
            forces.push(force);
        }
    }

    /// Apply swimmer input: pick dive state, then queue thrust along the
    /// held direction. No-op for bodies without a controller.
    pub fn drive(&mut self, input: &InputState, forces: &mut ForceAccumulator) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        controller.diving = input.is_down(Action::Dive);
        self.density = controller.density();
        forces.push(input.directional_vector3() * controller.thrust());
    }

    /// Queue gravity, buoyancy (when submerged) and drag
    pub fn queue_environment_forces(&self, gravity: Vec3, forces: &mut ForceAccumulator) {
        forces.push(gravity);
        if self.is_submerged() {
            forces.push(-gravity / self.density);
        }
        forces.push(-self.velocity * self.friction);
    }

    /// Sum the tick's forces and step velocity then position
    pub fn integrate(&mut self, forces: ForceAccumulator, dt: f32) {
        self.acceleration = forces.total();
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Full per-tick update: input, environment, integration
    pub fn update(
        &mut self,
        input: &InputState,
        gravity: Vec3,
        mut forces: ForceAccumulator,
        dt: f32,
    ) {
        self.drive(input, &mut forces);
        self.queue_environment_forces(gravity, &mut forces);
        self.integrate(forces, dt);
    }
}

/// Fluent construction of a body, finished by [`crate::sim::World::spawn`]
#[derive(Debug, Clone)]
pub struct BodyBuilder {
    pub(crate) kind: BodyKind,
    pub(crate) position: Vec3,
    pub(crate) velocity: Vec3,
    pub(crate) friction: Option<f32>,
    pub(crate) density: Option<f32>,
    pub(crate) shape: Option<Shape>,
    pub(crate) solid: bool,
    pub(crate) controller: Option<SwimController>,
    pub(crate) response: CollisionResponse,
}

impl BodyBuilder {
    pub fn new(kind: BodyKind, position: Vec3) -> Self {
        Self {
            kind,
            position,
            velocity: Vec3::ZERO,
            friction: None,
            density: None,
            shape: None,
            solid: false,
            controller: None,
            response: CollisionResponse::Ignore,
        }
    }

    pub fn velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn friction(mut self, friction: f32) -> Self {
        self.friction = Some(friction);
        self
    }

    pub fn density(mut self, density: f32) -> Self {
        self.density = Some(density);
        self
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    pub fn controller(mut self, controller: SwimController) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn response(mut self, response: CollisionResponse) -> Self {
        self.response = response;
        self
    }

    /// Build with `id`, filling unset friction/density from `config`.
    ///
    /// Fails if the resolved density, or either controller density, is not
    /// positive and finite.
    pub fn build(self, id: u32, config: &SimConfig) -> Result<Body, SimError> {
        let density = match (self.density, &self.controller) {
            (Some(density), _) => density,
            (None, Some(controller)) => controller.density(),
            (None, None) => config.default_density,
        };
        let mut densities = vec![density];
        if let Some(controller) = &self.controller {
            densities.extend([controller.swim_density, controller.dive_density]);
        }
        if !densities.iter().all(|d| d.is_finite() && *d > 0.0) {
            return Err(SimError::InvalidDensity { id });
        }
        Ok(Body {
            id,
            kind: self.kind,
            position: self.position,
            velocity: self.velocity,
            acceleration: Vec3::ZERO,
            friction: self.friction.unwrap_or(config.default_friction),
            density,
            shape: self.shape,
            solid: self.solid,
            marked_for_removal: false,
            controller: self.controller,
            response: self.response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Key;

    const DT: f32 = 1.0 / 60.0;

    fn gravity() -> Vec3 {
        Vec3::new(0.0, 0.0, -GRAVITY)
    }

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_single_force_semi_implicit_euler() {
        let mut body = Body::new(1, BodyKind::Ball, Vec3::ZERO);
        body.friction = 0.0;
        let f = Vec3::new(3.0, -2.0, 1.0);

        let mut forces = ForceAccumulator::new();
        forces.push(f);
        body.integrate(forces, DT);

        assert!(approx(body.acceleration, f));
        assert!(approx(body.velocity, f * DT));
        // Position uses the updated velocity
        assert!(approx(body.position, f * DT * DT));
    }

    #[test]
    fn test_above_surface_only_gravity_and_drag() {
        let mut body = Body::new(1, BodyKind::Ball, Vec3::new(0.0, 0.0, 10.0));
        body.friction = 0.0;
        body.update(&InputState::default(), gravity(), ForceAccumulator::new(), DT);

        assert!(approx(body.acceleration, gravity()));
        assert!(approx(body.velocity, gravity() * DT));
    }

    #[test]
    fn test_neutral_buoyancy_cancels_gravity() {
        let body = Body::new(1, BodyKind::Ball, Vec3::ZERO);
        assert_eq!(body.density, 1.0);

        let mut forces = ForceAccumulator::new();
        body.queue_environment_forces(gravity(), &mut forces);
        // gravity, buoyancy, drag
        assert_eq!(forces.len(), 3);
        let total = forces.total();
        assert!(total.z.abs() < 1e-4);
    }

    #[test]
    fn test_light_body_floats_dense_body_sinks() {
        let mut light = Body::new(1, BodyKind::Ball, Vec3::new(0.0, 0.0, -5.0));
        light.density = 0.5;
        light.update(&InputState::default(), gravity(), ForceAccumulator::new(), DT);
        assert!(light.acceleration.z > 0.0);

        let mut heavy = Body::new(2, BodyKind::Ball, Vec3::new(0.0, 0.0, -5.0));
        heavy.density = 2.0;
        heavy.update(&InputState::default(), gravity(), ForceAccumulator::new(), DT);
        assert!(heavy.acceleration.z < 0.0);
    }

    #[test]
    fn test_drag_opposes_velocity() {
        let mut body = Body::new(1, BodyKind::Ball, Vec3::new(0.0, 0.0, 10.0));
        body.velocity = Vec3::new(100.0, 0.0, 0.0);
        body.friction = 0.5;

        let mut forces = ForceAccumulator::new();
        body.queue_environment_forces(Vec3::ZERO, &mut forces);
        assert_eq!(forces.total(), Vec3::new(-50.0, 0.0, 0.0));
    }

    #[test]
    fn test_drive_couples_thrust_and_density() {
        let mut body = Body::new(1, BodyKind::Swimmer, Vec3::ZERO);
        body.controller = Some(SwimController::default());

        let mut input = InputState::default();
        input.update(|k| k == Key::ArrowRight);
        let mut forces = ForceAccumulator::new();
        body.drive(&input, &mut forces);
        assert_eq!(body.density, SWIM_DENSITY);
        assert_eq!(forces.total(), Vec3::X * DEFAULT_MOVEMENT_FORCE);

        input.update(|k| k == Key::ArrowRight || k == Key::ShiftLeft);
        let mut forces = ForceAccumulator::new();
        body.drive(&input, &mut forces);
        assert_eq!(body.density, DIVE_DENSITY);
        assert_eq!(
            forces.total(),
            Vec3::X * DEFAULT_MOVEMENT_FORCE * DIVE_FORCE_MULTIPLIER
        );
        assert!(body.controller.is_some_and(|c| c.diving));
    }

    #[test]
    fn test_drive_without_controller_is_noop() {
        let mut body = Body::new(1, BodyKind::Ball, Vec3::ZERO);
        let mut input = InputState::default();
        input.update(|_| true);
        let mut forces = ForceAccumulator::new();
        body.drive(&input, &mut forces);
        assert!(forces.is_empty());
        assert_eq!(body.density, DEFAULT_DENSITY);
    }

    #[test]
    fn test_is_touching_requires_shapes() {
        let mut a = Body::new(1, BodyKind::Ball, Vec3::ZERO);
        let b = Body::new(2, BodyKind::Ball, Vec3::ZERO);
        assert_eq!(a.is_touching(&b), Err(SimError::MissingShape { id: 1 }));

        a.shape = Some(Shape::sphere(1.0));
        assert_eq!(a.is_touching(&b), Err(SimError::MissingShape { id: 2 }));
    }

    #[test]
    fn test_push_response_takes_other_velocity() {
        let mut me = Body::new(1, BodyKind::Swimmer, Vec3::ZERO);
        me.response = CollisionResponse::Push;
        let mut other = Body::new(2, BodyKind::Ball, Vec3::X);
        other.velocity = Vec3::new(5.0, 6.0, 0.0);

        let mut forces = ForceAccumulator::new();
        me.on_collision(&other, DT, &mut forces);
        assert_eq!(forces.forces(), &[Vec3::new(5.0, 6.0, 0.0)]);
    }

    #[test]
    fn test_kick_response_scales_inversely_with_dt() {
        let mut me = Body::new(1, BodyKind::Ball, Vec3::ZERO);
        me.response = CollisionResponse::Kick { multiplier: 2.0 };
        let mut other = Body::new(2, BodyKind::Swimmer, Vec3::new(10.0, 0.0, 0.0));
        other.velocity = Vec3::new(0.0, 3.0, 4.0);

        let slow = me.response.force(&me, &other, 0.1).unwrap_or_default();
        let fast = me.response.force(&me, &other, 0.05).unwrap_or_default();

        // Away from the other body: -x, |v| = 5, * 2 / 0.1
        assert!(approx(slow, Vec3::new(-100.0, 0.0, 0.0)));
        assert!(approx(fast, slow * 2.0));
    }

    #[test]
    fn test_ignore_response_queues_nothing() {
        let me = Body::new(1, BodyKind::Ball, Vec3::ZERO);
        let mut other = Body::new(2, BodyKind::Ball, Vec3::X);
        other.velocity = Vec3::ONE;
        let mut forces = ForceAccumulator::new();
        me.on_collision(&other, DT, &mut forces);
        assert!(forces.is_empty());
    }

    #[test]
    fn test_builder_fills_defaults_from_config() {
        let config = SimConfig::default();
        let body = BodyBuilder::new(BodyKind::Ball, Vec3::ONE)
            .shape(Shape::sphere(3.0))
            .solid(true)
            .build(7, &config)
            .expect("valid body");
        assert_eq!(body.id, 7);
        assert_eq!(body.friction, config.default_friction);
        assert_eq!(body.density, config.default_density);
        assert!(body.solid);

        let swimmer = BodyBuilder::new(BodyKind::Swimmer, Vec3::ZERO)
            .controller(SwimController::from_config(&config))
            .build(8, &config)
            .expect("valid swimmer");
        assert_eq!(swimmer.density, config.swim_density);
    }

    #[test]
    fn test_builder_rejects_bad_density() {
        let config = SimConfig::default();
        for density in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let result = BodyBuilder::new(BodyKind::Ball, Vec3::ZERO)
                .density(density)
                .build(3, &config);
            assert_eq!(result, Err(SimError::InvalidDensity { id: 3 }));
        }
    }

    #[test]
    fn test_builder_rejects_bad_controller_density() {
        let config = SimConfig::default();
        // Surfaced density is fine, so only the dive density can trip this
        let controller = SwimController {
            dive_density: 0.0,
            ..SwimController::default()
        };
        let result = BodyBuilder::new(BodyKind::Swimmer, Vec3::ZERO)
            .controller(controller)
            .build(4, &config);
        assert_eq!(result, Err(SimError::InvalidDensity { id: 4 }));
    }
}
