//! Simulation tick
//!
//! One tick, in strict order:
//! 1. Honor a quit request (nothing else runs)
//! 2. Advance button states
//! 3. Pairwise contacts, queueing response forces
//! 4. One pass over the registry: evict flagged bodies, integrate the rest
//! 5. Bump the frame counter

use std::collections::BTreeSet;

use super::body::Body;
use super::forces::ForceAccumulator;
use super::input::Key;
use super::world::World;

/// Host input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keys held down right now
    pub keys_down: BTreeSet<Key>,
    /// Host asked to shut down (window closed)
    pub quit: bool,
}

impl TickInput {
    pub fn with_keys(keys: &[Key]) -> Self {
        Self {
            keys_down: keys.iter().copied().collect(),
            quit: false,
        }
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

/// Whether the simulation should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Advance the world by `dt` seconds
pub fn tick(world: &mut World, input: &TickInput, dt: f32) -> TickOutcome {
    if input.quit {
        log::info!("Quit requested at frame {}", world.frame);
        return TickOutcome::Quit;
    }

    world.input.update(|key| input.is_key_down(key));

    let forces = resolve_collisions(&world.bodies, dt);
    integrate_bodies(world, forces, dt);

    world.frame += 1;
    TickOutcome::Continue
}

/// Test every unordered pair of shaped bodies once, in registry order
/// (`i < j`), and queue both sides' responses.
///
/// Returns one accumulator per body, index-aligned with `bodies`.
pub fn resolve_collisions(bodies: &[Body], dt: f32) -> Vec<ForceAccumulator> {
    let mut forces = vec![ForceAccumulator::new(); bodies.len()];

    // TODO: O(n²); bucket bodies into a uniform grid once scenes grow past a handful
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (a, b) = (&bodies[i], &bodies[j]);
            // Shapeless bodies never take part in contacts
            let Ok(touching) = a.is_touching(b) else {
                continue;
            };
            if !touching {
                continue;
            }
            log::debug!("Contact between {} and {}", a.id, b.id);
            a.on_collision(b, dt, &mut forces[i]);
            b.on_collision(a, dt, &mut forces[j]);
        }
    }

    forces
}

/// Evict flagged bodies and integrate the rest in a single pass.
///
/// Removal keeps the walk on the same index, so the body that slides into
/// the freed slot is still visited this tick.
fn integrate_bodies(world: &mut World, mut forces: Vec<ForceAccumulator>, dt: f32) {
    let gravity = world.config.gravity_vector();

    let mut i = 0;
    while i < world.bodies.len() {
        if world.bodies[i].marked_for_removal {
            let body = world.bodies.remove(i);
            forces.remove(i);
            log::info!("Evicted {:?} {}", body.kind, body.id);
            continue;
        }

        let queued = std::mem::take(&mut forces[i]);
        world.bodies[i].update(&world.input, gravity, queued, dt);
        i += 1;
    }
}
