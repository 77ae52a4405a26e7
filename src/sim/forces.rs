//! Per-tick force accumulation
//!
//! Forces are one-shot: a fresh accumulator is handed out for every body at
//! the start of a tick, anything may push into it, and integration consumes
//! it by value. Nothing carries over to the next tick.

use glam::Vec3;

/// Ordered list of forces queued on one body during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForceAccumulator {
    forces: Vec<Vec3>,
}

impl ForceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a force
    pub fn push(&mut self, force: Vec3) {
        self.forces.push(force);
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    /// Queued forces in the order they were pushed
    pub fn forces(&self) -> &[Vec3] {
        &self.forces
    }

    /// Sum of all queued forces, consuming the accumulator
    pub fn total(self) -> Vec3 {
        self.forces.into_iter().fold(Vec3::ZERO, |acc, f| acc + f)
    }
}
