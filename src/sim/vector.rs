//! Vector helpers shared by shapes, bodies and input
//!
//! Bodies live in 3D; shapes and input work in the depth-ignoring plane.

use glam::{Vec2, Vec3};

use crate::consts::NORMALIZE_EPSILON_SQ;

/// Pad a planar vector to 3D with z = 0
#[inline]
pub fn to_3d(v: Vec2) -> Vec3 {
    v.extend(0.0)
}

/// Project a 3D vector onto the plane, dropping z
#[inline]
pub fn to_2d(v: Vec3) -> Vec2 {
    v.truncate()
}

/// Unit-length copy of `v`, or `v` itself when it is too short to normalize.
///
/// Vectors with `|v|² <= 1e-6` come back untouched, so tiny inputs never
/// blow up into a division by near-zero.
#[inline]
pub fn normalized(v: Vec3) -> Vec3 {
    if v.length_squared() <= NORMALIZE_EPSILON_SQ {
        return v;
    }
    v.normalize()
}

/// Planar variant of [`normalized`]
#[inline]
pub fn normalized_2d(v: Vec2) -> Vec2 {
    if v.length_squared() <= NORMALIZE_EPSILON_SQ {
        return v;
    }
    v.normalize()
}

/// Direction from `from` toward `to` (zero if the points coincide)
#[inline]
pub fn unit_vector_to(from: Vec3, to: Vec3) -> Vec3 {
    normalized(to - from)
}
