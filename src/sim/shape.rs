//! Collision shapes and contact tests
//!
//! Contact is decided in the depth-ignoring plane: two bodies at very
//! different depths still touch if their planar footprints overlap.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::vector::to_2d;

/// Collision shape, positioned by its owning body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Disc of `radius` centered on the body
    Sphere { radius: f32 },
    /// Axis-aligned rectangle between two corners, infinite along depth
    Border { corner_a: Vec2, corner_b: Vec2 },
}

impl Shape {
    pub fn sphere(radius: f32) -> Self {
        Shape::Sphere { radius }
    }

    pub fn border(corner_a: Vec2, corner_b: Vec2) -> Self {
        Shape::Border { corner_a, corner_b }
    }

    /// Whether `self` at `self_pos` touches `other` at `other_pos`.
    ///
    /// Symmetric for every pair of variants. Pairs without a contact test
    /// report no contact.
    pub fn is_touching(&self, self_pos: Vec3, other: &Shape, other_pos: Vec3) -> bool {
        match (self, other) {
            (Shape::Sphere { radius: ra }, Shape::Sphere { radius: rb }) => {
                sphere_sphere(*ra, self_pos, *rb, other_pos)
            }
            (Shape::Sphere { .. }, Shape::Border { .. }) => false,
            (Shape::Border { .. }, Shape::Sphere { .. }) => false,
            (Shape::Border { .. }, Shape::Border { .. }) => false,
        }
    }
}

/// Planar distance check: `dist² <= (ra + rb)²`
fn sphere_sphere(ra: f32, pos_a: Vec3, rb: f32, pos_b: Vec3) -> bool {
    let dist_sq = to_2d(pos_a).distance_squared(to_2d(pos_b));
    let reach = ra + rb;
    dist_sq <= reach * reach
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sphere_sphere_touching() {
        let a = Shape::sphere(5.0);
        let b = Shape::sphere(3.0);
        let pa = Vec3::ZERO;
        let pb = Vec3::new(7.0, 0.0, 0.0);

        assert!(a.is_touching(pa, &b, pb));
        assert!(b.is_touching(pb, &a, pa));
    }

    #[test]
    fn test_sphere_sphere_apart() {
        let a = Shape::sphere(5.0);
        let b = Shape::sphere(3.0);
        let pa = Vec3::ZERO;
        let pb = Vec3::new(9.0, 0.0, 0.0);

        assert!(!a.is_touching(pa, &b, pb));
        assert!(!b.is_touching(pb, &a, pa));
    }

    #[test]
    fn test_sphere_sphere_exact_reach_counts() {
        let a = Shape::sphere(5.0);
        let b = Shape::sphere(3.0);
        assert!(a.is_touching(Vec3::ZERO, &b, Vec3::new(0.0, 8.0, 0.0)));
    }

    #[test]
    fn test_depth_is_ignored() {
        let a = Shape::sphere(1.0);
        let b = Shape::sphere(1.0);
        assert!(a.is_touching(Vec3::new(0.0, 0.0, 500.0), &b, Vec3::new(1.0, 0.0, -500.0)));
    }

    #[test]
    fn test_border_pairs_report_no_contact() {
        let sphere = Shape::sphere(100.0);
        let border = Shape::border(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0));

        assert!(!sphere.is_touching(Vec3::ZERO, &border, Vec3::ZERO));
        assert!(!border.is_touching(Vec3::ZERO, &sphere, Vec3::ZERO));
        assert!(!border.is_touching(Vec3::ZERO, &border, Vec3::ZERO));
    }

    fn any_shape() -> impl Strategy<Value = Shape> {
        prop_oneof![
            (0.0f32..100.0).prop_map(Shape::sphere),
            (-100.0f32..100.0, -100.0f32..100.0, -100.0f32..100.0, -100.0f32..100.0)
                .prop_map(|(ax, ay, bx, by)| Shape::border(Vec2::new(ax, ay), Vec2::new(bx, by))),
        ]
    }

    proptest! {
        #[test]
        fn prop_is_touching_is_symmetric(
            a in any_shape(),
            b in any_shape(),
            pa in (-200.0f32..200.0, -200.0f32..200.0, -50.0f32..50.0),
            pb in (-200.0f32..200.0, -200.0f32..200.0, -50.0f32..50.0),
        ) {
            let pa = Vec3::new(pa.0, pa.1, pa.2);
            let pb = Vec3::new(pb.0, pb.1, pb.2);
            prop_assert_eq!(a.is_touching(pa, &b, pb), b.is_touching(pb, &a, pa));
        }
    }
}
