//! Collision World
//!
//! The raycast service the camera consumes, plus a static box world that
//! answers it with the slab method.
//!
//! # Example
//!
//! ```ignore
//! use reactive_orbit_engine::physics::{BoxCollider, CollisionWorld, LayerMask, StaticBoxWorld};
//! use glam::Vec3;
//!
//! let mut world = StaticBoxWorld::new();
//! world.add(BoxCollider::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0), 8));
//!
//! let hit = world.raycast(Vec3::new(0.0, 1.0, -5.0), Vec3::Z, 10.0, LayerMask::from_layer(8));
//! assert!(hit);
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::layer::LayerMask;

/// Ray query against environment geometry.
///
/// `direction` is expected to be normalized. Only colliders whose layer is in
/// `mask` and whose entry distance lies within `[0, max_distance]` count as hits.
pub trait CollisionWorld {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask) -> bool;
}

impl<F> CollisionWorld for F
where
    F: Fn(Vec3, Vec3, f32, LayerMask) -> bool,
{
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask) -> bool {
        self(origin, direction, max_distance, mask)
    }
}

/// Performs ray-AABB intersection using the slab method.
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero components get huge inverses so the slab test stays branch-free
    let inv = |d: f32| {
        if d.abs() > 1e-10 {
            1.0 / d
        } else {
            f32::MAX * if d.is_sign_negative() { -1.0 } else { 1.0 }
        }
    };
    let inv_dir = Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t1 = (aabb_min - ray_origin) * inv_dir;
    let t2 = (aabb_max - ray_origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 {
            Some(t_min)
        } else {
            // Ray starts inside the box
            Some(0.0)
        }
    } else {
        None
    }
}

/// An axis-aligned box on a single collision layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxCollider {
    pub min: Vec3,
    pub max: Vec3,
    pub layer: u8,
}

impl BoxCollider {
    /// Create a box from two corners; the corners are sorted per axis.
    pub fn new(a: Vec3, b: Vec3, layer: u8) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            layer,
        }
    }

    /// Create a box from its center and half extents.
    pub fn from_center(center: Vec3, half_extents: Vec3, layer: u8) -> Self {
        let half = half_extents.abs();
        Self::new(center - half, center + half, layer)
    }

    /// Distance along the ray to this box, if it is hit.
    pub fn ray_distance(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        ray_aabb_intersect(origin, direction, self.min, self.max)
    }
}

/// A fixed set of box colliders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticBoxWorld {
    colliders: Vec<BoxCollider>,
}

impl StaticBoxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_colliders(colliders: Vec<BoxCollider>) -> Self {
        Self { colliders }
    }

    pub fn add(&mut self, collider: BoxCollider) {
        self.colliders.push(collider);
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Nearest hit distance within `max_distance` on the masked layers.
    pub fn ray_distance(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<f32> {
        self.colliders
            .iter()
            .filter(|c| mask.contains(c.layer))
            .filter_map(|c| c.ray_distance(origin, direction))
            .filter(|&t| t <= max_distance)
            .min_by(|a, b| a.total_cmp(b))
    }
}

impl CollisionWorld for StaticBoxWorld {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask) -> bool {
        self.ray_distance(origin, direction, max_distance, mask)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: u8 = 8;

    fn unit_box() -> BoxCollider {
        BoxCollider::new(Vec3::splat(-1.0), Vec3::splat(1.0), LEVEL)
    }

    #[test]
    fn test_ray_hits_box_in_front() {
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!((t.unwrap() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_box_behind() {
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_axis_parallel_ray_outside_slab_misses() {
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 3.0, -5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_from_inside_hits_at_zero() {
        let t = ray_aabb_intersect(Vec3::ZERO, Vec3::X, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(t, Some(0.0));
    }

    #[test]
    fn test_world_respects_max_distance() {
        let world = StaticBoxWorld::with_colliders(vec![unit_box()]);
        let origin = Vec3::new(0.0, 0.0, -5.0);
        let mask = LayerMask::from_layer(LEVEL);
        assert!(world.raycast(origin, Vec3::Z, 4.5, mask));
        assert!(!world.raycast(origin, Vec3::Z, 3.5, mask));
    }

    #[test]
    fn test_world_respects_layer_mask() {
        let world = StaticBoxWorld::with_colliders(vec![unit_box()]);
        let origin = Vec3::new(0.0, 0.0, -5.0);
        assert!(!world.raycast(origin, Vec3::Z, 10.0, LayerMask::from_layer(0)));
        assert!(world.raycast(origin, Vec3::Z, 10.0, LayerMask::ALL));
    }

    #[test]
    fn test_world_returns_nearest_hit() {
        let mut world = StaticBoxWorld::new();
        world.add(BoxCollider::from_center(Vec3::new(0.0, 0.0, 10.0), Vec3::ONE, LEVEL));
        world.add(unit_box());
        let t = world.ray_distance(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::Z,
            100.0,
            LayerMask::ALL,
        );
        assert!((t.unwrap() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_closure_is_collision_world() {
        let always = |_: Vec3, _: Vec3, _: f32, _: LayerMask| true;
        assert!(always.raycast(Vec3::ZERO, Vec3::X, 1.0, LayerMask::NONE));
    }
}
