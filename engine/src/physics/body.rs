//! Character Body
//!
//! The physics-aware displacement service used by locomotion: move by a delta,
//! honour the environment, report whether the body ended up grounded.

use glam::Vec3;

use super::layer::LayerMask;
use super::world::{CollisionWorld, StaticBoxWorld};

/// Small gap kept between the body and obstacles.
const SKIN: f32 = 0.01;

/// A body that can be displaced through the world.
pub trait CharacterBody {
    /// Move by `delta` and return whether the body is grounded afterwards.
    fn move_by(&mut self, delta: Vec3) -> bool;

    /// Current world position (feet).
    fn position(&self) -> Vec3;
}

/// A body standing on an infinite horizontal ground plane.
///
/// Optional box obstacles block horizontal motion per axis, which lets the
/// body slide along walls instead of sticking to them.
#[derive(Debug, Clone)]
pub struct FlatGroundBody {
    position: Vec3,
    ground_height: f32,
    radius: f32,
    grounded: bool,
    obstacles: StaticBoxWorld,
    obstacle_mask: LayerMask,
}

impl FlatGroundBody {
    /// Create a body at `position` above a ground plane at `ground_height`.
    pub fn new(position: Vec3, ground_height: f32) -> Self {
        Self {
            position,
            ground_height,
            radius: 0.5,
            grounded: position.y <= ground_height,
            obstacles: StaticBoxWorld::new(),
            obstacle_mask: LayerMask::NONE,
        }
    }

    /// Block horizontal motion against `obstacles` on the masked layers.
    pub fn with_obstacles(
        mut self,
        obstacles: StaticBoxWorld,
        mask: LayerMask,
        radius: f32,
    ) -> Self {
        self.obstacles = obstacles;
        self.obstacle_mask = mask;
        self.radius = radius.max(0.0);
        self
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Whether a horizontal step along `axis` by `amount` hits an obstacle.
    fn blocked(&self, axis: Vec3, amount: f32) -> bool {
        if amount == 0.0 || self.obstacles.is_empty() {
            return false;
        }
        let dir = axis * amount.signum();
        // Cast from mid-body height so ground-level boxes still block
        let origin = self.position + Vec3::Y * self.radius;
        self.obstacles.raycast(
            origin,
            dir,
            amount.abs() + self.radius + SKIN,
            self.obstacle_mask,
        )
    }
}

impl CharacterBody for FlatGroundBody {
    fn move_by(&mut self, delta: Vec3) -> bool {
        if !self.blocked(Vec3::X, delta.x) {
            self.position.x += delta.x;
        }
        if !self.blocked(Vec3::Z, delta.z) {
            self.position.z += delta.z;
        }
        self.position.y += delta.y;

        if self.position.y <= self.ground_height {
            self.position.y = self.ground_height;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
        self.grounded
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}
