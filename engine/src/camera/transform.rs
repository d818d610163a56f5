//! Camera Transform
//!
//! World-space pose of a camera. The camera looks down its local -Z axis with
//! +Y up, matching `Mat4::look_at_rh`.

use glam::{Mat3, Quat, Vec3};

/// Position and orientation of a camera in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl CameraTransform {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// A transform at `position` already looking at `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut transform = Self::new(position, Quat::IDENTITY);
        transform.look_at(target);
        transform
    }

    /// Direction the camera is looking.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Rotate the camera to face `target` with world +Y as the up reference.
    ///
    /// Leaves the rotation untouched when `target` coincides with the camera.
    pub fn look_at(&mut self, target: Vec3) {
        let to_target = target - self.position;
        if to_target.length_squared() <= f32::EPSILON {
            return;
        }
        let forward = to_target.normalize();

        // Looking straight up or down - use world X as the right reference
        let right = if forward.y.abs() > 0.99 {
            Vec3::X
        } else {
            forward.cross(Vec3::Y).normalize()
        };
        let up = right.cross(forward).normalize();

        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize();
    }
}
