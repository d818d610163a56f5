//! Spherical Camera Coordinates
//!
//! Camera placement relative to an orbit target as (yaw, pitch, radius).
//!
//! # Coordinate System
//! - Yaw: horizontal angle in degrees, unrestricted. Decreasing yaw orbits clockwise
//!   when seen from above.
//! - Pitch: vertical angle in degrees, positive above the target.
//! - Radius: distance from the target.
//! - Y is up
//!
//! Pitch is not clamped here. Past +/-90 degrees the camera's up
//! vector flips; callers that care must keep pitch inside that range.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Camera position relative to its orbit target in spherical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereCoords {
    /// Horizontal angle in degrees.
    pub yaw: f32,
    /// Vertical angle in degrees.
    pub pitch: f32,
    /// Distance from the target.
    pub radius: f32,
}

impl Default for SphereCoords {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 50.0,
            radius: 10.0,
        }
    }
}

impl SphereCoords {
    pub fn new(yaw: f32, pitch: f32, radius: f32) -> Self {
        Self { yaw, pitch, radius }
    }

    /// Cartesian offset from the target to the camera.
    pub fn to_offset(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        let cos_pitch = pitch.cos();

        Vec3::new(
            self.radius * cos_pitch * yaw.sin(),
            self.radius * pitch.sin(),
            self.radius * cos_pitch * yaw.cos(),
        )
    }

    /// World position of the camera orbiting `target`.
    pub fn position_around(&self, target: Vec3) -> Vec3 {
        target + self.to_offset()
    }

    /// Recover spherical coordinates from a target-to-camera offset.
    ///
    /// A zero offset yields zero radius with yaw and pitch at 0.
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return Self::new(0.0, 0.0, 0.0);
        }
        let pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
        let yaw = offset.x.atan2(offset.z);
        Self::new(yaw.to_degrees(), pitch.to_degrees(), radius)
    }

    /// Whether the current pitch is past the point where camera-up inverts.
    pub fn is_up_inverted(&self) -> bool {
        self.pitch.abs() >= 90.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_zero_angles_sit_on_positive_z() {
        let coords = SphereCoords::new(0.0, 0.0, 5.0);
        assert!(approx_vec(coords.to_offset(), Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_positive_pitch_is_above_target() {
        let coords = SphereCoords::new(0.0, 90.0, 3.0);
        assert!(approx_vec(coords.to_offset(), Vec3::new(0.0, 3.0, 0.0)));
    }

    #[test]
    fn test_yaw_90_sits_on_positive_x() {
        let coords = SphereCoords::new(90.0, 0.0, 2.0);
        assert!(approx_vec(coords.to_offset(), Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_offset_length_is_radius() {
        let coords = SphereCoords::new(37.0, 21.0, 7.5);
        assert!((coords.to_offset().length() - 7.5).abs() < EPSILON);
    }

    #[test]
    fn test_from_offset_recovers_coords() {
        let coords = SphereCoords::new(-40.0, 35.0, 6.0);
        let back = SphereCoords::from_offset(coords.to_offset());
        assert!((back.yaw - coords.yaw).abs() < 1e-3);
        assert!((back.pitch - coords.pitch).abs() < 1e-3);
        assert!((back.radius - coords.radius).abs() < 1e-3);
    }

    #[test]
    fn test_up_inversion_flag() {
        assert!(!SphereCoords::new(0.0, 89.0, 1.0).is_up_inverted());
        assert!(SphereCoords::new(0.0, 95.0, 1.0).is_up_inverted());
    }
}
