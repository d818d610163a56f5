//! Viewport Projection
//!
//! Maps normalized viewport coordinates plus a depth to world space, the way
//! a perspective camera sees them.
//!
//! Viewport coordinates run 0-1 on both axes with (0,0) at bottom-left.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::transform::CameraTransform;
use crate::error::{ConfigError, ensure_finite};

/// Converts viewport points to world points for a given camera pose.
pub trait ViewportProjector {
    /// World-space point at viewport `uv` and distance `depth` along the view axis.
    fn viewport_to_world(&self, camera: &CameraTransform, uv: Vec2, depth: f32) -> Vec3;

    /// Near clip plane distance.
    fn near_clip(&self) -> f32;
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Screen aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clip plane distance.
    pub near_clip: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            aspect_ratio: 16.0 / 9.0,
            near_clip: 0.3,
        }
    }
}

impl ViewportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("viewport.fov_degrees", self.fov_degrees)?;
        ensure_finite("viewport.aspect_ratio", self.aspect_ratio)?;
        ensure_finite("viewport.near_clip", self.near_clip)?;
        if self.fov_degrees <= 0.0 || self.fov_degrees >= 180.0 {
            return Err(ConfigError::invalid(
                "viewport.fov_degrees",
                "must be in (0, 180)",
            ));
        }
        if self.aspect_ratio <= 0.0 {
            return Err(ConfigError::invalid("viewport.aspect_ratio", "must be positive"));
        }
        if self.near_clip <= 0.0 {
            return Err(ConfigError::invalid("viewport.near_clip", "must be positive"));
        }
        Ok(())
    }
}

/// A symmetric perspective camera frustum.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerspectiveViewport {
    pub config: ViewportConfig,
}

impl PerspectiveViewport {
    pub fn new(config: ViewportConfig) -> Self {
        Self { config }
    }

    /// Update the aspect ratio after a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.aspect_ratio = width as f32 / height as f32;
        }
    }
}

impl ViewportProjector for PerspectiveViewport {
    fn viewport_to_world(&self, camera: &CameraTransform, uv: Vec2, depth: f32) -> Vec3 {
        // Convert UV to NDC (-1 to 1)
        let ndc = uv * 2.0 - Vec2::ONE;
        let half_height = depth * (self.config.fov_degrees.to_radians() * 0.5).tan();
        let half_width = half_height * self.config.aspect_ratio;

        camera.position
            + camera.forward() * depth
            + camera.right() * ndc.x * half_width
            + camera.up() * ndc.y * half_height
    }

    fn near_clip(&self) -> f32 {
        self.config.near_clip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_center_lies_on_view_axis() {
        let viewport = PerspectiveViewport::default();
        let camera = CameraTransform::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let p = viewport.viewport_to_world(&camera, Vec2::splat(0.5), 2.0);
        assert!((p - Vec3::new(0.0, 0.0, 8.0)).length() < EPSILON);
    }

    #[test]
    fn test_corners_spread_by_fov_and_aspect() {
        let viewport = PerspectiveViewport::new(ViewportConfig {
            fov_degrees: 90.0,
            aspect_ratio: 2.0,
            near_clip: 1.0,
        });
        let camera = CameraTransform::default();
        let top_right = viewport.viewport_to_world(&camera, Vec2::ONE, 1.0);
        // tan(45) = 1 -> half height 1, half width 2
        assert!((top_right - Vec3::new(2.0, 1.0, -1.0)).length() < EPSILON);
        let bottom_left = viewport.viewport_to_world(&camera, Vec2::ZERO, 1.0);
        assert!((bottom_left - Vec3::new(-2.0, -1.0, -1.0)).length() < EPSILON);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut viewport = PerspectiveViewport::default();
        viewport.resize(800, 400);
        assert_eq!(viewport.config.aspect_ratio, 2.0);
        viewport.resize(0, 400);
        assert_eq!(viewport.config.aspect_ratio, 2.0);
    }

    #[test]
    fn test_validate_rejects_bad_fov() {
        let config = ViewportConfig {
            fov_degrees: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(ViewportConfig::default().validate().is_ok());
    }
}
