//! Parametric Orbit Motion
//!
//! Moves a camera around a circle while easing up and down cyclically. The
//! camera is driven by a velocity derived from the orbit angle instead of a
//! position, so nudging it off-center at runtime still leaves it moving
//! continuously in a circle.
//!
//! Per step, with angle `t` and angular step `dθ` (radians):
//!
//! ```text
//! dx = -dθ · r · sin(t)
//! dy = -dθ · (h / 2) · sin(t - π)
//! dz =  dθ · r · cos(t)
//! ```
//!
//! These are derivatives of a circle of radius `r` in XZ and a sine wave of
//! peak-to-peak height `h` in Y, so the integrated path is closed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::transform::CameraTransform;
use crate::error::{ConfigError, ensure_finite, ensure_non_negative};

/// Orbit shape and speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitMotionConfig {
    pub orbit_radius: f32,
    /// Degrees per second.
    pub orbit_speed: f32,
    /// Peak-to-peak height of the vertical pan.
    pub vertical_pan_height: f32,
}

impl Default for OrbitMotionConfig {
    fn default() -> Self {
        Self {
            orbit_radius: 10.0,
            orbit_speed: 1.0,
            vertical_pan_height: 3.0,
        }
    }
}

impl OrbitMotionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("orbit.orbit_radius", self.orbit_radius)?;
        ensure_finite("orbit.orbit_speed", self.orbit_speed)?;
        ensure_non_negative("orbit.vertical_pan_height", self.vertical_pan_height)
    }
}

/// Velocity-driven circular camera orbit.
#[derive(Debug, Clone)]
pub struct OrbitMotion {
    pub config: OrbitMotionConfig,
    /// Orbit angle in degrees, kept in (-360, 360).
    theta: f32,
}

impl OrbitMotion {
    pub fn new(config: OrbitMotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, theta: 0.0 })
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    /// Displacement for a step of `dt` seconds at the current angle.
    pub fn distance_moved(&self, dt: f32) -> Vec3 {
        let r = self.config.orbit_radius;
        let t = self.theta.to_radians();
        let d_theta = (self.config.orbit_speed * dt).to_radians();

        Vec3::new(
            -d_theta * r * t.sin(),
            -d_theta * self.config.vertical_pan_height / 2.0 * (t - std::f32::consts::PI).sin(),
            d_theta * r * t.cos(),
        )
    }

    /// Move the camera one step, face `target`, then advance the angle.
    pub fn tick(&mut self, transform: &mut CameraTransform, target: Vec3, dt: f32) {
        transform.position += self.distance_moved(dt);
        transform.look_at(target);

        self.theta = (self.theta + self.config.orbit_speed * dt) % 360.0;
        log::trace!("orbit theta {:.3}", self.theta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_step_moves_along_z() {
        let orbit = OrbitMotion::new(OrbitMotionConfig::default()).unwrap();
        let d = orbit.distance_moved(1.0);
        // theta = 0: tangent is +Z, no lateral or vertical motion
        assert!(d.x.abs() < 1e-6);
        assert!(d.y.abs() < 1e-6);
        let expected = 1.0_f32.to_radians() * 10.0;
        assert!((d.z - expected).abs() < 1e-6);
    }

    #[test]
    fn test_theta_wraps_at_360() {
        let mut orbit = OrbitMotion::new(OrbitMotionConfig {
            orbit_speed: 100.0,
            ..Default::default()
        })
        .unwrap();
        let mut transform = CameraTransform::default();
        for _ in 0..4 {
            orbit.tick(&mut transform, Vec3::ZERO, 1.0);
        }
        assert!((orbit.theta() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_full_orbit_returns_near_start() {
        let mut orbit = OrbitMotion::new(OrbitMotionConfig {
            orbit_speed: 36.0,
            ..Default::default()
        })
        .unwrap();
        let start = Vec3::new(10.0, 0.0, 0.0);
        let mut transform = CameraTransform::new(start, glam::Quat::IDENTITY);
        // 10 s at 36 deg/s, fine steps
        for _ in 0..10_000 {
            orbit.tick(&mut transform, Vec3::ZERO, 0.001);
        }
        assert!((transform.position - start).length() < 0.05);
    }

    #[test]
    fn test_faces_target_after_tick() {
        let mut orbit = OrbitMotion::new(OrbitMotionConfig::default()).unwrap();
        let mut transform = CameraTransform::new(Vec3::new(10.0, 0.0, 0.0), glam::Quat::IDENTITY);
        orbit.tick(&mut transform, Vec3::ZERO, 0.5);
        let to_target = (Vec3::ZERO - transform.position).normalize();
        assert!((transform.forward() - to_target).length() < 1e-4);
    }

    #[test]
    fn test_rejects_negative_radius() {
        let config = OrbitMotionConfig {
            orbit_radius: -1.0,
            ..Default::default()
        };
        assert!(OrbitMotion::new(config).is_err());
    }
}
