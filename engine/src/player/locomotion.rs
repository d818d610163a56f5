//! Camera-Relative Character Locomotion
//!
//! Reads the movement stick, steers the orbit camera's yaw with it, and moves
//! a [`CharacterBody`] along the camera's flattened forward/right axes.
//!
//! # Camera pan
//!
//! Holding the stick sideways swings the camera around the character so the
//! view follows the turn. Pulling the stick back adds a stronger pan in the
//! same direction, which turns the camera around to face the way the
//! character is heading.
//!
//! # Grounded vs airborne
//!
//! Direction and jump are only read while grounded. In the air the last
//! direction persists and only gravity changes it, so a jump keeps its
//! horizontal momentum.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::{CameraTransform, SphereCoords};
use crate::error::{ConfigError, ensure_finite, ensure_non_negative};
use crate::input::{InputSource, LocomotionBindings};
use crate::physics::CharacterBody;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default run speed in m/s.
pub const RUN_SPEED: f32 = 6.0;
/// Default upward velocity applied on jump in m/s.
pub const JUMP_SPEED: f32 = 8.0;
/// Default gravity in m/s^2.
pub const GRAVITY: f32 = 20.0;
/// Default camera pan rate for a full sideways stick, degrees per second.
pub const LATERAL_PAN_DEGREES: f32 = 70.0;
/// Default facing turn rate, degrees per second.
pub const TURN_RATE: f32 = 180.0;

static_assertions::const_assert!(JUMP_SPEED > 0.0);
static_assertions::const_assert!(GRAVITY > 0.0);

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Tuning for [`CharacterLocomotion`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    /// Camera yaw rate (deg/s) for a full sideways stick.
    pub lateral_pan_degrees: f32,
    /// Multiplier on the pan added when the stick is pulled back.
    pub lat_vert_factor: f32,
    /// Scale applied to backward movement.
    pub neg_y_fudge: f32,
    /// Below this stick Y the sideways pan is suppressed.
    pub min_y_stick_comp: f32,
    /// Facing turn rate in degrees per second.
    pub turn_rate: f32,
    /// Added to the movement yaw to get the model's facing yaw.
    pub model_yaw_offset: f32,
    /// Squared direction length below which facing is left alone.
    pub facing_threshold_sq: f32,
    /// Squared velocity above which the character counts as walking.
    pub walking_threshold_sq: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            speed: RUN_SPEED,
            jump_speed: JUMP_SPEED,
            gravity: GRAVITY,
            lateral_pan_degrees: LATERAL_PAN_DEGREES,
            lat_vert_factor: 2.0,
            neg_y_fudge: 0.5,
            min_y_stick_comp: -0.99,
            turn_rate: TURN_RATE,
            model_yaw_offset: -90.0,
            facing_threshold_sq: 0.025,
            walking_threshold_sq: 1.0,
        }
    }
}

impl LocomotionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("locomotion.speed", self.speed)?;
        ensure_non_negative("locomotion.jump_speed", self.jump_speed)?;
        ensure_non_negative("locomotion.gravity", self.gravity)?;
        ensure_finite("locomotion.lateral_pan_degrees", self.lateral_pan_degrees)?;
        ensure_finite("locomotion.lat_vert_factor", self.lat_vert_factor)?;
        ensure_non_negative("locomotion.neg_y_fudge", self.neg_y_fudge)?;
        ensure_finite("locomotion.min_y_stick_comp", self.min_y_stick_comp)?;
        ensure_non_negative("locomotion.turn_rate", self.turn_rate)?;
        ensure_finite("locomotion.model_yaw_offset", self.model_yaw_offset)?;
        ensure_non_negative("locomotion.facing_threshold_sq", self.facing_threshold_sq)?;
        ensure_non_negative("locomotion.walking_threshold_sq", self.walking_threshold_sq)
    }
}

// ============================================================================
// LOCOMOTION
// ============================================================================

/// Result of one locomotion tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionFrame {
    /// Model rotation about world Y.
    pub facing: Quat,
    /// Model facing yaw in degrees.
    pub facing_yaw: f32,
    /// Animation flag.
    pub is_walking: bool,
    /// Whether the body reported ground contact after this frame's move.
    pub grounded: bool,
    /// Velocity used for this frame's move.
    pub velocity: Vec3,
}

/// Stick-driven character controller that also pans the orbit camera.
#[derive(Debug, Clone)]
pub struct CharacterLocomotion {
    config: LocomotionConfig,
    bindings: LocomotionBindings,
    /// Persists while airborne
    move_direction: Vec3,
    /// Set by the previous move
    grounded: bool,
    facing_yaw: f32,
}

impl CharacterLocomotion {
    /// Starts airborne; the first tick settles the body onto the ground.
    pub fn new(
        config: LocomotionConfig,
        bindings: LocomotionBindings,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            bindings,
            move_direction: Vec3::ZERO,
            grounded: false,
            facing_yaw: 0.0,
        })
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn bindings(&self) -> &LocomotionBindings {
        &self.bindings
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn move_direction(&self) -> Vec3 {
        self.move_direction
    }

    pub fn facing_yaw(&self) -> f32 {
        self.facing_yaw
    }

    pub fn set_facing_yaw(&mut self, degrees: f32) {
        self.facing_yaw = degrees;
    }

    /// Yaw rate (deg/s) the stick applies to the camera.
    ///
    /// Positive values swing the camera's yaw down.
    pub fn camera_pan_rate(&self, stick: Vec2) -> f32 {
        let pan = self.config.lateral_pan_degrees;

        let mut cx = if stick.y > self.config.min_y_stick_comp {
            pan * stick.x
        } else {
            0.0
        };
        let cy = if stick.y < 0.0 {
            pan * self.config.lat_vert_factor * stick.y
        } else {
            0.0
        };

        // The backward component always pushes the pan further in its current direction
        if cx < 0.0 {
            cx += cy;
        } else {
            cx -= cy;
        }
        cx
    }

    /// Run one frame: pan the camera, steer, apply gravity and move the body.
    pub fn tick<I, B>(
        &mut self,
        dt: f32,
        input: &I,
        camera_coords: &mut SphereCoords,
        camera: &CameraTransform,
        body: &mut B,
    ) -> LocomotionFrame
    where
        I: InputSource + ?Sized,
        B: CharacterBody + ?Sized,
    {
        let dt = dt.max(0.0);
        let stick = Vec2::new(
            input.axis(&self.bindings.x_axis),
            input.axis(&self.bindings.y_axis),
        )
        .normalize_or_zero();

        camera_coords.yaw -= self.camera_pan_rate(stick) * dt;

        if self.grounded {
            let (forward, right) = flat_camera_axes(camera);

            let mut direction = if stick.y > 0.0 {
                forward * stick.y + right * stick.x
            } else {
                forward * (self.config.neg_y_fudge * stick.y) + right * stick.x
            };

            if direction.length_squared() > self.config.facing_threshold_sq {
                self.turn_toward(direction, dt);
            }

            direction *= self.config.speed;
            if input.button(&self.bindings.jump_button) {
                direction.y = self.config.jump_speed;
                log::debug!("jump at {:.2} m/s", direction.y);
            }
            self.move_direction = direction;
        }

        self.move_direction.y -= self.config.gravity * dt;
        self.grounded = body.move_by(self.move_direction * dt);

        LocomotionFrame {
            facing: Quat::from_rotation_y(self.facing_yaw.to_radians()),
            facing_yaw: self.facing_yaw,
            is_walking: self.move_direction.length_squared() > self.config.walking_threshold_sq,
            grounded: self.grounded,
            velocity: self.move_direction,
        }
    }

    /// Rotate the facing toward `direction` along the shortest arc, limited by
    /// the turn rate.
    fn turn_toward(&mut self, direction: Vec3, dt: f32) {
        let target = direction.x.atan2(direction.z).to_degrees() + self.config.model_yaw_offset;

        let mut diff = target - self.facing_yaw;
        while diff > 180.0 {
            diff -= 360.0;
        }
        while diff < -180.0 {
            diff += 360.0;
        }

        let max_step = self.config.turn_rate * dt;
        self.facing_yaw += diff.clamp(-max_step, max_step);
        self.facing_yaw = self.facing_yaw.rem_euclid(360.0);
    }
}

/// Camera forward and right projected onto the ground plane.
fn flat_camera_axes(camera: &CameraTransform) -> (Vec3, Vec3) {
    let flatten = |v: Vec3| Vec3::new(v.x, 0.0, v.z).normalize_or_zero();

    let mut forward = flatten(camera.forward());
    if forward == Vec3::ZERO {
        // Looking straight down: the camera's up points where forward would
        forward = flatten(camera.up());
    }
    (forward, flatten(camera.right()))
}
