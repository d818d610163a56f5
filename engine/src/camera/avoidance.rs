//! Orbit Camera Geometry Avoidance
//!
//! Keeps a third-person orbit camera's target visible by nudging its spherical
//! coordinates one step per frame:
//!
//! - Top and bottom edges both blocked: the camera is facing a wall, so it yaws
//!   clockwise and zooms in.
//! - Only the bottom edge blocked: pitch up.
//! - Only the top edge blocked: pitch down.
//! - Nothing blocked: ease pitch and radius toward their ideals, but only keep
//!   the eased coordinates if the view stays clear (all-or-nothing).
//!
//! Every correction is a single multiplicative `growth_ratio` step, so the
//! camera converges over several frames rather than jumping.
//!
//! Run [`AvoidanceController::tick`] after the followed character has moved
//! for the frame so the probe sees its final position.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::probe::{Edge, ProbeResult, is_view_clear, probe_visibility};
use super::sphere_coords::SphereCoords;
use super::transform::CameraTransform;
use super::viewport::ViewportProjector;
use crate::error::{ConfigError, ensure_finite, ensure_non_negative};
use crate::physics::{CollisionWorld, LEVEL_GEOMETRY_LAYER, LayerMask};

/// Default minimum orbit radius.
pub const DEFAULT_MIN_RADIUS: f32 = 0.5;
/// Default ideal orbit radius.
pub const DEFAULT_IDEAL_RADIUS: f32 = 5.0;
/// Default ideal pitch in degrees.
pub const DEFAULT_IDEAL_PITCH: f32 = 50.0;
/// Default pitch magnitude above which the camera stops pitching up.
pub const DEFAULT_MAX_ABS_PITCH: f32 = 70.0;
/// Default per-frame easing factor.
pub const DEFAULT_GROWTH_RATIO: f32 = 0.95;
/// Default dead band around the ideals.
pub const DEFAULT_TWEEN_MARGIN: f32 = 0.75;
/// Default yaw speed while escaping a wall, degrees per second.
pub const DEFAULT_AUTO_YAW_SPEED: f32 = 180.0;

static_assertions::const_assert!(DEFAULT_GROWTH_RATIO > 0.0 && DEFAULT_GROWTH_RATIO < 1.0);
static_assertions::const_assert!(DEFAULT_MAX_ABS_PITCH < 90.0);
static_assertions::const_assert!(DEFAULT_MIN_RADIUS < DEFAULT_IDEAL_RADIUS);

/// Tuning for the avoidance controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvoidanceConfig {
    pub min_radius: f32,
    /// Upper radius used for zoom-target selection. `None` takes the radius
    /// the controller starts with.
    pub max_radius: Option<f32>,
    pub ideal_radius: f32,
    pub ideal_pitch: f32,
    /// Pitch magnitude beyond which the camera no longer pitches up to dodge
    /// ground. Keep below 90, where camera-up flips.
    pub max_abs_pitch: f32,
    /// Multiplicative easing factor in (0, 1).
    pub growth_ratio: f32,
    /// No easing happens while within this distance of an ideal.
    pub tween_margin: f32,
    /// Degrees per second.
    pub auto_yaw_speed: f32,
    /// Layer index holding level geometry.
    pub probe_layer: u8,
}

impl Default for AvoidanceConfig {
    fn default() -> Self {
        Self {
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: None,
            ideal_radius: DEFAULT_IDEAL_RADIUS,
            ideal_pitch: DEFAULT_IDEAL_PITCH,
            max_abs_pitch: DEFAULT_MAX_ABS_PITCH,
            growth_ratio: DEFAULT_GROWTH_RATIO,
            tween_margin: DEFAULT_TWEEN_MARGIN,
            auto_yaw_speed: DEFAULT_AUTO_YAW_SPEED,
            probe_layer: LEVEL_GEOMETRY_LAYER,
        }
    }
}

impl AvoidanceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("camera.min_radius", self.min_radius)?;
        ensure_non_negative("camera.ideal_radius", self.ideal_radius)?;
        ensure_finite("camera.ideal_pitch", self.ideal_pitch)?;
        ensure_non_negative("camera.max_abs_pitch", self.max_abs_pitch)?;
        ensure_non_negative("camera.tween_margin", self.tween_margin)?;
        ensure_non_negative("camera.auto_yaw_speed", self.auto_yaw_speed)?;
        ensure_finite("camera.growth_ratio", self.growth_ratio)?;

        if self.growth_ratio <= 0.0 || self.growth_ratio >= 1.0 {
            return Err(ConfigError::invalid(
                "camera.growth_ratio",
                "must be in (0, 1)",
            ));
        }
        if let Some(max_radius) = self.max_radius {
            ensure_finite("camera.max_radius", max_radius)?;
            if max_radius <= self.min_radius {
                return Err(ConfigError::invalid(
                    "camera.max_radius",
                    "must be greater than min_radius",
                ));
            }
        }
        if self.probe_layer >= 32 {
            return Err(ConfigError::invalid("camera.probe_layer", "must be below 32"));
        }
        Ok(())
    }

    /// Layer mask the probe rays test against.
    pub fn probe_mask(&self) -> LayerMask {
        LayerMask::from_layer(self.probe_layer)
    }
}

/// Follow and zoom targets for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitTargets {
    /// The camera orbits this point.
    pub follow: Vec3,
    /// Looked at instead of `follow` once the camera is zoomed in.
    pub zoom: Vec3,
}

impl OrbitTargets {
    pub fn new(follow: Vec3, zoom: Vec3) -> Self {
        Self { follow, zoom }
    }

    /// Same point for following and zoomed-in framing.
    pub fn single(target: Vec3) -> Self {
        Self::new(target, target)
    }
}

/// Which correction a tick applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvoidanceAction {
    /// Top and bottom blocked: yawed clockwise (and zoomed in if allowed).
    EscapeWall,
    /// Bottom blocked: pitched up (or was already at the pitch limit).
    PitchUp,
    /// Top blocked: pitched down (or was already level).
    PitchDown,
    /// Some corners blocked but no top/bottom edge: nothing to do.
    Hold,
    /// View clear and the eased coordinates were kept.
    EaseCommitted,
    /// View clear but easing would have occluded it, so it was undone.
    EaseRolledBack,
}

/// Outcome of one avoidance tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvoidanceFrame {
    pub transform: CameraTransform,
    pub look_at: Vec3,
    pub zoomed: bool,
    pub probe: ProbeResult,
    pub action: AvoidanceAction,
}

/// Collision-avoiding orbit camera state.
#[derive(Debug, Clone)]
pub struct AvoidanceController {
    config: AvoidanceConfig,
    /// Resolved upper radius (from config or the initial radius).
    max_radius: f32,
    /// Current spherical coordinates around the follow target.
    pub coords: SphereCoords,
    transform: CameraTransform,
}

impl AvoidanceController {
    /// Create a controller starting at `initial`.
    ///
    /// Without an explicit `max_radius` the starting radius becomes the
    /// upper bound, so the camera begins fully zoomed out.
    pub fn new(config: AvoidanceConfig, initial: SphereCoords) -> Result<Self, ConfigError> {
        config.validate()?;
        ensure_finite("camera.initial.yaw", initial.yaw)?;
        ensure_finite("camera.initial.pitch", initial.pitch)?;
        ensure_finite("camera.initial.radius", initial.radius)?;

        let max_radius = config.max_radius.unwrap_or(initial.radius);
        if max_radius <= config.min_radius {
            return Err(ConfigError::invalid(
                "camera.max_radius",
                "must be greater than min_radius",
            ));
        }

        log::info!(
            "orbit camera ready: radius {:.2} in [{:.2}, {:.2}], pitch {:.1}",
            initial.radius,
            config.min_radius,
            max_radius,
            initial.pitch
        );

        Ok(Self {
            config,
            max_radius,
            coords: initial,
            transform: CameraTransform::default(),
        })
    }

    pub fn config(&self) -> &AvoidanceConfig {
        &self.config
    }

    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    pub fn coords(&self) -> SphereCoords {
        self.coords
    }

    /// Camera pose produced by the last tick.
    pub fn transform(&self) -> &CameraTransform {
        &self.transform
    }

    /// Whether the camera is close enough to look at the zoom target.
    pub fn is_zoomed(&self) -> bool {
        self.coords.radius < (self.config.min_radius + self.max_radius) / 2.0
    }

    /// Look-at point for the current radius.
    pub fn look_at_target(&self, targets: &OrbitTargets) -> Vec3 {
        if self.is_zoomed() {
            targets.zoom
        } else {
            targets.follow
        }
    }

    /// Camera pose for the current coordinates.
    fn pose(&self, follow: Vec3, look_at: Vec3) -> CameraTransform {
        CameraTransform::looking_at(self.coords.position_around(follow), look_at)
    }

    /// Run one frame of avoidance and place the camera.
    pub fn tick<W, P>(
        &mut self,
        dt: f32,
        targets: &OrbitTargets,
        world: &W,
        projector: &P,
    ) -> AvoidanceFrame
    where
        W: CollisionWorld + ?Sized,
        P: ViewportProjector,
    {
        let dt = dt.max(0.0);
        let zoomed = self.is_zoomed();
        let look_at = self.look_at_target(targets);
        let mask = self.config.probe_mask();

        // Probe from where the camera currently sits
        let current = self.pose(targets.follow, look_at);
        let probe = probe_visibility(world, projector, &current, look_at, mask);

        let action = if probe.is_clear() {
            self.ease_toward_ideal(targets.follow, look_at, world, projector)
        } else {
            self.avoid(&probe, dt)
        };

        self.transform = self.pose(targets.follow, look_at);

        AvoidanceFrame {
            transform: self.transform,
            look_at,
            zoomed,
            probe,
            action,
        }
    }

    /// Correct for an occluded view using the edge flags.
    fn avoid(&mut self, probe: &ProbeResult, dt: f32) -> AvoidanceAction {
        let top = probe.is_edge_hit(Edge::Top);
        let bottom = probe.is_edge_hit(Edge::Bottom);
        let ratio = self.config.growth_ratio;

        if top && bottom {
            // Facing a wall or inside a surface
            self.coords.yaw -= self.config.auto_yaw_speed * dt;
            if self.coords.radius.abs() > self.config.min_radius.abs() {
                self.coords.radius *= ratio;
                log::debug!("yaw clockwise, zoom in to {:.3}", self.coords.radius);
            } else {
                log::debug!("yaw clockwise at min radius");
            }
            AvoidanceAction::EscapeWall
        } else if bottom {
            if self.coords.pitch.abs() <= self.config.max_abs_pitch {
                self.coords.pitch /= ratio;
                log::debug!("elevating pitch to {:.3}", self.coords.pitch);
            }
            AvoidanceAction::PitchUp
        } else if top {
            if self.coords.pitch.abs() > 0.0 {
                self.coords.pitch *= ratio;
                log::debug!("lowering pitch to {:.3}", self.coords.pitch);
            }
            AvoidanceAction::PitchDown
        } else {
            AvoidanceAction::Hold
        }
    }

    /// Ease pitch and radius one step toward their ideals, keeping the result
    /// only if the view is still clear from the new pose.
    fn ease_toward_ideal<W, P>(
        &mut self,
        follow: Vec3,
        look_at: Vec3,
        world: &W,
        projector: &P,
    ) -> AvoidanceAction
    where
        W: CollisionWorld + ?Sized,
        P: ViewportProjector,
    {
        let saved = self.coords;
        let ratio = self.config.growth_ratio;
        let margin = self.config.tween_margin;

        self.coords.pitch = step_toward(self.coords.pitch, self.config.ideal_pitch, margin, ratio);
        self.coords.radius =
            step_toward(self.coords.radius, self.config.ideal_radius, margin, ratio);

        if self.coords == saved {
            return AvoidanceAction::EaseCommitted;
        }

        let tentative = self.pose(follow, look_at);
        if is_view_clear(world, projector, &tentative, look_at, self.config.probe_mask()) {
            AvoidanceAction::EaseCommitted
        } else {
            self.coords = saved;
            log::debug!("tweak disregarded");
            AvoidanceAction::EaseRolledBack
        }
    }
}

/// One multiplicative easing step toward `ideal`, skipped inside the margin band.
///
/// Multiplying shrinks the magnitude and dividing grows it, so for positive
/// values this moves toward the ideal.
fn step_toward(value: f32, ideal: f32, margin: f32, ratio: f32) -> f32 {
    if value > ideal + margin {
        value * ratio
    } else if value < ideal - margin {
        value / ratio
    } else {
        value
    }
}
