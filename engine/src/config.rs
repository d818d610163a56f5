//! Rig Configuration
//!
//! Aggregates the tuning of every component into one serde-friendly struct so
//! a whole rig can be described by a single JSON file. Every field has a
//! default, so partial files are fine:
//!
//! ```json
//! { "camera": { "ideal_radius": 4.0 }, "gestures": { "max_pointer_delta": 8.0 } }
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{AvoidanceConfig, OrbitMotionConfig, SphereCoords, ViewportConfig};
use crate::error::{ConfigError, ensure_finite};
use crate::input::{GestureConfig, LocomotionBindings};
use crate::player::LocomotionConfig;

/// Complete configuration for an [`OrbitRig`](crate::rig::OrbitRig).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    pub camera: AvoidanceConfig,
    /// Camera coordinates at startup.
    pub initial_coords: SphereCoords,
    pub gestures: GestureConfig,
    pub orbit: OrbitMotionConfig,
    pub locomotion: LocomotionConfig,
    pub bindings: LocomotionBindings,
    pub viewport: ViewportConfig,
    /// Follow target relative to the character's position.
    pub follow_offset: Vec3,
    /// Zoom target relative to the character's position (usually the head).
    pub zoom_offset: Vec3,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            camera: AvoidanceConfig::default(),
            initial_coords: SphereCoords::default(),
            gestures: GestureConfig::default(),
            orbit: OrbitMotionConfig::default(),
            locomotion: LocomotionConfig::default(),
            bindings: LocomotionBindings::default(),
            viewport: ViewportConfig::default(),
            follow_offset: Vec3::new(0.0, 1.0, 0.0),
            zoom_offset: Vec3::new(0.0, 1.6, 0.0),
        }
    }
}

impl RigConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded rig config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RigConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_string()?)?;
        log::info!("saved rig config to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        ensure_finite("initial_coords.yaw", self.initial_coords.yaw)?;
        ensure_finite("initial_coords.pitch", self.initial_coords.pitch)?;
        ensure_finite("initial_coords.radius", self.initial_coords.radius)?;
        let max_radius = self.camera.max_radius.unwrap_or(self.initial_coords.radius);
        if max_radius <= self.camera.min_radius {
            return Err(ConfigError::invalid(
                "camera.max_radius",
                "must be greater than min_radius",
            ));
        }

        self.gestures.validate()?;
        self.orbit.validate()?;
        self.locomotion.validate()?;
        self.viewport.validate()?;

        for (field, offset) in [
            ("follow_offset", self.follow_offset),
            ("zoom_offset", self.zoom_offset),
        ] {
            if !offset.is_finite() {
                return Err(ConfigError::invalid(field, "must be finite"));
            }
        }
        Ok(())
    }
}
