//! Reactive Orbit Engine Library
//!
//! Third-person camera and touch input building blocks, independent of any
//! renderer or physics engine. The host supplies collision queries, viewport
//! projection, polled input and a character body through small traits; this
//! library decides where the camera goes and what the pointer meant.
//!
//! # Modules
//!
//! - [`camera`] - Collision-avoiding orbit camera, viewport probing, orbit motion
//! - [`input`] - Named axes, tap / double-tap / swipe recognition and listeners
//! - [`player`] - Camera-relative character locomotion
//! - [`physics`] - Collision-query and character-body traits with headless implementations
//! - [`rig`] - Per-frame driver running locomotion before the camera
//! - [`config`] - JSON configuration for a whole rig
//!
//! # Example
//!
//! ```ignore
//! use reactive_orbit_engine::camera::PerspectiveViewport;
//! use reactive_orbit_engine::input::InputSnapshot;
//! use reactive_orbit_engine::physics::{BoxCollider, FlatGroundBody, StaticBoxWorld};
//! use reactive_orbit_engine::{RigBuilder, RigConfig};
//! use glam::Vec3;
//!
//! // Level geometry on the default probe layer
//! let mut level = StaticBoxWorld::new();
//! level.add(BoxCollider::new(Vec3::new(-1.0, 0.0, 4.0), Vec3::new(1.0, 3.0, 5.0), 8));
//!
//! let mut rig = RigBuilder::new(RigConfig::default())
//!     .world(level)
//!     .projector(PerspectiveViewport::default())
//!     .build()?;
//!
//! let mut body = FlatGroundBody::new(Vec3::ZERO, 0.0);
//! let input = InputSnapshot::new().with_axis("Vertical", 1.0);
//!
//! let frame = rig.frame(1.0 / 60.0, 0.0, &input, &mut body, &[]);
//! println!("camera at {:?}", frame.camera.transform.position);
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod input;
pub mod physics;
pub mod player;
pub mod rig;

// Re-export the commonly used types at crate level for convenience
pub use camera::{AvoidanceController, CameraTransform, OrbitMotion, SphereCoords};
pub use config::RigConfig;
pub use error::ConfigError;
pub use input::{GestureEvent, GestureListener, GestureRecognizer, InputSnapshot, PointerEvent};
pub use player::CharacterLocomotion;
pub use rig::{OrbitRig, RigBuilder, RigFrame};
