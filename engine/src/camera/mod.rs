//! Camera Module
//!
//! Orbit camera placement, visibility probing and geometry avoidance.
//! This module is window-system agnostic - it only deals with camera state and math.
//! Collision and projection come in through the [`CollisionWorld`](crate::physics::CollisionWorld)
//! and [`ViewportProjector`] traits.

pub mod avoidance;
pub mod orbit_motion;
pub mod probe;
pub mod sphere_coords;
pub mod transform;
pub mod viewport;

pub use avoidance::{
    AvoidanceAction, AvoidanceConfig, AvoidanceController, AvoidanceFrame, OrbitTargets,
};
pub use orbit_motion::{OrbitMotion, OrbitMotionConfig};
pub use probe::{Corner, Edge, ProbeRay, ProbeResult, is_view_clear, probe_rays, probe_visibility};
pub use sphere_coords::SphereCoords;
pub use transform::CameraTransform;
pub use viewport::{PerspectiveViewport, ViewportConfig, ViewportProjector};
