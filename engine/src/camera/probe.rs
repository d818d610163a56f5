//! Visibility Probe
//!
//! Casts rays from the camera's near-plane viewport points toward the look-at
//! target to find out which parts of the view are occluded by level geometry.
//!
//! All five rays share one direction and length: the vector from the
//! near-plane center to the target. Casting from the viewport outward keeps
//! the probe independent of where the target sits on screen.

use glam::{Vec2, Vec3};

use super::transform::CameraTransform;
use super::viewport::ViewportProjector;
use crate::physics::{CollisionWorld, LayerMask};

/// Sample points on the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    Center,
    LeftDown,
    LeftUp,
    RightUp,
    RightDown,
}

impl Corner {
    pub const ALL: [Corner; 5] = [
        Corner::Center,
        Corner::LeftDown,
        Corner::LeftUp,
        Corner::RightUp,
        Corner::RightDown,
    ];

    /// Normalized viewport coordinate of this sample.
    pub fn viewport_uv(self) -> Vec2 {
        match self {
            Corner::Center => Vec2::splat(0.5),
            Corner::LeftDown => Vec2::new(0.0, 0.0),
            Corner::LeftUp => Vec2::new(0.0, 1.0),
            Corner::RightUp => Vec2::new(1.0, 1.0),
            Corner::RightDown => Vec2::new(1.0, 0.0),
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Viewport edges, each bounded by two corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    /// The two corners bounding this edge.
    pub fn corners(self) -> (Corner, Corner) {
        match self {
            Edge::Left => (Corner::LeftDown, Corner::LeftUp),
            Edge::Top => (Corner::LeftUp, Corner::RightUp),
            Edge::Right => (Corner::RightDown, Corner::RightUp),
            Edge::Bottom => (Corner::LeftDown, Corner::RightDown),
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Per-corner hits and derived edge occlusion for one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeResult {
    corner_hits: [bool; 5],
    edge_hits: [bool; 4],
}

impl ProbeResult {
    /// Build a result from corner hits; edges are derived.
    pub fn from_corner_hits(corner_hits: [bool; 5]) -> Self {
        let mut edge_hits = [false; 4];
        for edge in Edge::ALL {
            let (a, b) = edge.corners();
            // An edge is only blocked when both of its corners are
            edge_hits[edge.index()] = corner_hits[a.index()] && corner_hits[b.index()];
        }
        Self {
            corner_hits,
            edge_hits,
        }
    }

    pub fn is_corner_hit(&self, corner: Corner) -> bool {
        self.corner_hits[corner.index()]
    }

    pub fn is_edge_hit(&self, edge: Edge) -> bool {
        self.edge_hits[edge.index()]
    }

    /// True when no ray hit anything.
    pub fn is_clear(&self) -> bool {
        !self.corner_hits.iter().any(|&hit| hit)
    }

    pub fn corner_hits(&self) -> [bool; 5] {
        self.corner_hits
    }

    pub fn edge_hits(&self) -> [bool; 4] {
        self.edge_hits
    }
}

/// A ray cast from one viewport sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeRay {
    pub corner: Corner,
    pub origin: Vec3,
    pub direction: Vec3,
    pub length: f32,
}

/// Builds the five probe rays for a camera pose and target.
pub fn probe_rays<P: ViewportProjector>(
    projector: &P,
    camera: &CameraTransform,
    look_at: Vec3,
) -> [ProbeRay; 5] {
    let depth = projector.near_clip();
    let center = projector.viewport_to_world(camera, Corner::Center.viewport_uv(), depth);
    let to_target = look_at - center;
    let length = to_target.length();
    let direction = to_target.normalize_or_zero();

    Corner::ALL.map(|corner| ProbeRay {
        corner,
        origin: projector.viewport_to_world(camera, corner.viewport_uv(), depth),
        direction,
        length,
    })
}

/// Cast every probe ray and report all hits.
pub fn probe_visibility<W, P>(
    world: &W,
    projector: &P,
    camera: &CameraTransform,
    look_at: Vec3,
    mask: LayerMask,
) -> ProbeResult
where
    W: CollisionWorld + ?Sized,
    P: ViewportProjector,
{
    let rays = probe_rays(projector, camera, look_at);
    let corner_hits = rays.map(|ray| world.raycast(ray.origin, ray.direction, ray.length, mask));
    ProbeResult::from_corner_hits(corner_hits)
}

/// Clear check that stops at the first ray that hits.
pub fn is_view_clear<W, P>(
    world: &W,
    projector: &P,
    camera: &CameraTransform,
    look_at: Vec3,
    mask: LayerMask,
) -> bool
where
    W: CollisionWorld + ?Sized,
    P: ViewportProjector,
{
    probe_rays(projector, camera, look_at)
        .iter()
        .all(|ray| !world.raycast(ray.origin, ray.direction, ray.length, mask))
}
