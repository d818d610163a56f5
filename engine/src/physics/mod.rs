//! Physics Module
//!
//! The environment queries the controllers consume: layer masks, ray tests
//! against level geometry, and the character body that moves through it.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, angles in degrees unless a name says otherwise.
//!
//! # Submodules
//!
//! - [`layer`] - Collision layer bit masks
//! - [`world`] - `CollisionWorld` raycast trait and a static box world
//! - [`body`] - `CharacterBody` trait and a flat-ground body

pub mod body;
pub mod layer;
pub mod world;

pub use body::{CharacterBody, FlatGroundBody};
pub use layer::{LEVEL_GEOMETRY_LAYER, LayerMask};
pub use world::{BoxCollider, CollisionWorld, StaticBoxWorld, ray_aabb_intersect};
