//! Player Module
//!
//! Character movement driven by named input axes.
//!
//! # Components
//!
//! - [`CharacterLocomotion`] - Camera-relative movement with jump and gravity
//!   - Pans the orbit camera's yaw from the movement stick
//!   - Turns the model toward the movement direction at a limited rate
//! - [`LocomotionConfig`] - Speeds, gravity and pan tuning

pub mod locomotion;

pub use locomotion::{
    CharacterLocomotion, GRAVITY, JUMP_SPEED, LATERAL_PAN_DEGREES, LocomotionConfig,
    LocomotionFrame, RUN_SPEED, TURN_RATE,
};
