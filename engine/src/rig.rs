//! Frame Driver
//!
//! Wires the orbit camera, character locomotion and gesture recognition into
//! one per-frame call with a fixed phase order:
//!
//! 1. queued pointer events go to the gesture recognizer, each after a
//!    timeout check at its own timestamp
//! 2. locomotion reads input, pans the camera yaw and moves the body
//! 3. the gesture timeout runs
//! 4. the camera avoids geometry around the body's new position
//!
//! The camera always runs last so its probe sees where the character ended up.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut rig = RigBuilder::new(RigConfig::default())
//!     .world(level)
//!     .projector(PerspectiveViewport::default())
//!     .listener(Box::new(LoggingGestureListener::new("hud")))
//!     .build()?;
//!
//! loop {
//!     let frame = rig.frame(dt, now, &input, &mut body, &pointer_events);
//!     renderer.set_camera(frame.camera.transform);
//! }
//! ```

use glam::Vec3;

use crate::camera::{
    AvoidanceController, AvoidanceFrame, CameraTransform, OrbitTargets, PerspectiveViewport,
    ViewportProjector,
};
use crate::config::RigConfig;
use crate::error::ConfigError;
use crate::input::{
    GestureDispatcher, GestureEvent, GestureListener, GestureRecognizer, InputSource, PointerEvent,
};
use crate::physics::{CharacterBody, CollisionWorld};
use crate::player::{CharacterLocomotion, LocomotionFrame};

/// Everything produced by one [`OrbitRig::frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct RigFrame {
    pub locomotion: LocomotionFrame,
    pub camera: AvoidanceFrame,
    /// Gestures emitted this frame, in emission order.
    pub gestures: Vec<GestureEvent>,
    /// Body position the camera followed.
    pub body_position: Vec3,
}

/// Orbit camera, locomotion and gestures for one player.
pub struct OrbitRig<W, P> {
    camera: AvoidanceController,
    locomotion: CharacterLocomotion,
    gestures: GestureRecognizer,
    dispatcher: GestureDispatcher,
    world: W,
    projector: P,
    follow_offset: Vec3,
    zoom_offset: Vec3,
}

impl<W, P> OrbitRig<W, P>
where
    W: CollisionWorld,
    P: ViewportProjector,
{
    /// Run one frame. `dt` is the frame time and `now` the absolute clock,
    /// both in seconds.
    pub fn frame<I, B>(
        &mut self,
        dt: f32,
        now: f64,
        input: &I,
        body: &mut B,
        pointer_events: &[PointerEvent],
    ) -> RigFrame
    where
        I: InputSource + ?Sized,
        B: CharacterBody + ?Sized,
    {
        let mut gestures = Vec::new();

        for event in pointer_events {
            // Close a window that expired before this event arrived
            if let Some(gesture) = self.gestures.tick(event.time()) {
                self.emit(gesture, &mut gestures);
            }

            let emitted = match *event {
                PointerEvent::Down { position, time } => {
                    self.gestures.on_pointer_down(position, time)
                }
                PointerEvent::Up { position, time } => self.gestures.on_pointer_up(position, time),
            };
            if let Some(gesture) = emitted {
                self.emit(gesture, &mut gestures);
            }
        }

        // Update phase
        let camera_transform = *self.camera.transform();
        let locomotion = self.locomotion.tick(
            dt,
            input,
            &mut self.camera.coords,
            &camera_transform,
            body,
        );

        if let Some(gesture) = self.gestures.tick(now) {
            self.emit(gesture, &mut gestures);
        }

        // Late update phase
        let body_position = body.position();
        let targets = self.targets_for(body_position);
        let camera = self.camera.tick(dt, &targets, &self.world, &self.projector);

        RigFrame {
            locomotion,
            camera,
            gestures,
            body_position,
        }
    }

    fn emit(&mut self, gesture: GestureEvent, emitted: &mut Vec<GestureEvent>) {
        self.dispatcher.dispatch(gesture);
        emitted.push(gesture);
    }

    /// Follow and zoom targets for a character at `body_position`.
    pub fn targets_for(&self, body_position: Vec3) -> OrbitTargets {
        OrbitTargets::new(
            body_position + self.follow_offset,
            body_position + self.zoom_offset,
        )
    }

    pub fn camera(&self) -> &AvoidanceController {
        &self.camera
    }

    pub fn camera_transform(&self) -> &CameraTransform {
        self.camera.transform()
    }

    pub fn locomotion(&self) -> &CharacterLocomotion {
        &self.locomotion
    }

    pub fn gestures(&self) -> &GestureRecognizer {
        &self.gestures
    }

    /// Add a gesture listener after the rig is built.
    pub fn register_listener(&mut self, listener: Box<dyn GestureListener>) {
        self.dispatcher.register(listener);
    }

    pub fn projector(&self) -> &P {
        &self.projector
    }
}

/// Builder for [`OrbitRig`]. The collision world and projector are required;
/// [`perspective_projector`](RigBuilder::perspective_projector) builds the
/// projector from the config's `viewport` section.
pub struct RigBuilder<W, P> {
    config: RigConfig,
    world: Option<W>,
    projector: Option<P>,
    listeners: Vec<Box<dyn GestureListener>>,
}

impl<W, P> RigBuilder<W, P>
where
    W: CollisionWorld,
    P: ViewportProjector,
{
    pub fn new(config: RigConfig) -> Self {
        Self {
            config,
            world: None,
            projector: None,
            listeners: Vec::new(),
        }
    }

    pub fn world(mut self, world: W) -> Self {
        self.world = Some(world);
        self
    }

    pub fn projector(mut self, projector: P) -> Self {
        self.projector = Some(projector);
        self
    }

    pub fn listener(mut self, listener: Box<dyn GestureListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Validate the config and assemble the rig.
    ///
    /// Fails with [`ConfigError::MissingCollaborator`] when the world or
    /// projector was never supplied.
    pub fn build(self) -> Result<OrbitRig<W, P>, ConfigError> {
        let world = self
            .world
            .ok_or(ConfigError::MissingCollaborator("collision world"))?;
        let projector = self
            .projector
            .ok_or(ConfigError::MissingCollaborator("viewport projector"))?;

        let config = self.config;
        config.validate()?;

        let camera = AvoidanceController::new(config.camera, config.initial_coords)?;
        let locomotion = CharacterLocomotion::new(config.locomotion, config.bindings)?;
        let gestures = GestureRecognizer::new(config.gestures)?;

        let mut dispatcher = GestureDispatcher::new();
        for listener in self.listeners {
            dispatcher.register(listener);
        }

        log::info!(
            "orbit rig ready with {} gesture listener(s)",
            dispatcher.len()
        );

        Ok(OrbitRig {
            camera,
            locomotion,
            gestures,
            dispatcher,
            world,
            projector,
            follow_offset: config.follow_offset,
            zoom_offset: config.zoom_offset,
        })
    }
}

impl<W: CollisionWorld> RigBuilder<W, PerspectiveViewport> {
    /// Use a perspective projector configured from `RigConfig::viewport`.
    pub fn perspective_projector(mut self) -> Self {
        self.projector = Some(PerspectiveViewport::new(self.config.viewport));
        self
    }
}
