//! Touch Gesture Recognition
//!
//! Classifies pointer down/up sequences into single taps, double taps and
//! swipes using a timing window and a displacement threshold.
//!
//! A tracking cycle starts on the first pointer-down and ends when exactly
//! one gesture is emitted:
//!
//! - pointer-up farther than `max_pointer_delta` from the start: swipe, emitted
//!   immediately
//! - a second pointer-down near the start before the window closes: upgrades
//!   the pending single tap to a double tap
//! - `max_double_tap_time` after the start: the pending tap (single or double)
//!   is emitted from [`GestureRecognizer::tick`]
//!
//! Only one pointer is tracked at a time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::listener::GestureDispatcher;
use crate::error::{ConfigError, ensure_non_negative};

/// Recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    SingleTap,
    DoubleTap,
    /// Pointer-up position minus pointer-down position.
    Swipe(Vec2),
}

/// What the current cycle is tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureKind {
    Single,
    Double,
    Swipe,
    #[default]
    None,
}

/// Thresholds for tap and swipe classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Seconds after first contact before a pending tap is emitted.
    pub max_double_tap_time: f64,
    /// Pointer travel (pixels) beyond which a release counts as a swipe.
    pub max_pointer_delta: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            max_double_tap_time: 0.300,
            max_pointer_delta: 4.0,
        }
    }
}

impl GestureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_double_tap_time.is_finite() || self.max_double_tap_time < 0.0 {
            return Err(ConfigError::invalid(
                "gestures.max_double_tap_time",
                "must be a non-negative number of seconds",
            ));
        }
        ensure_non_negative("gestures.max_pointer_delta", self.max_pointer_delta)
    }
}

/// Single-pointer tracking state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureTrack {
    pub active: bool,
    pub kind: GestureKind,
    pub start_time: f64,
    pub start_position: Vec2,
}

/// Tap / double-tap / swipe state machine.
#[derive(Debug, Clone, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    track: GestureTrack,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            track: GestureTrack::default(),
        })
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn track(&self) -> &GestureTrack {
        &self.track
    }

    pub fn is_tracking(&self) -> bool {
        self.track.active
    }

    /// Pointer pressed at `position` (pixels) at time `now` (seconds).
    ///
    /// If the previous cycle's window has already closed, its pending tap is
    /// emitted here and this press starts a new cycle.
    pub fn on_pointer_down(&mut self, position: Vec2, now: f64) -> Option<GestureEvent> {
        let expired = self.tick(now);

        if !self.track.active {
            // First contact: assume a single tap until proven otherwise
            self.track = GestureTrack {
                active: true,
                kind: GestureKind::Single,
                start_time: now,
                start_position: position,
            };
            return expired;
        }

        // A second tap landing near the first might be a double tap; tick() decides
        if self.track.kind == GestureKind::Single
            && position.distance(self.track.start_position) < self.config.max_pointer_delta
        {
            self.track.kind = GestureKind::Double;
        }
        None
    }

    /// Pointer released at `position`. Returns a swipe if the pointer traveled
    /// too far from where the cycle started.
    pub fn on_pointer_up(&mut self, position: Vec2, _now: f64) -> Option<GestureEvent> {
        if self.track.kind != GestureKind::Single {
            return None;
        }

        let displacement = position - self.track.start_position;
        if displacement.length() > self.config.max_pointer_delta {
            log::debug!("swipe ({:.1}, {:.1})", displacement.x, displacement.y);
            self.clear();
            Some(GestureEvent::Swipe(displacement))
        } else {
            None
        }
    }

    /// Per-frame check; emits the pending tap once the window has elapsed.
    pub fn tick(&mut self, now: f64) -> Option<GestureEvent> {
        if !self.track.active || now - self.track.start_time < self.config.max_double_tap_time {
            return None;
        }

        let event = match self.track.kind {
            GestureKind::Single => Some(GestureEvent::SingleTap),
            GestureKind::Double => Some(GestureEvent::DoubleTap),
            GestureKind::Swipe | GestureKind::None => None,
        };
        if let Some(event) = event {
            log::debug!("{event:?}");
        }
        self.clear();
        event
    }

    /// Like [`on_pointer_down`](Self::on_pointer_down) but delivers to `dispatcher`.
    pub fn pointer_down_into(
        &mut self,
        position: Vec2,
        now: f64,
        dispatcher: &mut GestureDispatcher,
    ) {
        if let Some(event) = self.on_pointer_down(position, now) {
            dispatcher.dispatch(event);
        }
    }

    /// Like [`on_pointer_up`](Self::on_pointer_up) but delivers to `dispatcher`.
    pub fn pointer_up_into(
        &mut self,
        position: Vec2,
        now: f64,
        dispatcher: &mut GestureDispatcher,
    ) {
        if let Some(event) = self.on_pointer_up(position, now) {
            dispatcher.dispatch(event);
        }
    }

    /// Like [`tick`](Self::tick) but delivers to `dispatcher`.
    pub fn tick_into(&mut self, now: f64, dispatcher: &mut GestureDispatcher) {
        if let Some(event) = self.tick(now) {
            dispatcher.dispatch(event);
        }
    }

    /// Drop the current cycle without emitting anything.
    pub fn clear(&mut self) {
        self.track = GestureTrack::default();
    }
}
