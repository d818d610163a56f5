//! Input Module
//!
//! Platform-agnostic input: named axes and buttons polled by locomotion, and
//! pointer events turned into taps and swipes. Decoupled from any specific
//! windowing system so hosts can feed it from whatever device layer they have.
//!
//! # Example
//!
//! ```rust,ignore
//! use reactive_orbit_engine::input::{
//!     GestureDispatcher, GestureRecognizer, LoggingGestureListener,
//! };
//! use glam::Vec2;
//!
//! let mut gestures = GestureRecognizer::default();
//! let mut dispatcher = GestureDispatcher::new();
//! dispatcher.register(Box::new(LoggingGestureListener::new("hud")));
//!
//! gestures.pointer_down_into(Vec2::new(100.0, 50.0), now, &mut dispatcher);
//! gestures.pointer_up_into(Vec2::new(160.0, 50.0), now + 0.05, &mut dispatcher); // swipe
//! gestures.tick_into(now + 0.4, &mut dispatcher);
//! ```

pub mod axes;
pub mod gesture;
pub mod listener;

pub use axes::{InputSnapshot, InputSource, LocomotionBindings};
pub use gesture::{GestureConfig, GestureEvent, GestureKind, GestureRecognizer, GestureTrack};
pub use listener::{GestureDispatcher, GestureListener, LoggingGestureListener};

/// A pointer event delivered by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { position: glam::Vec2, time: f64 },
    Up { position: glam::Vec2, time: f64 },
}

impl PointerEvent {
    pub fn time(&self) -> f64 {
        match *self {
            PointerEvent::Down { time, .. } | PointerEvent::Up { time, .. } => time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_pointer_event_time() {
        let down = PointerEvent::Down {
            position: Vec2::ZERO,
            time: 1.5,
        };
        let up = PointerEvent::Up {
            position: Vec2::ONE,
            time: 2.0,
        };
        assert_eq!(down.time(), 1.5);
        assert_eq!(up.time(), 2.0);
    }
}
