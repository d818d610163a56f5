//! Gesture Listeners
//!
//! Outbound side of the gesture recognizer. Anything that wants taps and
//! swipes implements [`GestureListener`] and registers with a
//! [`GestureDispatcher`]; an `mpsc::Sender<GestureEvent>` also works as a
//! listener when the receiver lives elsewhere.

use std::sync::mpsc::Sender;

use glam::Vec2;

use super::gesture::GestureEvent;

/// Receiver of recognized gestures. Every method defaults to doing nothing.
pub trait GestureListener {
    fn on_single_tap(&mut self) {}

    fn on_double_tap(&mut self) {}

    /// `displacement` is the pointer-up position minus the pointer-down position.
    fn on_swipe(&mut self, _displacement: Vec2) {}
}

impl GestureListener for Sender<GestureEvent> {
    fn on_single_tap(&mut self) {
        // A dropped receiver just means nobody is listening anymore
        let _ = self.send(GestureEvent::SingleTap);
    }

    fn on_double_tap(&mut self) {
        let _ = self.send(GestureEvent::DoubleTap);
    }

    fn on_swipe(&mut self, displacement: Vec2) {
        let _ = self.send(GestureEvent::Swipe(displacement));
    }
}

/// Logs every gesture it receives.
#[derive(Debug, Clone, Default)]
pub struct LoggingGestureListener {
    pub name: String,
}

impl LoggingGestureListener {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl GestureListener for LoggingGestureListener {
    fn on_single_tap(&mut self) {
        log::info!("{}: received single tap", self.name);
    }

    fn on_double_tap(&mut self) {
        log::info!("{}: received double tap", self.name);
    }

    fn on_swipe(&mut self, displacement: Vec2) {
        log::info!(
            "{}: received swipe ({:.1}, {:.1})",
            self.name,
            displacement.x,
            displacement.y
        );
    }
}

/// Fan-out of gesture events to registered listeners, in registration order.
#[derive(Default)]
pub struct GestureDispatcher {
    listeners: Vec<Box<dyn GestureListener>>,
}

impl GestureDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Box<dyn GestureListener>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver one event to every listener.
    pub fn dispatch(&mut self, event: GestureEvent) {
        for listener in &mut self.listeners {
            match event {
                GestureEvent::SingleTap => listener.on_single_tap(),
                GestureEvent::DoubleTap => listener.on_double_tap(),
                GestureEvent::Swipe(displacement) => listener.on_swipe(displacement),
            }
        }
    }
}

impl std::fmt::Debug for GestureDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
