//! Gesture Tests - Tap, Double Tap and Swipe Timelines
//!
//! Feeds pointer timelines through the recognizer and checks that every
//! tracking cycle ends in exactly one gesture.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use glam::Vec2;
use reactive_orbit_engine::input::{
    GestureConfig, GestureDispatcher, GestureEvent, GestureListener, GestureRecognizer,
};

fn recognizer() -> GestureRecognizer {
    GestureRecognizer::new(GestureConfig::default()).unwrap()
}

/// Tick every 10 ms from `from` to `to` and collect emissions.
fn tick_range(r: &mut GestureRecognizer, from: f64, to: f64) -> Vec<GestureEvent> {
    let mut events = Vec::new();
    let mut now = from;
    while now <= to + 1e-9 {
        events.extend(r.tick(now));
        now += 0.01;
    }
    events
}

// ============================================================================
// Single Tap
// ============================================================================

#[test]
fn test_single_tap_after_window() {
    let mut r = recognizer();
    r.on_pointer_down(Vec2::ZERO, 0.0);
    assert_eq!(r.on_pointer_up(Vec2::ZERO, 0.05), None);

    assert!(tick_range(&mut r, 0.0, 0.29).is_empty());
    assert_eq!(r.tick(0.3), Some(GestureEvent::SingleTap));
    assert!(tick_range(&mut r, 0.31, 1.0).is_empty());
}

#[test]
fn test_release_at_threshold_is_a_tap() {
    let mut r = recognizer();
    r.on_pointer_down(Vec2::ZERO, 0.0);
    // Exactly max_pointer_delta away is not a swipe
    assert_eq!(r.on_pointer_up(Vec2::new(4.0, 0.0), 0.05), None);
    assert_eq!(r.tick(0.3), Some(GestureEvent::SingleTap));
}

// ============================================================================
// Double Tap
// ============================================================================

#[test]
fn test_double_tap_emits_once() {
    let mut r = recognizer();
    let mut events = Vec::new();

    r.on_pointer_down(Vec2::ZERO, 0.0);
    events.extend(tick_range(&mut r, 0.0, 0.04));
    events.extend(r.on_pointer_up(Vec2::ZERO, 0.05));
    events.extend(tick_range(&mut r, 0.05, 0.09));
    r.on_pointer_down(Vec2::new(2.0, 0.0), 0.1);
    events.extend(r.on_pointer_up(Vec2::new(2.0, 0.0), 0.15));
    events.extend(tick_range(&mut r, 0.15, 1.0));

    assert_eq!(events, vec![GestureEvent::DoubleTap]);
}

#[test]
fn test_second_down_at_threshold_stays_single() {
    let mut r = recognizer();
    r.on_pointer_down(Vec2::ZERO, 0.0);
    r.on_pointer_up(Vec2::ZERO, 0.05);
    r.on_pointer_down(Vec2::new(0.0, 4.0), 0.1);
    assert_eq!(r.tick(0.3), Some(GestureEvent::SingleTap));
}

#[test]
fn test_new_cycle_after_emission() {
    let mut r = recognizer();
    r.on_pointer_down(Vec2::ZERO, 0.0);
    r.on_pointer_up(Vec2::ZERO, 0.05);
    assert_eq!(r.tick(0.3), Some(GestureEvent::SingleTap));

    // A later tap near the old position starts fresh rather than doubling
    r.on_pointer_down(Vec2::new(1.0, 0.0), 0.5);
    r.on_pointer_up(Vec2::new(1.0, 0.0), 0.55);
    assert_eq!(r.tick(0.79), None);
    assert_eq!(r.tick(0.8), Some(GestureEvent::SingleTap));
}

// ============================================================================
// Swipe
// ============================================================================

#[test]
fn test_swipe_emits_immediately() {
    let mut r = recognizer();
    r.on_pointer_down(Vec2::ZERO, 0.0);
    assert_eq!(
        r.on_pointer_up(Vec2::new(10.0, 0.0), 0.05),
        Some(GestureEvent::Swipe(Vec2::new(10.0, 0.0)))
    );
    assert!(!r.is_tracking());
    assert!(tick_range(&mut r, 0.05, 1.0).is_empty());
}

#[test]
fn test_swipe_displacement_is_relative_to_start() {
    let mut r = recognizer();
    r.on_pointer_down(Vec2::new(100.0, 200.0), 1.0);
    assert_eq!(
        r.on_pointer_up(Vec2::new(97.0, 240.0), 1.1),
        Some(GestureEvent::Swipe(Vec2::new(-3.0, 40.0)))
    );
}

// ============================================================================
// Dispatch
// ============================================================================

#[derive(Default)]
struct Tally {
    singles: u32,
    doubles: u32,
    swipes: Vec<Vec2>,
}

/// Listener handle that lets the test read the tally after the dispatcher
/// has taken ownership of the box.
struct SharedTally(Rc<RefCell<Tally>>);

impl GestureListener for SharedTally {
    fn on_single_tap(&mut self) {
        self.0.borrow_mut().singles += 1;
    }

    fn on_double_tap(&mut self) {
        self.0.borrow_mut().doubles += 1;
    }

    fn on_swipe(&mut self, displacement: Vec2) {
        self.0.borrow_mut().swipes.push(displacement);
    }
}

#[test]
fn test_dispatch_reaches_every_listener() {
    let (tx_a, rx_a) = mpsc::channel();
    let (tx_b, rx_b) = mpsc::channel();
    let mut dispatcher = GestureDispatcher::new();
    dispatcher.register(Box::new(tx_a));
    dispatcher.register(Box::new(tx_b));

    let mut r = recognizer();
    r.on_pointer_down(Vec2::ZERO, 0.0);
    r.pointer_up_into(Vec2::new(0.0, -12.0), 0.1, &mut dispatcher);
    r.on_pointer_down(Vec2::ZERO, 1.0);
    r.pointer_up_into(Vec2::ZERO, 1.05, &mut dispatcher);
    r.tick_into(1.3, &mut dispatcher);

    let expected = vec![
        GestureEvent::Swipe(Vec2::new(0.0, -12.0)),
        GestureEvent::SingleTap,
    ];
    assert_eq!(rx_a.try_iter().collect::<Vec<_>>(), expected);
    assert_eq!(rx_b.try_iter().collect::<Vec<_>>(), expected);
}

#[test]
fn test_listener_receives_callbacks() {
    let tally = Rc::new(RefCell::new(Tally::default()));
    let mut dispatcher = GestureDispatcher::new();
    dispatcher.register(Box::new(SharedTally(Rc::clone(&tally))));

    let mut r = recognizer();
    // double tap
    r.pointer_down_into(Vec2::ZERO, 0.0, &mut dispatcher);
    r.pointer_up_into(Vec2::ZERO, 0.05, &mut dispatcher);
    r.pointer_down_into(Vec2::new(1.0, 1.0), 0.1, &mut dispatcher);
    r.pointer_up_into(Vec2::new(1.0, 1.0), 0.15, &mut dispatcher);
    // swipe
    r.pointer_down_into(Vec2::ZERO, 1.0, &mut dispatcher);
    r.pointer_up_into(Vec2::new(25.0, 0.0), 1.1, &mut dispatcher);
    // single tap, closed by the next press
    r.pointer_down_into(Vec2::ZERO, 2.0, &mut dispatcher);
    r.pointer_up_into(Vec2::ZERO, 2.05, &mut dispatcher);
    r.pointer_down_into(Vec2::ZERO, 2.5, &mut dispatcher);
    r.tick_into(2.6, &mut dispatcher);

    let tally = tally.borrow();
    assert_eq!((tally.singles, tally.doubles), (1, 1));
    assert_eq!(tally.swipes, vec![Vec2::new(25.0, 0.0)]);
}
