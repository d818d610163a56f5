//! Named Axes and Buttons
//!
//! Locomotion polls input by name ("Horizontal", "Vertical", "Jump") rather
//! than by device. The host maps its devices onto an [`InputSource`]; an
//! [`InputSnapshot`] is the plain map most hosts fill once per frame.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Polled input for one player.
pub trait InputSource {
    /// Axis value in [-1, 1]. Unknown axes read as 0.
    fn axis(&self, name: &str) -> f32;

    /// Whether the named button is held. Unknown buttons read as released.
    fn button(&self, name: &str) -> bool;
}

/// Axis and button names locomotion reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionBindings {
    pub x_axis: String,
    pub y_axis: String,
    pub jump_button: String,
}

impl Default for LocomotionBindings {
    fn default() -> Self {
        Self {
            x_axis: "Horizontal".to_string(),
            y_axis: "Vertical".to_string(),
            jump_button: "Jump".to_string(),
        }
    }
}

/// Input state captured for a single frame.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    axes: HashMap<String, f32>,
    buttons: HashSet<String>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an axis, clamped to [-1, 1].
    pub fn set_axis(&mut self, name: impl Into<String>, value: f32) {
        let value = if value.is_finite() { value.clamp(-1.0, 1.0) } else { 0.0 };
        self.axes.insert(name.into(), value);
    }

    pub fn set_button(&mut self, name: impl Into<String>, pressed: bool) {
        let name = name.into();
        if pressed {
            self.buttons.insert(name);
        } else {
            self.buttons.remove(&name);
        }
    }

    /// Builder form of [`set_axis`](Self::set_axis).
    pub fn with_axis(mut self, name: impl Into<String>, value: f32) -> Self {
        self.set_axis(name, value);
        self
    }

    /// Builder form of [`set_button`](Self::set_button).
    pub fn with_button(mut self, name: impl Into<String>, pressed: bool) -> Self {
        self.set_button(name, pressed);
        self
    }

    /// Release everything.
    pub fn reset(&mut self) {
        self.axes.clear();
        self.buttons.clear();
    }
}

impl InputSource for InputSnapshot {
    fn axis(&self, name: &str) -> f32 {
        self.axes.get(name).copied().unwrap_or(0.0)
    }

    fn button(&self, name: &str) -> bool {
        self.buttons.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_inputs_are_neutral() {
        let input = InputSnapshot::new();
        assert_eq!(input.axis("Horizontal"), 0.0);
        assert!(!input.button("Jump"));
    }

    #[test]
    fn test_axis_is_clamped() {
        let input = InputSnapshot::new()
            .with_axis("Vertical", 3.0)
            .with_axis("Horizontal", f32::NAN);
        assert_eq!(input.axis("Vertical"), 1.0);
        assert_eq!(input.axis("Horizontal"), 0.0);
    }

    #[test]
    fn test_button_press_and_release() {
        let mut input = InputSnapshot::new().with_button("Jump", true);
        assert!(input.button("Jump"));
        input.set_button("Jump", false);
        assert!(!input.button("Jump"));
    }

    #[test]
    fn test_default_bindings() {
        let bindings = LocomotionBindings::default();
        assert_eq!(bindings.x_axis, "Horizontal");
        assert_eq!(bindings.y_axis, "Vertical");
        assert_eq!(bindings.jump_button, "Jump");
    }
}
