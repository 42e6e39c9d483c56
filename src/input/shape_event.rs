//! Payload delivered to shape listeners.

use super::events::MouseButton;
use crate::scene::ShapeId;

pub const MOUSE_DOWN: &str = "mousedown";
pub const MOUSE_UP: &str = "mouseup";
pub const MOUSE_MOVE: &str = "mousemove";
pub const MOUSE_ENTER: &str = "mouseenter";
pub const MOUSE_OVER: &str = "mouseover";
pub const MOUSE_OUT: &str = "mouseout";
pub const MOUSE_LEAVE: &str = "mouseleave";
pub const CLICK: &str = "click";
pub const DRAG_START: &str = "dragstart";
pub const DRAG: &str = "drag";
pub const DRAG_END: &str = "dragend";
pub const DROP: &str = "drop";

/// Event names that stay on the target and never reach ancestor groups.
pub const NON_BUBBLING: [&str; 4] = [DRAG_START, DRAG, DRAG_END, DROP];

pub fn bubbles(event_type: &str) -> bool {
    !NON_BUBBLING.contains(&event_type)
}

/// What a listener receives, identical on the target and on its ancestors.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEvent {
    pub event_type: String,
    /// Shape the event was resolved to, not the group the listener sits on.
    pub target: ShapeId,
    /// Pointer position in logical surface coordinates.
    pub x: f64,
    pub y: f64,
    /// Pointer movement since the previous pointer event.
    pub movement_x: f64,
    pub movement_y: f64,
    pub button: Option<MouseButton>,
}

impl ShapeEvent {
    /// Custom event carrying no pointer data.
    pub fn custom(event_type: impl Into<String>, target: ShapeId) -> Self {
        Self {
            event_type: event_type.into(),
            target,
            x: 0.0,
            y: 0.0,
            movement_x: 0.0,
            movement_y: 0.0,
            button: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_family_does_not_bubble() {
        for name in NON_BUBBLING {
            assert!(!bubbles(name));
        }
        assert!(bubbles(CLICK));
        assert!(bubbles(MOUSE_ENTER));
        assert!(bubbles("custom"));
    }
}
