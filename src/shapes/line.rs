//! Straight segment starting at the anchor.

use super::Primitive;
use std::any::Any;

/// Line from the anchor to anchor + (`dx`, `dy`).
///
/// The end point is stored relative to the anchor so dragging moves the whole
/// segment instead of stretching it.
#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub dx: f64,
    pub dy: f64,
}

impl LineShape {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Segment between two points given in the parent's coordinate space;
    /// the anchor must be set to (`x0`, `y0`).
    pub fn between(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(x1 - x0, y1 - y0)
    }
}

impl Primitive for LineShape {
    fn kind(&self) -> &'static str {
        "line"
    }

    fn trace(&self, ctx: &cairo::Context, x: f64, y: f64) {
        ctx.move_to(x, y);
        ctx.line_to(x + self.dx, y + self.dy);
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
