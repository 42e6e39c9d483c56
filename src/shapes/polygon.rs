//! Regular polygon centred on the anchor, first vertex straight up.

use super::Primitive;
use std::any::Any;
use std::f64::consts::TAU;

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    pub radius: f64,
    pub sides: u32,
}

impl PolygonShape {
    pub fn new(radius: f64, sides: u32) -> Self {
        Self { radius, sides }
    }

    /// Vertex positions around (`x`, `y`).
    pub fn vertices(&self, x: f64, y: f64) -> Vec<(f64, f64)> {
        (0..self.sides)
            .map(|index| {
                let angle = TAU / self.sides as f64 * index as f64;
                (x + angle.sin() * self.radius, y - angle.cos() * self.radius)
            })
            .collect()
    }
}

impl Primitive for PolygonShape {
    fn kind(&self) -> &'static str {
        "polygon"
    }

    fn trace(&self, ctx: &cairo::Context, x: f64, y: f64) {
        if self.sides < 3 {
            return;
        }
        ctx.new_sub_path();
        for (px, py) in self.vertices(x, y) {
            ctx.line_to(px, py);
        }
        ctx.close_path();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
