//! Circular arc or full circle centred on the anchor.

use super::Primitive;
use std::any::Any;
use std::f64::consts::TAU;

#[derive(Debug, Clone, PartialEq)]
pub struct ArcShape {
    pub radius: f64,
    /// Angles in radians, clockwise from the positive x axis.
    pub start_angle: f64,
    pub end_angle: f64,
    pub anticlockwise: bool,
}

impl ArcShape {
    /// Full circle.
    pub fn circle(radius: f64) -> Self {
        Self {
            radius,
            start_angle: 0.0,
            end_angle: TAU,
            anticlockwise: false,
        }
    }

    pub fn new(radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            radius,
            start_angle,
            end_angle,
            anticlockwise: false,
        }
    }

    pub fn anticlockwise(mut self) -> Self {
        self.anticlockwise = true;
        self
    }
}

impl Primitive for ArcShape {
    fn kind(&self) -> &'static str {
        "arc"
    }

    fn trace(&self, ctx: &cairo::Context, x: f64, y: f64) {
        let radius = self.radius.max(0.0);
        ctx.new_sub_path();
        if self.anticlockwise {
            ctx.arc_negative(x, y, radius, self.start_angle, self.end_angle);
        } else {
            ctx.arc(x, y, radius, self.start_angle, self.end_angle);
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn half_circle_only_covers_one_side() {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 100, 100).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        ArcShape::new(20.0, 0.0, PI).trace(&ctx, 50.0, 50.0);

        // Clockwise in screen space from 0 to PI sweeps through +y.
        assert!(ctx.in_fill(50.0, 60.0).unwrap());
        assert!(!ctx.in_fill(50.0, 40.0).unwrap());
    }

    #[test]
    fn circle_covers_its_centre() {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 100, 100).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        ArcShape::circle(10.0).trace(&ctx, 30.0, 30.0);
        assert!(ctx.in_fill(30.0, 30.0).unwrap());
        assert!(!ctx.in_fill(45.0, 30.0).unwrap());
    }
}
