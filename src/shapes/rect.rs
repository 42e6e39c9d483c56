//! Rectangle with optional per-corner radii.

use super::Primitive;
use std::any::Any;
use std::f64::consts::{FRAC_PI_2, PI};

#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub width: f64,
    pub height: f64,
    /// Corner radii: top-left, top-right, bottom-right, bottom-left.
    pub radius: [f64; 4],
}

impl RectShape {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            radius: [0.0; 4],
        }
    }

    pub fn with_radius(mut self, radius: [f64; 4]) -> Self {
        self.radius = radius;
        self
    }

    /// Radii clamped so opposite corners never overlap.
    fn clamped_radius(&self) -> [f64; 4] {
        let limit = (self.width.abs().min(self.height.abs()) / 2.0).max(0.0);
        self.radius.map(|r| r.clamp(0.0, limit))
    }
}

impl Primitive for RectShape {
    fn kind(&self) -> &'static str {
        "rect"
    }

    fn trace(&self, ctx: &cairo::Context, x: f64, y: f64) {
        let (w, h) = (self.width, self.height);
        let [tl, tr, br, bl] = self.clamped_radius();

        ctx.new_sub_path();
        if tl > 0.0 {
            ctx.arc(x + tl, y + tl, tl, PI, PI * 1.5);
        } else {
            ctx.move_to(x, y);
        }

        if tr > 0.0 {
            ctx.arc(x + w - tr, y + tr, tr, PI * 1.5, PI * 2.0);
        } else {
            ctx.line_to(x + w, y);
        }

        if br > 0.0 {
            ctx.arc(x + w - br, y + h - br, br, 0.0, FRAC_PI_2);
        } else {
            ctx.line_to(x + w, y + h);
        }

        if bl > 0.0 {
            ctx.arc(x + bl, y + h - bl, bl, FRAC_PI_2, PI);
        } else {
            ctx.line_to(x, y + h);
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

    #[test]
    fn radii_are_clamped_to_half_the_short_side() {
        let rect = RectShape::new(40.0, 10.0).with_radius([20.0, 2.0, -3.0, 5.0]);
        assert_eq!(rect.clamped_radius(), [5.0, 2.0, 0.0, 5.0]);
    }

    #[test]
    fn traced_path_covers_the_rectangle() {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 100, 100).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        RectShape::new(30.0, 20.0)
            .with_radius([4.0; 4])
            .trace(&ctx, 10.0, 10.0);

        assert!(ctx.in_fill(25.0, 20.0).unwrap());
        assert!(!ctx.in_fill(10.5, 10.5).unwrap());
        assert!(!ctx.in_fill(45.0, 20.0).unwrap());
    }
}
