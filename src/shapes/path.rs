//! Free-form path built from move/line/curve commands.

use super::Primitive;
use std::any::Any;

/// One path segment; coordinates are relative to the shape's anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    /// Cubic Bézier: two control points, then the end point.
    CurveTo(f64, f64, f64, f64, f64, f64),
    Close,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathShape {
    pub commands: Vec<PathCommand>,
}

impl PathShape {
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(x, y));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(x, y));
        self
    }

    pub fn curve_to(mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> Self {
        self.commands
            .push(PathCommand::CurveTo(x1, y1, x2, y2, x, y));
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }
}

impl Primitive for PathShape {
    fn kind(&self) -> &'static str {
        "path"
    }

    fn trace(&self, ctx: &cairo::Context, x: f64, y: f64) {
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(px, py) => ctx.move_to(x + px, y + py),
                PathCommand::LineTo(px, py) => ctx.line_to(x + px, y + py),
                PathCommand::CurveTo(x1, y1, x2, y2, px, py) => {
                    ctx.curve_to(x + x1, y + y1, x + x2, y + y2, x + px, y + py)
                }
                PathCommand::Close => ctx.close_path(),
            }
        }
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
    fn triangle_path_is_offset_by_anchor() {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 100, 100).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        PathShape::default()
            .move_to(0.0, 0.0)
            .line_to(20.0, 0.0)
            .line_to(0.0, 20.0)
            .close()
            .trace(&ctx, 40.0, 40.0);

        assert!(ctx.in_fill(44.0, 44.0).unwrap());
        assert!(!ctx.in_fill(4.0, 4.0).unwrap());
        assert!(!ctx.in_fill(58.0, 58.0).unwrap());
    }
}
