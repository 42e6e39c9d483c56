//! Primitive shapes that can live in the scene.
//!
//! Each primitive knows how to trace its geometry relative to the anchor
//! point stored in its [`Attrs`](crate::scene::Attrs), how to paint it with an
//! effective [`Style`], and how to paint its flat identification silhouette.
//! Groups are not primitives; they only compose their children.

pub mod arc;
pub mod image;
pub mod line;
pub mod path;
pub mod polygon;
pub mod rect;
pub mod text;

pub use arc::ArcShape;
pub use image::ImageShape;
pub use line::LineShape;
pub use path::{PathCommand, PathShape};
pub use polygon::PolygonShape;
pub use rect::RectShape;
pub use text::TextShape;

use crate::draw::{HitColor, Style, render};
use std::any::Any;
use std::fmt;

/// Contract every drawable leaf satisfies.
///
/// `render` and `render_hit` are called with the caller's transform already
/// installed and must leave the context state as they found it.
pub trait Primitive: fmt::Debug + 'static {
    /// Short type name used in logs ("rect", "arc", ...).
    fn kind(&self) -> &'static str;

    /// Builds the shape's path with its anchor at (`x`, `y`). Must not paint.
    fn trace(&self, ctx: &cairo::Context, x: f64, y: f64);

    /// Whether the silhouette's interior is part of the hit region.
    fn is_closed(&self) -> bool {
        true
    }

    /// Draws the visible representation.
    fn render(
        &self,
        ctx: &cairo::Context,
        x: f64,
        y: f64,
        style: &Style,
    ) -> Result<(), cairo::Error> {
        render::paint_path(ctx, style, |ctx| self.trace(ctx, x, y))
    }

    /// Draws the flat silhouette in `color` on the identification target.
    ///
    /// Stroked shapes widen the silhouette by the stroke width plus
    /// `stroke_padding` so thin outlines stay clickable.
    fn render_hit(
        &self,
        ctx: &cairo::Context,
        x: f64,
        y: f64,
        style: &Style,
        color: HitColor,
        stroke_padding: f64,
    ) -> Result<(), cairo::Error> {
        let line_width = if style.stroke.is_some() || !self.is_closed() {
            style.effective_line_width() + stroke_padding
        } else {
            0.0
        };
        render::paint_silhouette(ctx, color, line_width, self.is_closed(), |ctx| {
            self.trace(ctx, x, y)
        })
    }

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
