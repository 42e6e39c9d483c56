//! Single-run text laid out with Pango.

use super::Primitive;
use crate::draw::{BLACK, HitColor, Style, TextAlign, TextBaseline, render};
use std::any::Any;

const ELLIPSIS: &str = "...";

/// Text anchored at (`x`, `y`) according to the effective `text_align` and
/// `text_baseline`.
///
/// Text is filled with the effective `fill` (black when unset) and outlined
/// when `stroke` is set. With `max_width`, overflowing text is cut and ends
/// with an ellipsis.
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub text: String,
    pub max_width: Option<f64>,
}

impl TextShape {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_width: None,
        }
    }

    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Builds the Pango layout with the text already fitted to `max_width`.
    pub fn layout(&self, ctx: &cairo::Context, style: &Style) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(ctx);
        layout.set_font_description(Some(&style.effective_font().description()));
        layout.set_text(&self.text);

        if let Some(max_width) = self.max_width {
            if logical_size(&layout).0 > max_width {
                let fitted = fit_with_ellipsis(&layout, &self.text, max_width);
                layout.set_text(&fitted);
            }
        }

        layout
    }

    /// Top-left corner of the layout box for an anchor at (`x`, `y`).
    fn layout_origin(&self, layout: &pango::Layout, x: f64, y: f64, style: &Style) -> (f64, f64) {
        let (width, height) = logical_size(layout);
        let baseline = layout.baseline() as f64 / pango::SCALE as f64;

        let left = match style.text_align.unwrap_or_default() {
            TextAlign::Start => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::End => x - width,
        };
        let top = match style.text_baseline.unwrap_or_default() {
            TextBaseline::Alphabetic => y - baseline,
            TextBaseline::Top => y,
            TextBaseline::Middle => y - height / 2.0,
            TextBaseline::Bottom => y - height,
        };
        (left, top)
    }

    /// Layout box (x, y, width, height) in the caller's user space.
    pub fn bounds(
        &self,
        ctx: &cairo::Context,
        x: f64,
        y: f64,
        style: &Style,
    ) -> (f64, f64, f64, f64) {
        let layout = self.layout(ctx, style);
        let (left, top) = self.layout_origin(&layout, x, y, style);
        let (width, height) = logical_size(&layout);
        (left, top, width, height)
    }
}

fn logical_size(layout: &pango::Layout) -> (f64, f64) {
    let (_ink, logical) = layout.extents();
    let scale = pango::SCALE as f64;
    (logical.width() as f64 / scale, logical.height() as f64 / scale)
}

/// Drops trailing characters until `text + "..."` fits in `max_width`.
fn fit_with_ellipsis(layout: &pango::Layout, text: &str, max_width: f64) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    loop {
        let candidate: String = chars.iter().collect::<String>() + ELLIPSIS;
        layout.set_text(&candidate);
        if chars.is_empty() || logical_size(layout).0 <= max_width {
            return candidate;
        }
        chars.pop();
    }
}

impl Primitive for TextShape {
    fn kind(&self) -> &'static str {
        "text"
    }

    /// Outline of the glyphs laid out with the default font.
    fn trace(&self, ctx: &cairo::Context, x: f64, y: f64) {
        let style = Style::default();
        let layout = self.layout(ctx, &style);
        let (left, top) = self.layout_origin(&layout, x, y, &style);
        ctx.move_to(left, top);
        pangocairo::functions::layout_path(ctx, &layout);
    }

    fn render(
        &self,
        ctx: &cairo::Context,
        x: f64,
        y: f64,
        style: &Style,
    ) -> Result<(), cairo::Error> {
        if self.text.is_empty() {
            return Ok(());
        }

        let opacity = style.effective_opacity();
        let layout = self.layout(ctx, style);
        let (left, top) = self.layout_origin(&layout, x, y, style);

        ctx.save()?;

        if let Some(shadow) = style.shadow {
            ctx.move_to(left + shadow.offset_x, top + shadow.offset_y);
            shadow.color.apply(ctx, opacity);
            pangocairo::functions::show_layout(ctx, &layout);
        }

        if let Some(stroke) = style.stroke {
            ctx.new_path();
            ctx.move_to(left, top);
            pangocairo::functions::layout_path(ctx, &layout);
            style.apply_line(ctx);
            stroke.apply(ctx, opacity);
            ctx.stroke()?;
        }

        ctx.move_to(left, top);
        style.fill.unwrap_or(BLACK).apply(ctx, opacity);
        pangocairo::functions::show_layout(ctx, &layout);

        ctx.new_path();
        ctx.restore()
    }

    /// The silhouette is the whole layout box so gaps between glyphs still hit.
    fn render_hit(
        &self,
        ctx: &cairo::Context,
        x: f64,
        y: f64,
        style: &Style,
        color: HitColor,
        _stroke_padding: f64,
    ) -> Result<(), cairo::Error> {
        if self.text.is_empty() {
            return Ok(());
        }
        let (left, top, width, height) = self.bounds(ctx, x, y, style);
        render::paint_rect_silhouette(ctx, color, left, top, width, height)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
