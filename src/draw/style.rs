//! Typed style attributes and their effect on a Cairo context.
//!
//! Every field is optional: `None` means "not set on this shape", so a child
//! inherits the value from its parent group. [`Style::merged`] performs that
//! overlay; the getters apply defaults for keys nobody set.

use super::color::Color;
use super::font::Font;

/// Horizontal text anchoring relative to the shape's `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Vertical text anchoring relative to the shape's `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Top,
    Middle,
    Bottom,
}

/// Drop shadow drawn underneath a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    /// Accepted for completeness; image surfaces draw hard-edged shadows.
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Shadow {
    pub fn new(color: Color, blur: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            color,
            blur,
            offset_x,
            offset_y,
        }
    }
}

const DEFAULT_MITER_LIMIT: f64 = 10.0;

/// Style keys recognised by the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: Option<f64>,
    pub line_cap: Option<cairo::LineCap>,
    pub line_join: Option<cairo::LineJoin>,
    pub line_dash: Option<Vec<f64>>,
    pub line_dash_offset: Option<f64>,
    pub miter_limit: Option<f64>,
    pub opacity: Option<f64>,
    pub shadow: Option<Shadow>,
    pub font: Option<Font>,
    pub text_align: Option<TextAlign>,
    pub text_baseline: Option<TextBaseline>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn line_cap(mut self, cap: cairo::LineCap) -> Self {
        self.line_cap = Some(cap);
        self
    }

    pub fn line_join(mut self, join: cairo::LineJoin) -> Self {
        self.line_join = Some(join);
        self
    }

    pub fn line_dash(mut self, dashes: Vec<f64>) -> Self {
        self.line_dash = Some(dashes);
        self
    }

    pub fn line_dash_offset(mut self, offset: f64) -> Self {
        self.line_dash_offset = Some(offset);
        self
    }

    pub fn miter_limit(mut self, limit: f64) -> Self {
        self.miter_limit = Some(limit);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn text_baseline(mut self, baseline: TextBaseline) -> Self {
        self.text_baseline = Some(baseline);
        self
    }

    /// Effective style of a child: the parent's keys overridden by every key
    /// the child set explicitly.
    pub fn merged(parent: &Style, child: &Style) -> Style {
        Style {
            fill: child.fill.or(parent.fill),
            stroke: child.stroke.or(parent.stroke),
            line_width: child.line_width.or(parent.line_width),
            line_cap: child.line_cap.or(parent.line_cap),
            line_join: child.line_join.or(parent.line_join),
            line_dash: child.line_dash.clone().or_else(|| parent.line_dash.clone()),
            line_dash_offset: child.line_dash_offset.or(parent.line_dash_offset),
            miter_limit: child.miter_limit.or(parent.miter_limit),
            opacity: child.opacity.or(parent.opacity),
            shadow: child.shadow.or(parent.shadow),
            font: child.font.clone().or_else(|| parent.font.clone()),
            text_align: child.text_align.or(parent.text_align),
            text_baseline: child.text_baseline.or(parent.text_baseline),
        }
    }

    pub fn effective_line_width(&self) -> f64 {
        self.line_width.unwrap_or(1.0).max(0.0)
    }

    pub fn effective_opacity(&self) -> f64 {
        self.opacity.unwrap_or(1.0).clamp(0.0, 1.0)
    }

    pub fn effective_font(&self) -> Font {
        self.font.clone().unwrap_or_default()
    }

    /// Applies the path-drawing keys to `ctx`. Unset keys fall back to Cairo's
    /// defaults, so nothing leaks from a previously drawn sibling.
    ///
    /// Colors are not applied here; they are set per fill/stroke pass so
    /// opacity and shadows can be folded in.
    pub fn apply_line(&self, ctx: &cairo::Context) {
        ctx.set_line_width(self.effective_line_width());
        ctx.set_line_cap(self.line_cap.unwrap_or(cairo::LineCap::Butt));
        ctx.set_line_join(self.line_join.unwrap_or(cairo::LineJoin::Miter));
        ctx.set_miter_limit(self.miter_limit.unwrap_or(DEFAULT_MITER_LIMIT));
        match &self.line_dash {
            Some(dashes) => ctx.set_dash(dashes, self.line_dash_offset.unwrap_or(0.0)),
            None => ctx.set_dash(&[], 0.0),
        }
    }
}
