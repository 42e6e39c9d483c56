//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing surface geometry.
///
/// Sizes are logical (layout) pixels; the backing rasters are allocated at
/// `width * pixel_ratio` by `height * pixel_ratio` device pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurfaceConfig {
    /// Logical width in pixels
    #[serde(default = "default_width")]
    pub width: f64,

    /// Logical height in pixels
    #[serde(default = "default_height")]
    pub height: f64,

    /// Display scale factor between logical and device pixels (valid range: 0.5 - 4.0)
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f64,

    /// Color painted behind the scene on every render; transparent when unset
    #[serde(default)]
    pub background: Option<ColorSpec>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            pixel_ratio: default_pixel_ratio(),
            background: None,
        }
    }
}

/// Pointer interaction tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InteractionConfig {
    /// Maximum pointer travel in logical pixels between press and release that
    /// still counts as a click (valid range: 0.0 - 50.0). Pressing a draggable
    /// shape and moving this far starts a drag.
    #[serde(default = "default_click_distance")]
    pub click_distance: f64,

    /// Extra pixels added to the stroke width of silhouettes on the
    /// identification surface, making thin outlines easier to hit
    /// (valid range: 0.0 - 20.0)
    #[serde(default = "default_hit_stroke_padding")]
    pub hit_stroke_padding: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            click_distance: default_click_distance(),
            hit_stroke_padding: default_hit_stroke_padding(),
        }
    }
}

/// Debugging aids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DebugConfig {
    /// Composite the identification surface over the visible one after every render
    #[serde(default)]
    pub show_hit_canvas: bool,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    600.0
}

fn default_pixel_ratio() -> f64 {
    1.0
}

fn default_click_distance() -> f64 {
    3.0
}

fn default_hit_stroke_padding() -> f64 {
    0.0
}
