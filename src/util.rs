//! Utility functions for colors, coordinate scaling and transform composition.
//!
//! This module provides:
//! - Color name lookup for configuration files
//! - Logical/device pixel conversion for the display scale factor
//! - Affine matrix helpers used when composing group transforms

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black", "transparent"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "transparent" => Some(TRANSPARENT),
        _ => None,
    }
}

// ============================================================================
// Display Scaling
// ============================================================================

/// Converts a logical layout length into backing-store pixels.
///
/// Rounds up so the raster always covers the full logical area.
pub fn to_backing_size(logical: f64, pixel_ratio: f64) -> i32 {
    (logical * pixel_ratio).ceil() as i32
}

/// Maps a logical pointer coordinate to the device pixel that contains it.
pub fn to_device_pixel(logical: f64, pixel_ratio: f64) -> i32 {
    (logical * pixel_ratio).floor() as i32
}

/// Squared Euclidean distance between two points.
pub fn distance_squared(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    dx * dx + dy * dy
}

// ============================================================================
// Transforms
// ============================================================================

/// Builds the matrix a group applies to its children.
///
/// The group's position is folded into the translation part of its own
/// transform, so `x`/`y` and `transform` never get applied twice.
pub fn group_matrix(transform: Option<&cairo::Matrix>, x: f64, y: f64) -> cairo::Matrix {
    let base = transform.copied().unwrap_or_else(cairo::Matrix::identity);
    cairo::Matrix::new(
        base.xx(),
        base.yx(),
        base.xy(),
        base.yy(),
        base.x0() + x,
        base.y0() + y,
    )
}
