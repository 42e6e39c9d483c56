//! RGBA color type, predefined constants and identification color keys.

use std::fmt;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use shapecanvas::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let semi_transparent_blue = Color::new(0.0, 0.0, 1.0, 0.5);
/// assert_eq!(semi_transparent_blue.with_alpha(1.0).a, 1.0);
/// # let _ = red;
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components in the 0.0-1.0 range.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Sets this color as the Cairo source, scaling alpha by `opacity`.
    pub fn apply(&self, ctx: &cairo::Context, opacity: f64) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a * opacity.clamp(0.0, 1.0));
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

/// Predefined red color (R=1.0, G=0.0, B=0.0)
pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// Predefined green color (R=0.0, G=1.0, B=0.0)
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);

/// Predefined blue color (R=0.0, G=0.0, B=1.0)
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

/// Predefined yellow color (R=1.0, G=1.0, B=0.0)
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);

/// Predefined orange color (R=1.0, G=0.5, B=0.0)
pub const ORANGE: Color = Color::new(1.0, 0.5, 0.0, 1.0);

/// Predefined pink/magenta color (R=1.0, G=0.0, B=1.0)
pub const PINK: Color = Color::new(1.0, 0.0, 1.0, 1.0);

/// Predefined white color (R=1.0, G=1.0, B=1.0)
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Predefined black color (R=0.0, G=0.0, B=0.0)
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Fully transparent color
pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

// ============================================================================
// Identification Colors
// ============================================================================

/// Flat RGB key painted on the identification surface for one shape.
///
/// Displayed as `rgb(r,g,b)`, which is also the registry key format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HitColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HitColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Sets the key as an opaque Cairo source.
    ///
    /// Each channel maps to exactly one 8-bit value when the surface stores it,
    /// so readback returns the same triple.
    pub fn apply(&self, ctx: &cairo::Context) {
        ctx.set_source_rgb(
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        );
    }
}

impl fmt::Display for HitColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}
