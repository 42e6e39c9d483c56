//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// background = "white"
///
/// # Custom RGB color (0-255 per component)
/// background = [250, 245, 230]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black, transparent
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown color names fall back to white with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using white", name);
                WHITE
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_and_rgb_colors_parse() {
        assert_eq!(ColorSpec::Name("Black".into()).to_color(), BLACK);
        assert_eq!(ColorSpec::Rgb([255, 0, 0]).to_color(), RED);
        assert_eq!(ColorSpec::Name("chartreuse".into()).to_color(), WHITE);
    }
}
