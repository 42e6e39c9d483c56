//! Rendering primitives and style definitions (Cairo-based).
//!
//! This module defines the drawing vocabulary shared by every shape:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`HitColor`]: flat RGB key used on the identification surface
//! - [`Style`]: typed style attributes with parent/child overlay
//! - [`Font`]: font descriptor for text shapes
//! - Painting helpers for visible and identification passes

pub mod color;
pub mod font;
pub mod render;
pub mod style;

pub use color::{Color, HitColor};
pub use font::Font;
pub use render::{clear_surface, paint_path, paint_silhouette, render_background};
pub use style::{Shadow, Style, TextAlign, TextBaseline};

#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
