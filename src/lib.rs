//! Retained-mode 2D scene graph with color-keyed hit testing.
//!
//! Shapes live in a [`Canvas`](canvas::Canvas) as a tree of groups and
//! primitives. Every render draws the scene twice: once on the visible Cairo
//! surface and once on an off-screen identification surface where each shape
//! is a flat silhouette in a color unique to it. Pointer input is resolved by
//! reading a single pixel there, then run through a gesture state machine
//! that emits hover, click and drag events to shape listeners.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod error;
pub mod hit;
pub mod input;
pub mod scene;
pub mod shapes;
pub mod util;

pub use canvas::Canvas;
pub use config::Config;
pub use error::{Result, SceneError};
pub use scene::{Attrs, ShapeId};
