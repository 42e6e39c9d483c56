//! Error type shared by the scene, the identification surface and the canvas.

use thiserror::Error;

/// Errors raised by scene and surface operations.
///
/// Recoverable per-call conditions (hit tests outside the surface, removing a
/// shape that is not a child) are not errors; they return normally.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Failed to create {target} surface ({width}x{height}): {source}")]
    SurfaceCreation {
        target: &'static str,
        width: i32,
        height: i32,
        #[source]
        source: cairo::Error,
    },

    #[error("Invalid surface size {width}x{height} at pixel ratio {pixel_ratio}")]
    InvalidSize {
        width: f64,
        height: f64,
        pixel_ratio: f64,
    },

    #[error("Cairo drawing error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface pixel data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("Failed to write PNG: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Shape {0} has no identification color; render the canvas before hit rendering")]
    MissingHitColor(String),

    #[error("Unknown or disposed shape {0}")]
    UnknownShape(String),

    #[error("Shape {0} is not a group")]
    NotAGroup(String),

    #[error("Cannot add {child} under {parent}: it would create a cycle")]
    Cycle { parent: String, child: String },

    #[error("Canvas has been destroyed")]
    Destroyed,

    #[error("Event listener failed: {0}")]
    Listener(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SceneError>;
