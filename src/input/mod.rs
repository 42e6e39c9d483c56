//! Pointer input and event delivery.
//!
//! This module holds the host-facing pointer event types, the listener
//! registry every shape carries, and the payload listeners receive. The
//! gesture state machine that turns raw input into shape events lives on the
//! canvas.

pub mod emitter;
pub mod events;
pub mod shape_event;

pub use emitter::{EventEmitter, Listener, listener};
pub use events::{MouseButton, PointerInput, PointerKind};
pub use shape_event::ShapeEvent;
