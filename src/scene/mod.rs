//! Shape hierarchy: ids, per-node attributes, the arena and tree walks.

pub mod node;
pub mod traverse;
pub mod tree;

pub use node::{Attrs, Content, Node};
pub use traverse::{Hierarchy, collect_after, collect_before, each_after, each_before};
pub use tree::SceneTree;

slotmap::new_key_type! {
    /// Stable handle to a shape or group owned by a [`Canvas`](crate::canvas::Canvas).
    pub struct ShapeId;
}
