//! Arena of shapes with parent/child bookkeeping.
//!
//! Groups own their children through id lists; the parent link on each node
//! is a lookup only. A node has at most one parent, and the root group never
//! has one.

use crate::error::{Result, SceneError};
use log::{debug, trace};
use slotmap::SlotMap;

use super::ShapeId;
use super::node::{Attrs, Content, Node};
use super::traverse::{self, Hierarchy};

#[derive(Debug)]
pub struct SceneTree {
    nodes: SlotMap<ShapeId, Node>,
    root: ShapeId,
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Hierarchy for SceneTree {
    type Id = ShapeId;

    fn child_ids(&self, id: ShapeId) -> &[ShapeId] {
        self.nodes.get(id).map(Node::children).unwrap_or(&[])
    }
}

pub(crate) fn describe(id: ShapeId) -> String {
    format!("{id:?}")
}

impl SceneTree {
    /// Creates a tree holding only an attached, empty root group.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let mut root = Node::new(Attrs::default(), Content::Group(Vec::new()));
        root.attached = true;
        let root = nodes.insert(root);
        Self { nodes, root }
    }

    pub fn root(&self) -> ShapeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stores a new detached node.
    pub fn insert(&mut self, attrs: Attrs, content: Content) -> ShapeId {
        let id = self.nodes.insert(Node::new(attrs, content));
        trace!("Inserted detached {} {}", self.nodes[id].kind(), describe(id));
        id
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: ShapeId) -> Result<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| SceneError::UnknownShape(describe(id)))
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| SceneError::UnknownShape(describe(id)))
    }

    pub fn children(&self, id: ShapeId) -> &[ShapeId] {
        self.child_ids(id)
    }

    pub fn parent(&self, id: ShapeId) -> Option<ShapeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    pub fn is_attached(&self, id: ShapeId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.attached)
    }

    /// Parent chain from the immediate parent out to the outermost group.
    pub fn ancestors(&self, id: ShapeId) -> Vec<ShapeId> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent) = current {
            chain.push(parent);
            current = self.parent(parent);
        }
        chain
    }

    /// True when `ancestor` is `id` itself or one of its parents.
    pub fn is_ancestor_or_self(&self, ancestor: ShapeId, id: ShapeId) -> bool {
        ancestor == id || self.ancestors(id).contains(&ancestor)
    }

    /// Appends `child` to the end of `group`'s children (top of z-order).
    ///
    /// A child that already has a parent, including `group` itself, is
    /// detached first. Returns the subtree whose attachment state changed
    /// from attached to detached, so the caller can release its colors.
    pub fn append(&mut self, group: ShapeId, child: ShapeId) -> Result<Vec<ShapeId>> {
        if !self.get(group)?.is_group() {
            return Err(SceneError::NotAGroup(describe(group)));
        }
        self.get(child)?;
        if child == self.root || self.is_ancestor_or_self(child, group) {
            return Err(SceneError::Cycle {
                parent: describe(group),
                child: describe(child),
            });
        }

        let was_attached = self.is_attached(child);
        self.detach(child);

        let attached = self.is_attached(group);
        if let Content::Group(children) = &mut self.get_mut(group)?.content {
            children.push(child);
        }
        self.get_mut(child)?.parent = Some(group);
        self.set_subtree_attached(child, attached);
        debug!(
            "Added {} to group {} (attached: {attached})",
            describe(child),
            describe(group)
        );

        if was_attached && !attached {
            Ok(traverse::collect_after(self, child))
        } else {
            Ok(Vec::new())
        }
    }

    /// Removes `child` from `group` if it is currently one of its children.
    ///
    /// Returns the detached subtree in post-order, or an empty list when
    /// `child` was not a child of `group`.
    pub fn remove_child(&mut self, group: ShapeId, child: ShapeId) -> Result<Vec<ShapeId>> {
        self.get(group)?;
        if self.parent(child) != Some(group) {
            trace!(
                "Ignoring remove of {}: not a child of {}",
                describe(child),
                describe(group)
            );
            return Ok(Vec::new());
        }
        self.detach(child);
        Ok(traverse::collect_after(self, child))
    }

    /// Unlinks `id` from its parent and marks its subtree detached.
    pub fn detach(&mut self, id: ShapeId) -> Option<ShapeId> {
        let parent = self.parent(id)?;
        if let Some(Node {
            content: Content::Group(children),
            ..
        }) = self.nodes.get_mut(parent)
        {
            if let Some(index) = children.iter().position(|c| *c == id) {
                children.remove(index);
            }
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = None;
        }
        self.set_subtree_attached(id, false);
        Some(parent)
    }

    fn set_subtree_attached(&mut self, id: ShapeId, attached: bool) {
        for node_id in traverse::collect_before(self, id) {
            if let Some(node) = self.nodes.get_mut(node_id) {
                node.attached = attached;
            }
        }
    }

    /// Frees a detached node and its descendants from the arena.
    ///
    /// Returns the freed nodes so the caller can drop any state keyed by them.
    pub fn dispose(&mut self, id: ShapeId) -> Result<Vec<(ShapeId, Node)>> {
        if id == self.root {
            return Err(SceneError::Cycle {
                parent: describe(id),
                child: describe(id),
            });
        }
        self.get(id)?;
        self.detach(id);
        let ids = traverse::collect_after(self, id);
        Ok(ids
            .into_iter()
            .filter_map(|node_id| self.nodes.remove(node_id).map(|node| (node_id, node)))
            .collect())
    }

    /// All node ids, root included, in arena order.
    pub fn ids(&self) -> Vec<ShapeId> {
        self.nodes.keys().collect()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }
}
