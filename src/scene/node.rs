//! Shape attributes and the per-node record stored in the scene arena.

use crate::canvas::Canvas;
use crate::draw::{HitColor, Style};
use crate::input::{EventEmitter, ShapeEvent};
use crate::shapes::Primitive;
use std::any::Any;
use std::fmt;

use super::ShapeId;

/// Attributes shared by every shape and group.
///
/// For primitives (`x`, `y`) is the geometry anchor. For groups it is the
/// offset applied to every child, folded into the group's transform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs {
    pub x: f64,
    pub y: f64,
    pub transform: Option<cairo::Matrix>,
    pub style: Style,
    pub draggable: bool,
}

impl Attrs {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn transform(mut self, transform: cairo::Matrix) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// What a node draws: a primitive leaf, or an ordered list of children.
pub enum Content {
    Primitive(Box<dyn Primitive>),
    /// Child ids in z-order; later entries are drawn on top and hit first.
    Group(Vec<ShapeId>),
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Primitive(primitive) => f.debug_tuple("Primitive").field(primitive).finish(),
            Content::Group(children) => f.debug_tuple("Group").field(children).finish(),
        }
    }
}

/// One shape in the scene arena.
pub struct Node {
    pub(crate) attrs: Attrs,
    pub(crate) content: Content,
    /// Group this node is a child of.
    pub(crate) parent: Option<ShapeId>,
    /// Connected to the canvas root, i.e. live.
    pub(crate) attached: bool,
    /// Identification key; `None` until the first render while attached.
    pub(crate) color: Option<HitColor>,
    pub(crate) emitter: EventEmitter<Canvas, ShapeEvent>,
    pub(crate) data: Option<Box<dyn Any>>,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("attrs", &self.attrs)
            .field("parent", &self.parent)
            .field("attached", &self.attached)
            .field("color", &self.color.map(|c| c.to_string()))
            .field("emitter", &self.emitter)
            .finish()
    }
}

impl Node {
    pub(crate) fn new(attrs: Attrs, content: Content) -> Self {
        Self {
            attrs,
            content,
            parent: None,
            attached: false,
            color: None,
            emitter: EventEmitter::new(),
            data: None,
        }
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn kind(&self) -> &'static str {
        match &self.content {
            Content::Primitive(primitive) => primitive.kind(),
            Content::Group(_) => "group",
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.content, Content::Group(_))
    }

    pub fn primitive(&self) -> Option<&dyn Primitive> {
        match &self.content {
            Content::Primitive(primitive) => Some(primitive.as_ref()),
            Content::Group(_) => None,
        }
    }

    pub fn children(&self) -> &[ShapeId] {
        match &self.content {
            Content::Group(children) => children,
            Content::Primitive(_) => &[],
        }
    }

    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn hit_color(&self) -> Option<HitColor> {
        self.color
    }
}
