//! The drawing surface: scene ownership, render passes and lifecycle.
//!
//! A [`Canvas`] owns the shape arena, the visible raster, the identification
//! raster and the pointer gesture state. Mutations only mark the canvas dirty;
//! the next [`Canvas::flush`] (or any hit test or pointer event) re-renders both
//! targets before anything reads them.

mod pointer;


use crate::config::{ColorSpec, Config};
use crate::draw::{Color, HitColor, Style, render};
use crate::error::{Result, SceneError};
use crate::hit::{self, HitCanvas};
use crate::input::{Listener, ShapeEvent};
use crate::scene::tree::describe;
use crate::scene::{Attrs, Content, Node, SceneTree, ShapeId, collect_before};
use crate::shapes::Primitive;
use crate::util;
use log::{debug, trace, warn};
use std::any::Any;
use std::fs::File;
use std::path::Path;

pub use pointer::PointerState;

/// Listener attached to a shape; receives the canvas so it can mutate the scene.
pub type ShapeListener = Listener<Canvas, ShapeEvent>;

/// Alpha used when compositing the identification target for debugging.
const HIT_OVERLAY_ALPHA: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Visible,
    Identification,
}

#[derive(Debug)]
pub struct Canvas {
    tree: SceneTree,
    surface: cairo::ImageSurface,
    hit: HitCanvas,
    width: f64,
    height: f64,
    pixel_ratio: f64,
    view: cairo::Matrix,
    background: Option<Color>,
    click_distance: f64,
    hit_stroke_padding: f64,
    show_hit_canvas: bool,
    dirty: bool,
    destroyed: bool,
    pointer: PointerState,
}

impl Canvas {
    /// Creates a canvas sized and tuned by `config`.
    ///
    /// Fails when the size is not positive or either raster cannot be
    /// allocated; no partially built canvas is returned.
    pub fn new(config: &Config) -> Result<Self> {
        Self::build(config, HitCanvas::new)
    }

    /// Like [`Canvas::new`] but identification colors come from a seeded
    /// generator, so renders are reproducible across runs.
    pub fn with_seed(config: &Config, seed: u64) -> Result<Self> {
        Self::build(config, |w, h| HitCanvas::with_seed(w, h, seed))
    }

    /// Creates a canvas with default interaction settings.
    pub fn with_size(width: f64, height: f64, pixel_ratio: f64) -> Result<Self> {
        let mut config = Config::default();
        config.surface.width = width;
        config.surface.height = height;
        config.surface.pixel_ratio = pixel_ratio;
        Self::new(&config)
    }

    fn build<F>(config: &Config, make_hit: F) -> Result<Self>
    where
        F: FnOnce(i32, i32) -> Result<HitCanvas>,
    {
        let width = config.surface.width;
        let height = config.surface.height;
        let pixel_ratio = config.surface.pixel_ratio;
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !(valid(width) && valid(height) && valid(pixel_ratio)) {
            return Err(SceneError::InvalidSize {
                width,
                height,
                pixel_ratio,
            });
        }

        let device_width = util::to_backing_size(width, pixel_ratio);
        let device_height = util::to_backing_size(height, pixel_ratio);
        let surface =
            cairo::ImageSurface::create(cairo::Format::ARgb32, device_width, device_height)
                .map_err(|source| SceneError::SurfaceCreation {
                    target: "visible",
                    width: device_width,
                    height: device_height,
                    source,
                })?;
        let hit = make_hit(device_width, device_height)?;

        debug!(
            "Created canvas {width}x{height} at pixel ratio {pixel_ratio} ({device_width}x{device_height} device pixels)"
        );

        Ok(Self {
            tree: SceneTree::new(),
            surface,
            hit,
            width,
            height,
            pixel_ratio,
            view: cairo::Matrix::identity(),
            background: config.surface.background.as_ref().map(ColorSpec::to_color),
            click_distance: config.interaction.click_distance,
            hit_stroke_padding: config.interaction.hit_stroke_padding,
            show_hit_canvas: config.debug.show_hit_canvas,
            dirty: true,
            destroyed: false,
            pointer: PointerState::default(),
        })
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.destroyed {
            Err(SceneError::Destroyed)
        } else {
            Ok(())
        }
    }

    // ------------------------------------------------------------------
    // Surface properties
    // ------------------------------------------------------------------

    /// Logical width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Logical height.
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Backing raster size in device pixels.
    pub fn device_size(&self) -> (i32, i32) {
        (self.surface.width(), self.surface.height())
    }

    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    pub fn hit_canvas(&self) -> &HitCanvas {
        &self.hit
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn set_show_hit_canvas(&mut self, show: bool) {
        if self.show_hit_canvas != show {
            self.show_hit_canvas = show;
            self.dirty = true;
        }
    }

    /// Current view transform applied to the whole scene.
    pub fn transform(&self) -> cairo::Matrix {
        self.view
    }

    /// Replaces the view transform applied on top of the pixel-ratio scale.
    ///
    /// Pointer coordinates stay in surface space; the transform is applied to
    /// both targets so hit testing follows it.
    pub fn set_transform(&mut self, matrix: cairo::Matrix) -> Result<()> {
        self.ensure_alive()?;
        matrix.try_invert()?;
        self.view = matrix;
        self.dirty = true;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Scene structure
    // ------------------------------------------------------------------

    /// The root group every live shape hangs off.
    pub fn root(&self) -> ShapeId {
        self.tree.root()
    }

    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    pub fn node(&self, id: ShapeId) -> Result<&Node> {
        self.tree.get(id)
    }

    /// Creates a detached primitive shape.
    pub fn create(&mut self, attrs: Attrs, primitive: impl Primitive) -> Result<ShapeId> {
        self.ensure_alive()?;
        Ok(self
            .tree
            .insert(attrs, Content::Primitive(Box::new(primitive))))
    }

    /// Creates a detached, empty group.
    pub fn create_group(&mut self, attrs: Attrs) -> Result<ShapeId> {
        self.ensure_alive()?;
        Ok(self.tree.insert(attrs, Content::Group(Vec::new())))
    }

    /// Adds `id` on top of the root group.
    pub fn add(&mut self, id: ShapeId) -> Result<()> {
        self.group_add(self.tree.root(), id)
    }

    /// Removes `id` from the root group. Returns `false` when it was not a
    /// direct child of the root.
    pub fn remove(&mut self, id: ShapeId) -> Result<bool> {
        self.group_remove(self.tree.root(), id)
    }

    /// Appends `child` to `group`, detaching it from any previous parent.
    pub fn group_add(&mut self, group: ShapeId, child: ShapeId) -> Result<()> {
        self.ensure_alive()?;
        let released = self.tree.append(group, child)?;
        self.release(&released);
        self.dirty = true;
        Ok(())
    }

    /// Detaches `child` from `group` and releases the colors of its subtree.
    ///
    /// Removing a shape that is not a child of `group` does nothing.
    pub fn group_remove(&mut self, group: ShapeId, child: ShapeId) -> Result<bool> {
        self.ensure_alive()?;
        let released = self.tree.remove_child(group, child)?;
        if released.is_empty() {
            warn!(
                "Ignoring remove of {}: not a child of {}",
                describe(child),
                describe(group)
            );
            return Ok(false);
        }
        self.release(&released);
        self.dirty = true;
        Ok(true)
    }

    /// Detaches every child of the root. The shapes stay valid and can be
    /// added again.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_alive()?;
        let root = self.tree.root();
        let children = self.tree.children(root).to_vec();
        for child in children {
            let released = self.tree.remove_child(root, child)?;
            self.release(&released);
        }
        self.pointer = PointerState::default();
        self.dirty = true;
        debug!("Cleared canvas");
        Ok(())
    }

    /// Frees `id` and its descendants. Their ids become invalid.
    pub fn dispose(&mut self, id: ShapeId) -> Result<()> {
        self.ensure_alive()?;
        let was_attached = self.tree.is_attached(id);
        let freed = self.tree.dispose(id)?;
        let mut freed_ids = Vec::with_capacity(freed.len());
        for (freed_id, node) in &freed {
            if let Some(color) = node.color {
                self.hit.release(*freed_id, color);
            }
            freed_ids.push(*freed_id);
        }
        self.pointer.forget(&freed_ids);
        if was_attached {
            self.dirty = true;
        }
        debug!("Disposed {} shape(s)", freed.len());
        Ok(())
    }

    /// Tears the canvas down: listeners are dropped, every shape is detached
    /// and further mutations fail with [`SceneError::Destroyed`].
    ///
    /// Calling it again is a no-op.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        let root = self.tree.root();
        let children = self.tree.children(root).to_vec();
        for child in children {
            if let Ok(released) = self.tree.remove_child(root, child) {
                self.release(&released);
            }
        }
        for node in self.tree.nodes_mut() {
            node.emitter.clear();
            node.color = None;
        }
        self.pointer = PointerState::default();
        self.destroyed = true;
        self.dirty = false;
        debug!("Destroyed canvas");
    }

    /// Drops identification colors of shapes that left the live tree.
    fn release(&mut self, ids: &[ShapeId]) {
        for &id in ids {
            if let Ok(node) = self.tree.get_mut(id) {
                if let Some(color) = node.color.take() {
                    self.hit.release(id, color);
                }
            }
        }
        self.pointer.forget(ids);
    }

    pub fn parent(&self, id: ShapeId) -> Option<ShapeId> {
        self.tree.parent(id)
    }

    pub fn children(&self, id: ShapeId) -> &[ShapeId] {
        self.tree.children(id)
    }

    pub fn ancestors(&self, id: ShapeId) -> Vec<ShapeId> {
        self.tree.ancestors(id)
    }

    pub fn is_attached(&self, id: ShapeId) -> bool {
        self.tree.is_attached(id)
    }

    pub fn hit_color(&self, id: ShapeId) -> Option<HitColor> {
        self.tree.get(id).ok().and_then(Node::hit_color)
    }

    // ------------------------------------------------------------------
    // Attributes and user data
    // ------------------------------------------------------------------

    pub fn attrs(&self, id: ShapeId) -> Result<&Attrs> {
        Ok(&self.tree.get(id)?.attrs)
    }

    /// Edits a shape's attributes and schedules a re-render.
    pub fn update<F>(&mut self, id: ShapeId, f: F) -> Result<()>
    where
        F: FnOnce(&mut Attrs),
    {
        self.update_silent(id, f)?;
        self.dirty = true;
        Ok(())
    }

    /// Edits a shape's attributes without scheduling a re-render.
    pub fn update_silent<F>(&mut self, id: ShapeId, f: F) -> Result<()>
    where
        F: FnOnce(&mut Attrs),
    {
        self.ensure_alive()?;
        f(&mut self.tree.get_mut(id)?.attrs);
        Ok(())
    }

    /// Typed access to a primitive's geometry. `None` for groups and for
    /// primitives of another type.
    pub fn geometry<T: Primitive>(&self, id: ShapeId) -> Result<Option<&T>> {
        let node = self.tree.get(id)?;
        Ok(node
            .primitive()
            .and_then(|primitive| primitive.as_any().downcast_ref::<T>()))
    }

    /// Edits a primitive's geometry and schedules a re-render.
    ///
    /// Returns `false`, leaving everything untouched, when `id` is not a `T`.
    pub fn update_geometry<T, F>(&mut self, id: ShapeId, f: F) -> Result<bool>
    where
        T: Primitive,
        F: FnOnce(&mut T),
    {
        self.ensure_alive()?;
        let node = self.tree.get_mut(id)?;
        let Content::Primitive(primitive) = &mut node.content else {
            return Ok(false);
        };
        match primitive.as_any_mut().downcast_mut::<T>() {
            Some(geometry) => {
                f(geometry);
                self.dirty = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Attaches arbitrary user data to a shape, replacing any previous value.
    pub fn set_data<T: Any>(&mut self, id: ShapeId, data: T) -> Result<()> {
        self.tree.get_mut(id)?.data = Some(Box::new(data));
        Ok(())
    }

    /// User data previously stored with [`Canvas::set_data`], if it is a `T`.
    pub fn data<T: Any>(&self, id: ShapeId) -> Option<&T> {
        self.tree
            .get(id)
            .ok()
            .and_then(|node| node.data.as_ref())
            .and_then(|data| data.downcast_ref::<T>())
    }

    pub fn take_data(&mut self, id: ShapeId) -> Option<Box<dyn Any>> {
        self.tree.get_mut(id).ok().and_then(|node| node.data.take())
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Renders only if something changed since the last render.
    pub fn flush(&mut self) -> Result<()> {
        if self.dirty && !self.destroyed {
            self.render()?;
        }
        Ok(())
    }

    /// Redraws both targets from the current scene.
    pub fn render(&mut self) -> Result<()> {
        self.ensure_alive()?;
        self.assign_colors()?;
        let root = self.tree.root();

        {
            let ctx = cairo::Context::new(&self.surface)?;
            render::clear_surface(&ctx)?;
            render::render_background(&ctx, self.background)?;
            self.install_view(&ctx);
            self.render_node(&ctx, root, &Style::default(), Pass::Visible)?;
        }

        {
            let ctx = self.hit.context()?;
            render::clear_surface(&ctx)?;
            self.install_view(&ctx);
            self.render_node(&ctx, root, &Style::default(), Pass::Identification)?;
        }

        if self.show_hit_canvas {
            let ctx = cairo::Context::new(&self.surface)?;
            render::composite_surface(&ctx, self.hit.surface(), HIT_OVERLAY_ALPHA)?;
        }

        self.surface.flush();
        self.dirty = false;
        trace!("Rendered {} node(s)", self.tree.len());
        Ok(())
    }

    /// Gives every live primitive a registered identification color.
    fn assign_colors(&mut self) -> Result<()> {
        for id in collect_before(&self.tree, self.tree.root()) {
            let node = self.tree.get_mut(id)?;
            if node.is_group() {
                continue;
            }
            node.color = Some(self.hit.assign(id, node.color));
        }
        Ok(())
    }

    fn install_view(&self, ctx: &cairo::Context) {
        ctx.scale(self.pixel_ratio, self.pixel_ratio);
        ctx.transform(self.view);
    }

    /// Draws `id` and its subtree under the caller's transform.
    ///
    /// Each node runs inside its own save/restore so styles and transforms
    /// never leak into siblings.
    fn render_node(
        &self,
        ctx: &cairo::Context,
        id: ShapeId,
        inherited: &Style,
        pass: Pass,
    ) -> Result<()> {
        let node = self.tree.get(id)?;
        let attrs = &node.attrs;
        let style = Style::merged(inherited, &attrs.style);

        ctx.save()?;
        let drawn = match &node.content {
            Content::Group(children) => {
                ctx.transform(util::group_matrix(attrs.transform.as_ref(), attrs.x, attrs.y));
                children
                    .iter()
                    .try_for_each(|&child| self.render_node(ctx, child, &style, pass))
            }
            Content::Primitive(primitive) => {
                if let Some(matrix) = attrs.transform {
                    ctx.transform(matrix);
                }
                match pass {
                    Pass::Visible => primitive
                        .render(ctx, attrs.x, attrs.y, &style)
                        .map_err(SceneError::from),
                    Pass::Identification => match node.color {
                        Some(color) => primitive
                            .render_hit(
                                ctx,
                                attrs.x,
                                attrs.y,
                                &style,
                                color,
                                self.hit_stroke_padding,
                            )
                            .map_err(SceneError::from),
                        None => Err(SceneError::MissingHitColor(describe(id))),
                    },
                }
            }
        };
        ctx.restore()?;
        drawn
    }

    // ------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------

    /// Live shape under logical point (`x`, `y`), rendering first if needed.
    pub fn hit_test(&mut self, x: f64, y: f64) -> Result<Option<ShapeId>> {
        if self.destroyed {
            return Ok(None);
        }
        self.flush()?;
        self.get_hit_shape(x, y)
    }

    /// Live shape under logical point (`x`, `y`) as of the last render.
    ///
    /// Points outside the surface and background pixels resolve to `None`.
    pub fn get_hit_shape(&mut self, x: f64, y: f64) -> Result<Option<ShapeId>> {
        let px = util::to_device_pixel(x, self.pixel_ratio);
        let py = util::to_device_pixel(y, self.pixel_ratio);
        let hit = self.hit.shape_at(px, py)?;
        Ok(hit.filter(|id| self.tree.is_attached(*id)))
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    /// Registers `listener` for `event_type` on `id` (the root included).
    pub fn on(
        &mut self,
        id: ShapeId,
        event_type: impl Into<String>,
        listener: ShapeListener,
    ) -> Result<()> {
        self.ensure_alive()?;
        self.tree.get_mut(id)?.emitter.on(event_type, listener);
        Ok(())
    }

    /// Removes the first registration of `listener` for `event_type` on `id`.
    pub fn off(&mut self, id: ShapeId, event_type: &str, listener: &ShapeListener) -> Result<bool> {
        Ok(self.tree.get_mut(id)?.emitter.off(event_type, listener))
    }

    // ------------------------------------------------------------------
    // Readback
    // ------------------------------------------------------------------

    /// Raw premultiplied ARGB bytes of the visible target.
    pub fn pixels(&mut self) -> Result<Vec<u8>> {
        hit::snapshot(&mut self.surface)
    }

    /// Raw bytes of the identification target.
    pub fn hit_pixels(&mut self) -> Result<Vec<u8>> {
        self.hit.pixels()
    }

    /// Premultiplied ARGB value of one visible device pixel.
    pub fn pixel(&mut self, x: i32, y: i32) -> Result<Option<u32>> {
        hit::read_pixel(&mut self.surface, x, y)
    }

    /// Flushes and writes the visible target as PNG.
    pub fn write_png(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.flush()?;
        write_surface_png(&self.surface, path.as_ref())
    }

    /// Flushes and writes the identification target as PNG.
    pub fn write_hit_png(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.flush()?;
        write_surface_png(self.hit.surface(), path.as_ref())
    }
}

fn write_surface_png(surface: &cairo::ImageSurface, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(cairo::IoError::Io)?;
    surface.write_to_png(&mut file)?;
    debug!("Wrote {}", path.display());
    Ok(())
}
