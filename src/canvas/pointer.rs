use crate::error::{Result, SceneError};
use crate::input::shape_event::{
    self, CLICK, DRAG, DRAG_END, DRAG_START, DROP, MOUSE_DOWN, MOUSE_ENTER, MOUSE_LEAVE,
    MOUSE_MOVE, MOUSE_OUT, MOUSE_OVER, MOUSE_UP,
};
use crate::input::{MouseButton, PointerInput, PointerKind, ShapeEvent};
use crate::scene::ShapeId;
use crate::util;
use log::trace;

use super::Canvas;

/// Pointer interaction state tracked between input events.
///
/// There is no explicit state enum: a press is pending while `pressed` is
/// set, a drag is running while `dragging` is set, and both are never set at
/// the same time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerState {
    /// Shape the pointer was over after the last move.
    pub hovered: Option<ShapeId>,
    /// Shape under the last left press; candidate for click or drag.
    pub pressed: Option<ShapeId>,
    /// Shape currently being dragged.
    pub dragging: Option<ShapeId>,
    /// Logical position of the last left press.
    pub press_origin: (f64, f64),
    /// Logical position of the previous pointer event, for movement deltas.
    pub last_position: Option<(f64, f64)>,
}

impl PointerState {
    /// Drops references to shapes that left the live tree.
    pub(crate) fn forget(&mut self, ids: &[ShapeId]) {
        for slot in [&mut self.hovered, &mut self.pressed, &mut self.dragging] {
            if slot.is_some_and(|id| ids.contains(&id)) {
                *slot = None;
            }
        }
    }
}

/// Pointer facts shared by every shape event produced from one input.
#[derive(Debug, Clone, Copy)]
struct Pointer {
    x: f64,
    y: f64,
    movement: (f64, f64),
    button: Option<MouseButton>,
}

impl Canvas {
    pub fn pointer_state(&self) -> &PointerState {
        &self.pointer
    }

    pub fn hovered(&self) -> Option<ShapeId> {
        self.pointer.hovered
    }

    pub fn pressed(&self) -> Option<ShapeId> {
        self.pointer.pressed
    }

    pub fn dragging(&self) -> Option<ShapeId> {
        self.pointer.dragging
    }

    /// Feeds one host pointer event through the gesture state machine.
    ///
    /// The scene is rendered before the hit test and again after listeners
    /// ran, so the next event always sees current geometry. Events arriving
    /// after [`Canvas::destroy`] are ignored.
    ///
    /// # Errors
    /// The first listener error aborts the rest of this event's dispatch and
    /// is returned as [`SceneError::Listener`].
    pub fn handle_pointer(&mut self, input: PointerInput) -> Result<()> {
        if self.destroyed {
            trace!("Ignoring {} on destroyed canvas", input.kind.as_str());
            return Ok(());
        }

        self.flush()?;
        let hit = self.get_hit_shape(input.x, input.y)?;
        let movement = self
            .pointer
            .last_position
            .map_or((0.0, 0.0), |(lx, ly)| (input.x - lx, input.y - ly));
        self.pointer.last_position = Some(input.position());

        let pointer = Pointer {
            x: input.x,
            y: input.y,
            movement,
            button: input.button,
        };
        trace!(
            "{} at ({:.1}, {:.1}) over {:?}",
            input.kind.as_str(),
            input.x,
            input.y,
            hit
        );

        match input.kind {
            PointerKind::Down => self.on_pointer_down(hit, pointer)?,
            PointerKind::Move => self.on_pointer_move(hit, pointer)?,
            PointerKind::Up => self.on_pointer_up(hit, pointer)?,
            PointerKind::Click => {
                trace!("Ignoring host click; clicks are synthesised from press and release");
            }
            PointerKind::ContextMenu | PointerKind::DoubleClick => {
                if let Some(target) = hit {
                    self.dispatch(target, input.kind.as_str(), pointer)?;
                }
            }
        }

        self.flush()
    }

    /// Processes a button press.
    ///
    /// # Behavior
    /// - Forwards `mousedown` to the hit shape (bubbling)
    /// - A left press outside a drag arms click/drag tracking for the hit
    ///   shape, or for nothing when the press landed on the background or a
    ///   `mousedown` listener detached the shape
    fn on_pointer_down(&mut self, hit: Option<ShapeId>, pointer: Pointer) -> Result<()> {
        if let Some(target) = hit {
            self.dispatch(target, MOUSE_DOWN, pointer)?;
        }
        if pointer.button == Some(MouseButton::Left) && self.pointer.dragging.is_none() {
            self.pointer.pressed = hit.filter(|id| self.tree.is_attached(*id));
            self.pointer.press_origin = (pointer.x, pointer.y);
        }
        Ok(())
    }

    /// Processes pointer motion.
    ///
    /// # Behavior
    /// - Leaving a shape emits `mouseout` then `mouseleave` on it
    /// - During a drag, moves the dragged shape by the pointer delta and
    ///   emits `drag`
    /// - Moving a pressed draggable shape at least the click distance away
    ///   from the press starts a drag: `dragstart` then `drag`, with the
    ///   shape caught up to the pointer
    /// - Otherwise emits `mousemove` on the hit shape
    /// - Entering a shape emits `mouseenter` then `mouseover` on it
    fn on_pointer_move(&mut self, hit: Option<ShapeId>, pointer: Pointer) -> Result<()> {
        let previous = self.pointer.hovered;

        if hit != previous {
            if let Some(old) = previous.filter(|id| self.tree.contains(*id)) {
                self.dispatch(old, MOUSE_OUT, pointer)?;
                self.dispatch(old, MOUSE_LEAVE, pointer)?;
            }
        }

        if let Some(dragged) = self.pointer.dragging {
            self.translate(dragged, pointer.movement);
            self.dispatch(dragged, DRAG, pointer)?;
        } else if let Some(target) = hit.filter(|id| self.starts_drag(*id, pointer)) {
            let (ox, oy) = self.pointer.press_origin;
            self.pointer.pressed = None;
            self.pointer.dragging = Some(target);
            self.translate(target, (pointer.x - ox, pointer.y - oy));
            self.dispatch(target, DRAG_START, pointer)?;
            self.dispatch(target, DRAG, pointer)?;
        } else if let Some(target) = hit {
            self.dispatch(target, MOUSE_MOVE, pointer)?;
        }

        if hit != previous {
            if let Some(target) = hit.filter(|id| self.tree.contains(*id)) {
                self.dispatch(target, MOUSE_ENTER, pointer)?;
                self.dispatch(target, MOUSE_OVER, pointer)?;
            }
        }

        if !self.destroyed {
            self.pointer.hovered = hit.filter(|id| self.tree.is_attached(*id));
        }
        Ok(())
    }

    /// Processes a button release.
    ///
    /// # Behavior
    /// - Forwards `mouseup` to the hit shape (bubbling)
    /// - A left release closer than the click distance to the press emits
    ///   `click` on the pressed shape (bubbling)
    /// - Ends a running drag with `dragend` then `drop`
    /// - Always disarms the pending press and the running drag, even when a
    ///   listener fails
    fn on_pointer_up(&mut self, hit: Option<ShapeId>, pointer: Pointer) -> Result<()> {
        let pressed = self.pointer.pressed.take();
        let dragged = self.pointer.dragging.take();

        if let Some(target) = hit {
            self.dispatch(target, MOUSE_UP, pointer)?;
        }

        if pointer.button == Some(MouseButton::Left) {
            if let Some(target) = pressed.filter(|id| self.tree.contains(*id)) {
                let origin = self.pointer.press_origin;
                let travel = util::distance_squared(origin, (pointer.x, pointer.y));
                if travel < self.click_distance * self.click_distance {
                    self.dispatch(target, CLICK, pointer)?;
                }
            }
        }

        if let Some(target) = dragged.filter(|id| self.tree.contains(*id)) {
            self.dispatch(target, DRAG_END, pointer)?;
            self.dispatch(target, DROP, pointer)?;
        }
        Ok(())
    }

    fn starts_drag(&self, id: ShapeId, pointer: Pointer) -> bool {
        if self.pointer.pressed != Some(id) {
            return false;
        }
        let draggable = self.tree.get(id).is_ok_and(|node| node.attrs.draggable);
        let travel = util::distance_squared(self.pointer.press_origin, (pointer.x, pointer.y));
        draggable && travel >= self.click_distance * self.click_distance
    }

    fn translate(&mut self, id: ShapeId, (dx, dy): (f64, f64)) {
        if let Ok(node) = self.tree.get_mut(id) {
            node.attrs.x += dx;
            node.attrs.y += dy;
            self.dirty = true;
        }
    }

    fn dispatch(&mut self, target: ShapeId, event_type: &str, pointer: Pointer) -> Result<()> {
        let event = ShapeEvent {
            event_type: event_type.to_string(),
            target,
            x: pointer.x,
            y: pointer.y,
            movement_x: pointer.movement.0,
            movement_y: pointer.movement.1,
            button: pointer.button,
        };
        self.emit(target, &event)
    }

    /// Delivers `event` to listeners on `target`, then on each ancestor from
    /// the innermost group outwards unless the event type does not bubble.
    ///
    /// The ancestor chain and each listener list are captured before any
    /// listener runs, so listeners may freely restructure the scene. Delivery
    /// stops when a listener destroys the canvas.
    pub fn emit(&mut self, target: ShapeId, event: &ShapeEvent) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }

        let mut chain = vec![target];
        if shape_event::bubbles(&event.event_type) {
            chain.extend(self.tree.ancestors(target));
        }
        trace!("Dispatching {} through {} node(s)", event.event_type, chain.len());

        let listeners: Vec<_> = chain
            .into_iter()
            .filter_map(|id| self.tree.get(id).ok())
            .flat_map(|node| node.emitter.listeners(&event.event_type))
            .collect();

        for listener in listeners {
            listener(self, event).map_err(SceneError::Listener)?;
            if self.destroyed {
                return Ok(());
            }
        }
        Ok(())
    }
}
