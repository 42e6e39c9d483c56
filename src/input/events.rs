//! Low-level pointer input as delivered by the host.

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (press, click and drag)
    Left,
    /// Right mouse button (context menu)
    Right,
    /// Middle mouse button
    Middle,
}

/// Raw pointer event types emitted by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Up,
    Move,
    /// Native click from the host; clicks are synthesised from down/up instead.
    Click,
    ContextMenu,
    DoubleClick,
}

impl PointerKind {
    /// DOM-style event name used when the raw event is forwarded to shapes.
    pub fn as_str(&self) -> &'static str {
        match self {
            PointerKind::Down => "mousedown",
            PointerKind::Up => "mouseup",
            PointerKind::Move => "mousemove",
            PointerKind::Click => "click",
            PointerKind::ContextMenu => "contextmenu",
            PointerKind::DoubleClick => "dblclick",
        }
    }
}

/// One pointer event in logical (layout) coordinates relative to the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
    /// Button that changed state; `None` for plain motion.
    pub button: Option<MouseButton>,
}

impl PointerInput {
    pub fn down(button: MouseButton, x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Down,
            x,
            y,
            button: Some(button),
        }
    }

    pub fn up(button: MouseButton, x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Up,
            x,
            y,
            button: Some(button),
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Move,
            x,
            y,
            button: None,
        }
    }

    pub fn context_menu(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::ContextMenu,
            x,
            y,
            button: Some(MouseButton::Right),
        }
    }

    pub fn double_click(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::DoubleClick,
            x,
            y,
            button: Some(MouseButton::Left),
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}
