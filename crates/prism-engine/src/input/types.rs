/// Keys a GUI library needs for navigation, editing and shortcuts.
///
/// Everything else arrives as `Key::Other` with the platform key code, and
/// printable input arrives separately as `InputEvent::Text`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Tab,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    Backspace,
    Space,
    Enter,
    Escape,

    // Clipboard/undo shortcuts
    A,
    C,
    V,
    X,
    Y,
    Z,

    Other(u32),
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Mouse wheel delta.
///
/// `Line` is notched-wheel style input; `Pixel` is high precision (touchpads).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

/// Platform-agnostic input event, positions in surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    PointerLeft,
    PointerButton { button: MouseButton, pressed: bool },
    MouseWheel(MouseWheelDelta),
    Key { key: Key, pressed: bool, modifiers: Modifiers },
    Text(String),
    ModifiersChanged(Modifiers),
    Focused(bool),
}

impl InputEvent {
    /// Events a GUI claims while it wants the mouse.
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerMoved { .. }
                | InputEvent::PointerLeft
                | InputEvent::PointerButton { .. }
                | InputEvent::MouseWheel(_)
        )
    }

    /// Events a GUI claims while it wants the keyboard.
    pub fn is_keyboard(&self) -> bool {
        matches!(self, InputEvent::Key { .. } | InputEvent::Text(_))
    }
}
