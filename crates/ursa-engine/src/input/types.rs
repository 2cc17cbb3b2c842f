use ursa_scene::PointerEvent;

/// Keyboard keys the runtime distinguishes. Everything else is `Unknown`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    /// Platform key code not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Platform-agnostic input event delivered to the app.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary pointer (left mouse button or first touch), logical pixels.
    Pointer(PointerEvent),
    Key {
        key: Key,
        state: KeyState,
        repeat: bool,
    },
    Focused(bool),
}
