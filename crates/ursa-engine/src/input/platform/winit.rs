use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, TouchPhase as WinitTouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use ursa_scene::PagePoint;

use crate::input::{ButtonState, InputEvent, Key, KeyState, MouseButton, PointerTracker, TouchPhase};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Pointer events pass through `tracker`, which may swallow them. Losing
/// focus mid-drag is reported as a pointer release instead of `Focused`.
pub(crate) fn translate_window_event(
    window: &Window,
    tracker: &mut PointerTracker,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => tracker
            .cursor_moved(to_logical(window, *position))
            .map(InputEvent::Pointer),

        WindowEvent::CursorLeft { .. } => {
            tracker.cursor_left();
            None
        }

        WindowEvent::MouseInput { state, button, .. } => {
            let state = match state {
                ElementState::Pressed => ButtonState::Pressed,
                ElementState::Released => ButtonState::Released,
            };
            tracker
                .mouse_button(map_mouse_button(*button), state)
                .map(InputEvent::Pointer)
        }

        WindowEvent::Touch(touch) => {
            let phase = match touch.phase {
                WinitTouchPhase::Started => TouchPhase::Started,
                WinitTouchPhase::Moved => TouchPhase::Moved,
                WinitTouchPhase::Ended => TouchPhase::Ended,
                WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
            };
            tracker
                .touch(touch.id, phase, to_logical(window, touch.location))
                .map(InputEvent::Pointer)
        }

        WindowEvent::Focused(focused) => Some(
            tracker
                .focus_changed(*focused)
                .map_or(InputEvent::Focused(*focused), InputEvent::Pointer),
        ),

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };
            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> PagePoint {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    PagePoint::new(logical.x, logical.y)
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::Enter | KeyCode::NumpadEnter) => Key::Enter,
        PhysicalKey::Code(KeyCode::Space) => Key::Space,
        PhysicalKey::Code(other) => Key::Unknown(other as u32),
        // No stable numeric for native codes.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
