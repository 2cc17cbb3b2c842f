use ursa_scene::{PagePoint, PointerEvent};

use super::{ButtonState, MouseButton, TouchPhase};

/// Folds mouse and touch input into one primary pointer.
///
/// Only the left button and the first active touch count. Motion is reported
/// only while that pointer is pressed; a second touch, or a mouse press
/// during a touch, is ignored.
#[derive(Debug, Default, Clone)]
pub struct PointerTracker {
    cursor: Option<PagePoint>,
    mouse_down: bool,
    touch: Option<u64>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position, if the cursor is over the window.
    #[inline]
    pub fn cursor(&self) -> Option<PagePoint> {
        self.cursor
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.mouse_down || self.touch.is_some()
    }

    pub fn cursor_moved(&mut self, p: PagePoint) -> Option<PointerEvent> {
        self.cursor = Some(p);
        (self.mouse_down && self.touch.is_none()).then_some(PointerEvent::Move(p))
    }

    /// The cursor left the window. A drag in progress keeps going.
    pub fn cursor_left(&mut self) {
        self.cursor = None;
    }

    pub fn mouse_button(&mut self, button: MouseButton, state: ButtonState) -> Option<PointerEvent> {
        if button != MouseButton::Left || self.touch.is_some() {
            return None;
        }
        match state {
            ButtonState::Pressed if !self.mouse_down => {
                self.mouse_down = true;
                // winit reports presses without a position; use the tracked cursor.
                Some(PointerEvent::Down(self.cursor.unwrap_or_default()))
            }
            ButtonState::Released if self.mouse_down => {
                self.mouse_down = false;
                Some(PointerEvent::Up)
            }
            _ => None,
        }
    }

    pub fn touch(&mut self, id: u64, phase: TouchPhase, p: PagePoint) -> Option<PointerEvent> {
        match phase {
            TouchPhase::Started => {
                if self.is_pressed() {
                    return None;
                }
                self.touch = Some(id);
                Some(PointerEvent::Down(p))
            }
            TouchPhase::Moved => (self.touch == Some(id)).then_some(PointerEvent::Move(p)),
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.touch != Some(id) {
                    return None;
                }
                self.touch = None;
                Some(PointerEvent::Up)
            }
        }
    }

    /// Losing focus mid-drag releases the pointer; the release may never arrive.
    pub fn focus_changed(&mut self, focused: bool) -> Option<PointerEvent> {
        if focused || !self.is_pressed() {
            return None;
        }
        self.mouse_down = false;
        self.touch = None;
        Some(PointerEvent::Up)
    }
}
