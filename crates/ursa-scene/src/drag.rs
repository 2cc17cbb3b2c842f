//! Pointer drag recognition.
//!
//! Hosts feed [`PointerEvent`]s in page (logical pixel) coordinates; the
//! controller turns them into [`DragGesture`]s relative to the press point.

/// Pointer position in logical pixels of the host page/window.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct PagePoint {
    pub x: f64,
    pub y: f64,
}

impl PagePoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Host-agnostic pointer input.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    Down(PagePoint),
    Move(PagePoint),
    Up,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { start: PagePoint },
}

/// Recognized drag transition.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DragGesture {
    Started,
    /// Offset from the press point.
    Moved { dx: f64, dy: f64 },
    Ended,
}

#[derive(Debug, Default, Clone)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Advances the state machine. Moves and releases while idle are ignored.
    ///
    /// A second press while dragging restarts the drag from the new point.
    pub fn handle(&mut self, event: PointerEvent) -> Option<DragGesture> {
        match (self.state, event) {
            (_, PointerEvent::Down(start)) => {
                log::trace!("drag start at ({}, {})", start.x, start.y);
                self.state = DragState::Dragging { start };
                Some(DragGesture::Started)
            }
            (DragState::Dragging { start }, PointerEvent::Move(p)) => {
                Some(DragGesture::Moved { dx: p.x - start.x, dy: p.y - start.y })
            }
            (DragState::Dragging { .. }, PointerEvent::Up) => {
                log::trace!("drag end");
                self.state = DragState::Idle;
                Some(DragGesture::Ended)
            }
            (DragState::Idle, PointerEvent::Move(_) | PointerEvent::Up) => None,
        }
    }
}
