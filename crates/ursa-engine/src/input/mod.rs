//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types. The
//! runtime translates window events into [`InputEvent`]s; pointer input is
//! reduced to the single primary pointer the scene's drag controller expects.

pub(crate) mod platform;
mod tracker;
mod types;

pub use tracker::PointerTracker;
pub use types::{ButtonState, InputEvent, Key, KeyState, MouseButton, TouchPhase};
