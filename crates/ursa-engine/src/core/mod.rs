//! Contracts between the runtime (platform loop) and the application.
//!
//! Apps see translated [`InputEvent`](crate::input::InputEvent)s and one
//! [`FrameCtx`] per frame; winit and wgpu details stay in the runtime.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
