//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, and wires them to the
//! GPU layer, the input translator and the app.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
