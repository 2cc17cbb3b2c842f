//! Ursa engine crate.
//!
//! Owns the platform + GPU runtime: window loop, input translation, CPU
//! rasterization of scene canvases and presentation through wgpu.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
