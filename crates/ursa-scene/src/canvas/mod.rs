//! Immediate-mode 2D drawing surface.
//!
//! The scene issues commands to a [`Canvas`] and never owns pixels itself.
//! Coordinates are logical units; each backend maps them through its current
//! transform (`scale` / `translate`, scoped by `save` / `restore`).
//!
//! Backends:
//! - [`RecordingCanvas`]: records commands, used by tests and diagnostics
//! - `ursa_engine::render::PixmapCanvas`: CPU rasterizer presented on the GPU

mod recording;

pub use recording::{CanvasCmd, RecordingCanvas};

use crate::paint::Color;

/// Operator used when drawing one canvas onto another.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum CompositeOp {
    /// Source painted over destination.
    #[default]
    SourceOver,
    /// Destination kept only where the source is opaque.
    DestinationIn,
}

/// 2D drawing surface contract.
///
/// Path commands append to the current path, which `begin_path` discards.
/// `fill` and `stroke` paint the current path with the current state.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    fn scale(&mut self, sx: f64, sy: f64);
    fn translate(&mut self, tx: f64, ty: f64);

    /// Clears every pixel to transparent, regardless of the current transform.
    fn clear(&mut self);

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn bezier_curve_to(&mut self, cp0x: f64, cp0y: f64, cp1x: f64, cp1y: f64, x: f64, y: f64);

    /// Circular arc around `(x, y)`, clockwise from `start` to `end` radians.
    ///
    /// Connects to the arc start with a line when the path has a current point.
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);

    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    /// Draws `source` onto `self` at the device origin, ignoring the current
    /// transform, using `op`.
    fn composite(&mut self, source: &Self, op: CompositeOp)
    where
        Self: Sized;
}
