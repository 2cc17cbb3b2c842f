//! Ursa scene crate.
//!
//! Pseudo-3D vector shapes drawn onto a 2D canvas: points are transformed in
//! 3D, projected by dropping z, and painted back-to-front by a depth proxy.
//! This crate has no platform or GPU dependencies.

pub mod bear;
pub mod canvas;
pub mod drag;
pub mod paint;
pub mod path;
pub mod scene;
pub mod shape;
pub mod vector3;

pub use canvas::{Canvas, CanvasCmd, CompositeOp, RecordingCanvas};
pub use drag::{DragController, DragGesture, DragState, PagePoint, PointerEvent};
pub use paint::{Color, ColorParseError};
pub use path::{PathAction, PathMethod, PathPart};
pub use scene::{AutoplayConfig, CanvasSet, Scene, Stage, StageConfig};
pub use shape::{RenderStrategy, Shape, ShapeId, ShapeOptions, ShapeTree};
pub use vector3::Vector3;
