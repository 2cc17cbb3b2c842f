use crate::paint::Color;
use crate::path::PathPart;
use crate::vector3::Vector3;

use super::ShapeId;

/// Which path generator a shape uses.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum ShapeKind {
    /// The authored `path` is used as-is.
    #[default]
    Path,
    /// The path is synthesized from the size; `closed` is forced off.
    Ellipse { width: f64, height: f64 },
}

/// Render style of a shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapeStyle {
    pub stroke: bool,
    pub fill: bool,
    pub color: Color,
    pub line_width: f64,
    pub closed: bool,
    /// When false the shape is a pure transform container.
    pub rendering: bool,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke: true,
            fill: false,
            color: Color::BLACK,
            line_width: 1.0,
            closed: true,
            rendering: true,
        }
    }
}

/// Construction options for a shape.
///
/// Every field has a default; set the ones you need with the builder
/// methods:
///
/// ```
/// use ursa_scene::{Color, ShapeOptions, Vector3};
///
/// let opts = ShapeOptions::new()
///     .path([Vector3::xy(-1.0, 0.0), Vector3::xy(1.0, 0.0)])
///     .translate(Vector3::new(0.0, 4.0, -1.0))
///     .color(Color::WHITE)
///     .line_width(6.0);
/// assert!(opts.style.stroke);
/// ```
///
/// `scale` is a full vector; pass `1.0` for axes that should not change.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeOptions {
    pub style: ShapeStyle,
    pub path: Vec<PathPart>,
    pub translate: Vector3,
    pub rotate: Vector3,
    pub scale: Vector3,
    pub add_to: Option<ShapeId>,
    pub kind: ShapeKind,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            style: ShapeStyle::default(),
            path: vec![PathPart::Point(Vector3::ZERO)],
            translate: Vector3::ZERO,
            rotate: Vector3::ZERO,
            scale: Vector3::ONE,
            add_to: None,
            kind: ShapeKind::Path,
        }
    }
}

impl ShapeOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for an ellipse of the given size.
    #[inline]
    pub fn ellipse(width: f64, height: f64) -> Self {
        Self { kind: ShapeKind::Ellipse { width, height }, ..Self::default() }
    }

    pub fn path<I>(mut self, parts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathPart>,
    {
        self.path = parts.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_to(mut self, parent: ShapeId) -> Self {
        self.add_to = Some(parent);
        self
    }

    pub fn translate(mut self, v: Vector3) -> Self {
        self.translate = v;
        self
    }

    pub fn rotate(mut self, v: Vector3) -> Self {
        self.rotate = v;
        self
    }

    pub fn scale(mut self, v: Vector3) -> Self {
        self.scale = v;
        self
    }

    pub fn stroke(mut self, on: bool) -> Self {
        self.style.stroke = on;
        self
    }

    pub fn fill(mut self, on: bool) -> Self {
        self.style.fill = on;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.style.line_width = width;
        self
    }

    pub fn closed(mut self, on: bool) -> Self {
        self.style.closed = on;
        self
    }

    pub fn rendering(mut self, on: bool) -> Self {
        self.style.rendering = on;
        self
    }
}
