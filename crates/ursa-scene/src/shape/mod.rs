//! Scene-graph shapes.
//!
//! Shapes are stored in a [`ShapeTree`] arena and addressed by [`ShapeId`].
//! A shape owns its path actions and its local transform; the tree owns the
//! parent/child relation, which is fixed at insertion time.
//!
//! Per frame:
//! - [`ShapeTree::update`] resets render geometry and applies transforms
//! - [`Shape::update_sort_value`] refreshes the depth proxy
//! - [`Shape::render`] issues canvas commands

mod ellipse;
mod options;
mod tree;

pub use ellipse::ellipse_path;
pub use options::{ShapeKind, ShapeOptions, ShapeStyle};
pub use tree::ShapeTree;

use core::f64::consts::TAU;

use crate::canvas::Canvas;
use crate::path::{PathAction, PathMethod, PathPart, link_arcs, parse_path};
use crate::vector3::Vector3;

/// Handle to a shape inside a [`ShapeTree`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub(crate) usize);

impl ShapeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// How the scene renderer draws a shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RenderStrategy {
    /// The shape draws its own path onto the main canvas.
    #[default]
    Standard,
    /// The shape's path becomes a mask for `overlay`:
    /// overlay shapes are drawn on their own canvas, clipped to the shape with
    /// destination-in, and the result is drawn onto the main canvas.
    MaskedComposite { overlay: Vec<ShapeId> },
}

/// One node of the scene graph.
#[derive(Debug, Clone)]
pub struct Shape {
    pub style: ShapeStyle,
    pub translate: Vector3,
    pub rotate: Vector3,
    pub scale: Vector3,

    kind: ShapeKind,
    path: Vec<PathPart>,
    actions: Vec<PathAction>,

    parent: Option<ShapeId>,
    children: Vec<ShapeId>,

    sort_value: f64,
    strategy: RenderStrategy,
}

impl Shape {
    /// Builds a detached shape. Attachment to `add_to` is done by the tree.
    pub(crate) fn new(options: ShapeOptions) -> Self {
        let ShapeOptions { mut style, path, translate, rotate, scale, add_to, kind } = options;

        let path = match kind {
            ShapeKind::Path => path,
            ShapeKind::Ellipse { width, height } => {
                style.closed = false;
                ellipse_path(width, height)
            }
        };

        Self {
            style,
            translate: translate.sanitized(),
            rotate: rotate.sanitized(),
            scale: scale.sanitized(),
            kind,
            actions: parse_path(&path),
            path,
            parent: add_to,
            children: Vec::new(),
            sort_value: 0.0,
            strategy: RenderStrategy::Standard,
        }
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Authored path parts.
    #[inline]
    pub fn path(&self) -> &[PathPart] {
        &self.path
    }

    #[inline]
    pub fn actions(&self) -> &[PathAction] {
        &self.actions
    }

    #[inline]
    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[ShapeId] {
        &self.children
    }

    /// Depth proxy; only meaningful after [`update_sort_value`](Self::update_sort_value)
    /// ran for the current frame.
    #[inline]
    pub fn sort_value(&self) -> f64 {
        self.sort_value
    }

    #[inline]
    pub fn strategy(&self) -> &RenderStrategy {
        &self.strategy
    }

    #[inline]
    pub(crate) fn strategy_mut(&mut self) -> &mut RenderStrategy {
        &mut self.strategy
    }

    /// A single-action shape is drawn as a filled circle.
    #[inline]
    pub fn is_dot(&self) -> bool {
        self.actions.len() == 1
    }

    /// Recognized options as they are now, for [`ShapeTree::copy`].
    pub fn options(&self) -> ShapeOptions {
        ShapeOptions {
            style: self.style,
            path: self.path.clone(),
            translate: self.translate,
            rotate: self.rotate,
            scale: self.scale,
            add_to: self.parent,
            kind: self.kind,
        }
    }

    /// Restores render geometry to the authored geometry.
    pub fn reset(&mut self) {
        for action in &mut self.actions {
            action.reset();
        }
    }

    /// Transforms this shape's own render geometry (not its children).
    pub fn transform_actions(&mut self, translation: Vector3, rotation: Vector3, scale: Vector3) {
        for action in &mut self.actions {
            action.transform(translation, rotation, scale);
        }
        link_arcs(&mut self.actions);
    }

    /// Mean z of every action's end point. Shapes without actions get `0`.
    pub fn update_sort_value(&mut self) {
        if self.actions.is_empty() {
            self.sort_value = 0.0;
            return;
        }
        let total: f64 = self.actions.iter().map(|a| a.end_point().z).sum();
        self.sort_value = total / self.actions.len() as f64;
    }

    /// Draws the shape with its own style. Ignores the render strategy.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        if !self.style.rendering || self.actions.is_empty() {
            return;
        }
        if self.is_dot() {
            self.render_dot(canvas);
        } else {
            self.render_path(canvas);
        }
    }

    // Zero-length strokes are not drawn by every backend, so dots are circles.
    fn render_dot<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let point = self.actions[0].end_point();
        canvas.set_fill_color(self.style.color);
        canvas.begin_path();
        canvas.arc(point.x, point.y, self.style.line_width / 2.0, 0.0, TAU);
        canvas.fill();
    }

    fn render_path<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.set_fill_color(self.style.color);
        canvas.set_stroke_color(self.style.color);
        canvas.set_line_width(self.style.line_width);

        canvas.begin_path();
        for action in &self.actions {
            action.render(canvas);
        }

        // A lone segment must never be closed back onto itself.
        let is_open_segment =
            self.actions.len() == 2 && self.actions[1].method() == PathMethod::Line;
        if self.style.closed && !is_open_segment {
            canvas.close_path();
        }
        if self.style.stroke {
            canvas.stroke();
        }
        if self.style.fill {
            canvas.fill();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasCmd, RecordingCanvas};
    use crate::paint::Color;

    fn closes(tree: &ShapeTree, id: ShapeId) -> usize {
        let mut canvas = RecordingCanvas::new();
        tree[id].render(&mut canvas);
        canvas.count(|c| matches!(c, CanvasCmd::ClosePath))
    }

    // ── close rule ────────────────────────────────────────────────────────

    #[test]
    fn two_point_line_is_never_closed() {
        let mut tree = ShapeTree::new();
        let id = tree.add(
            ShapeOptions::new()
                .path([Vector3::xy(-1.0, 0.0), Vector3::xy(1.0, 0.0)])
                .closed(true),
        );
        assert_eq!(closes(&tree, id), 0);
    }

    #[test]
    fn other_closed_paths_are_closed() {
        let mut tree = ShapeTree::new();
        let triangle = tree.add(ShapeOptions::new().path([
            Vector3::xy(0.0, 0.0),
            Vector3::xy(1.0, 0.0),
            Vector3::xy(0.0, 1.0),
        ]));
        let curve = tree.add(ShapeOptions::new().path([
            PathPart::Point(Vector3::ZERO),
            PathPart::Bezier([Vector3::xy(0.0, 1.0), Vector3::xy(1.0, 1.0), Vector3::xy(1.0, 0.0)]),
        ]));
        let arc = tree.add(ShapeOptions::new().path([
            PathPart::Point(Vector3::ZERO),
            PathPart::Arc([Vector3::xy(1.0, 0.0), Vector3::xy(1.0, 1.0)]),
        ]));
        assert_eq!(closes(&tree, triangle), 1);
        assert_eq!(closes(&tree, curve), 1);
        assert_eq!(closes(&tree, arc), 1);
    }

    #[test]
    fn open_shapes_are_not_closed() {
        let mut tree = ShapeTree::new();
        let id = tree.add(
            ShapeOptions::new()
                .path([Vector3::xy(0.0, 0.0), Vector3::xy(1.0, 0.0), Vector3::xy(0.0, 1.0)])
                .closed(false),
        );
        assert_eq!(closes(&tree, id), 0);
    }

    // ── dots ──────────────────────────────────────────────────────────────

    #[test]
    fn single_action_renders_filled_circle() {
        let color = Color::from_rgba8(0x11, 0x99, 0xFF, 0xFF);
        for (stroke, fill) in [(true, false), (false, false), (false, true)] {
            let mut tree = ShapeTree::new();
            let id = tree.add(
                ShapeOptions::new()
                    .path([Vector3::new(2.0, 3.0, 4.0)])
                    .line_width(6.0)
                    .color(color)
                    .stroke(stroke)
                    .fill(fill),
            );
            let mut canvas = RecordingCanvas::new();
            tree[id].render(&mut canvas);
            assert_eq!(
                canvas.commands(),
                [
                    CanvasCmd::FillColor(color),
                    CanvasCmd::BeginPath,
                    CanvasCmd::Arc { x: 2.0, y: 3.0, radius: 3.0, start: 0.0, end: TAU },
                    CanvasCmd::Fill,
                ]
            );
        }
    }

    #[test]
    fn hidden_shapes_render_nothing() {
        let mut tree = ShapeTree::new();
        let hidden = tree.add(ShapeOptions::new().rendering(false));
        let empty = tree.add(ShapeOptions::new().path(Vec::<PathPart>::new()));
        let mut canvas = RecordingCanvas::new();
        tree[hidden].render(&mut canvas);
        tree[empty].render(&mut canvas);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn stroke_and_fill_follow_flags() {
        let mut tree = ShapeTree::new();
        let id = tree.add(
            ShapeOptions::new()
                .path([Vector3::xy(0.0, 0.0), Vector3::xy(4.0, 0.0), Vector3::xy(0.0, 4.0)])
                .fill(true)
                .stroke(false),
        );
        let mut canvas = RecordingCanvas::new();
        tree[id].render(&mut canvas);
        assert_eq!(canvas.count(|c| matches!(c, CanvasCmd::Stroke)), 0);
        assert_eq!(canvas.commands().last(), Some(&CanvasCmd::Fill));
    }

    // ── sort value ────────────────────────────────────────────────────────

    #[test]
    fn sort_value_is_mean_end_point_z() {
        let mut tree = ShapeTree::new();
        let id = tree.add(ShapeOptions::new().path([
            Vector3::new(0.0, 0.0, 2.0),
            Vector3::new(0.0, 0.0, 4.0),
            Vector3::new(0.0, 0.0, -3.0),
        ]));
        tree.update(id);
        tree[id].update_sort_value();
        assert!((tree[id].sort_value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_shape_sort_value_is_zero() {
        let mut tree = ShapeTree::new();
        let id = tree.add(ShapeOptions::new().path(Vec::<PathPart>::new()));
        tree[id].update_sort_value();
        assert_eq!(tree[id].sort_value(), 0.0);
    }
}
