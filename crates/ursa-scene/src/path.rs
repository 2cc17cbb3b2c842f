//! Path authoring and per-frame path geometry.
//!
//! A shape's path is authored as a list of [`PathPart`]s and parsed once into
//! [`PathAction`]s. Each action keeps its authored points untouched and a
//! mutable copy (`render_points`) that is reset and transformed every frame.

use crate::canvas::Canvas;
use crate::vector3::Vector3;

/// Blend factor toward the corner used for both arc control points.
///
/// Approximates a quarter circle with a single cubic Bezier.
pub const ARC_CONTROL_BLEND: f64 = 9.0 / 16.0;

/// One authored path instruction.
///
/// The number of points per instruction is fixed by the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum PathPart {
    /// Bare point: an implicit straight line to it.
    Point(Vector3),
    Move(Vector3),
    Line(Vector3),
    /// `[control 0, control 1, end]`
    Bezier([Vector3; 3]),
    /// `[corner, end]`: rounded corner from the previous end point.
    Arc([Vector3; 2]),
}

impl PathPart {
    fn method_and_points(&self) -> (PathMethod, &[Vector3]) {
        match self {
            PathPart::Point(p) | PathPart::Line(p) => (PathMethod::Line, core::slice::from_ref(p)),
            PathPart::Move(p) => (PathMethod::Move, core::slice::from_ref(p)),
            PathPart::Bezier(points) => (PathMethod::Bezier, points),
            PathPart::Arc(points) => (PathMethod::Arc, points),
        }
    }
}

impl From<Vector3> for PathPart {
    #[inline]
    fn from(p: Vector3) -> Self {
        PathPart::Point(p)
    }
}

/// Drawing method of a parsed action.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PathMethod {
    Move,
    Line,
    Bezier,
    Arc,
}

/// One drawing instruction with authored and render geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PathAction {
    method: PathMethod,
    points: Vec<Vector3>,
    render_points: Vec<Vector3>,
    /// Derived Bezier controls; `Some` only for arcs.
    control_points: Option<[Vector3; 2]>,
}

impl PathAction {
    pub fn new(method: PathMethod, points: &[Vector3]) -> Self {
        let points: Vec<Vector3> = points.iter().map(|p| p.sanitized()).collect();
        let control_points = (method == PathMethod::Arc).then(|| [Vector3::ZERO; 2]);
        Self {
            method,
            render_points: points.clone(),
            points,
            control_points,
        }
    }

    #[inline]
    pub fn method(&self) -> PathMethod {
        self.method
    }

    /// Authored (rest pose) points.
    #[inline]
    pub fn points(&self) -> &[Vector3] {
        &self.points
    }

    #[inline]
    pub fn render_points(&self) -> &[Vector3] {
        &self.render_points
    }

    #[inline]
    pub fn control_points(&self) -> Option<[Vector3; 2]> {
        self.control_points
    }

    /// Final render point.
    #[inline]
    pub fn end_point(&self) -> Vector3 {
        self.render_points.last().copied().unwrap_or_default()
    }

    /// Restores render points to the authored points.
    pub fn reset(&mut self) {
        for (render, authored) in self.render_points.iter_mut().zip(&self.points) {
            render.set(*authored);
        }
    }

    /// Applies scale, then rotation, then translation to every render point.
    pub fn transform(&mut self, translation: Vector3, rotation: Vector3, scale: Vector3) {
        for p in &mut self.render_points {
            p.multiply(scale).rotate(rotation).add(translation);
        }
    }

    /// Recomputes arc controls from the previous end point. No-op for other methods.
    ///
    /// A missing previous point is treated as the origin.
    pub fn update_control_points(&mut self, previous: Option<Vector3>) {
        let Some(controls) = self.control_points.as_mut() else { return };
        let [corner, end, ..] = self.render_points[..] else { return };
        controls[0].set(previous).lerp(corner, ARC_CONTROL_BLEND);
        controls[1].set(end).lerp(corner, ARC_CONTROL_BLEND);
    }

    /// Emits this action. Actions with too few points for their method draw nothing.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        match (self.method, &self.render_points[..]) {
            (PathMethod::Move, [p, ..]) => canvas.move_to(p.x, p.y),
            (PathMethod::Line, [p, ..]) => canvas.line_to(p.x, p.y),
            (PathMethod::Bezier, [cp0, cp1, end, ..]) => {
                canvas.bezier_curve_to(cp0.x, cp0.y, cp1.x, cp1.y, end.x, end.y);
            }
            (PathMethod::Arc, [_, end, ..]) => {
                let [cp0, cp1] = self.control_points.unwrap_or_default();
                canvas.bezier_curve_to(cp0.x, cp0.y, cp1.x, cp1.y, end.x, end.y);
            }
            _ => {}
        }
    }
}

/// Parses authored parts into actions. The first action is always a move.
pub fn parse_path(parts: &[PathPart]) -> Vec<PathAction> {
    let mut actions: Vec<PathAction> = Vec::with_capacity(parts.len());
    for (i, part) in parts.iter().enumerate() {
        let (method, points) = part.method_and_points();
        let method = if i == 0 { PathMethod::Move } else { method };
        actions.push(PathAction::new(method, points));
    }
    link_arcs(&mut actions);
    actions
}

/// Refreshes every arc's controls from its predecessor's current end point.
pub(crate) fn link_arcs(actions: &mut [PathAction]) {
    let mut previous: Option<Vector3> = None;
    for action in actions {
        action.update_control_points(previous);
        previous = Some(action.end_point());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasCmd, RecordingCanvas};
    use core::f64::consts::TAU;

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    // ── parsing ───────────────────────────────────────────────────────────

    #[test]
    fn first_part_is_forced_to_move() {
        let actions = parse_path(&[
            PathPart::Arc([v(1.0, 0.0, 0.0), v(1.0, 1.0, 0.0)]),
            PathPart::Point(v(2.0, 0.0, 0.0)),
            PathPart::Bezier([v(0.0, 1.0, 0.0), v(1.0, 1.0, 0.0), v(1.0, 2.0, 0.0)]),
        ]);
        let methods: Vec<_> = actions.iter().map(PathAction::method).collect();
        assert_eq!(methods, [PathMethod::Move, PathMethod::Line, PathMethod::Bezier]);
        assert_eq!(actions[0].points().len(), 2);
        assert_eq!(actions[0].end_point(), v(1.0, 1.0, 0.0));
    }

    #[test]
    fn arc_controls_blend_toward_corner() {
        let actions = parse_path(&[
            PathPart::Point(v(0.0, -16.0, 0.0)),
            PathPart::Arc([v(16.0, -16.0, 0.0), v(16.0, 0.0, 0.0)]),
        ]);
        let [cp0, cp1] = actions[1].control_points().unwrap();
        assert_eq!(cp0, v(9.0, -16.0, 0.0));
        assert_eq!(cp1, v(16.0, -9.0, 0.0));
        assert!(actions[0].control_points().is_none());
    }

    // ── reset / transform ─────────────────────────────────────────────────

    #[test]
    fn reset_then_identity_transform_reproduces_authored_points() {
        let mut action = PathAction::new(
            PathMethod::Bezier,
            &[v(1.5, -2.0, 3.0), v(0.25, 7.0, -1.0), v(-4.0, 0.0, 2.0)],
        );
        action.transform(v(5.0, 5.0, 5.0), v(0.3, 0.2, 0.1), v(2.0, 2.0, 2.0));
        action.reset();
        action.transform(Vector3::ZERO, Vector3::ZERO, Vector3::ONE);
        assert_eq!(action.render_points(), action.points());
    }

    #[test]
    fn transform_scales_then_rotates_then_translates() {
        let mut action = PathAction::new(PathMethod::Line, &[v(1.0, 0.0, 0.0)]);
        action.transform(v(10.0, 0.0, 0.0), v(0.0, 0.0, TAU / 4.0), v(2.0, 1.0, 1.0));
        let p = action.end_point();
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y - 2.0).abs() < 1e-9);
        assert_eq!(action.points()[0], v(1.0, 0.0, 0.0));
    }

    // ── render ────────────────────────────────────────────────────────────

    #[test]
    fn render_dispatches_on_method() {
        let actions = parse_path(&[
            PathPart::Point(v(0.0, 0.0, 0.0)),
            PathPart::Line(v(1.0, 0.0, 0.0)),
            PathPart::Bezier([v(1.0, 1.0, 0.0), v(2.0, 1.0, 0.0), v(2.0, 2.0, 0.0)]),
        ]);
        let mut canvas = RecordingCanvas::new();
        for a in &actions {
            a.render(&mut canvas);
        }
        assert_eq!(
            canvas.commands(),
            [
                CanvasCmd::MoveTo { x: 0.0, y: 0.0 },
                CanvasCmd::LineTo { x: 1.0, y: 0.0 },
                CanvasCmd::BezierTo { cp0: (1.0, 1.0), cp1: (2.0, 1.0), end: (2.0, 2.0) },
            ]
        );
    }
}
