//! The bear illustration.
//!
//! Two figures are assembled: a black outline figure drawn first and a
//! coloured positive figure drawn on top. Only the positive figure carries
//! face details, cut-ins and the striped body.

use core::f64::consts::TAU;

use crate::paint::Color;
use crate::path::PathPart;
use crate::scene::CutIns;
use crate::shape::{RenderStrategy, ShapeId, ShapeOptions, ShapeTree};
use crate::vector3::{Vector3, lerp};

/// Extra line width of every outline shape.
pub const OUTLINE_WIDTH: f64 = 8.0;

const BODY_FILL_WIDTH: f64 = 34.0;
const BODY_FILL_DEPTH: f64 = 28.0;
const BODY_LINE_WIDTH: f64 = 10.5;
const BODY_LINE_INSET: f64 = 2.75;

/// Illustration colours.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    pub magenta: Color,
    pub orange: Color,
    pub gold: Color,
    pub blue: Color,
    pub black: Color,
    pub white: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            magenta: Color::from_rgba8(0xCC, 0x22, 0x55, 0xFF),
            orange: Color::from_rgba8(0xEE, 0x66, 0x22, 0xFF),
            gold: Color::from_rgba8(0xEE, 0xAA, 0x00, 0xFF),
            blue: Color::from_rgba8(0x11, 0x99, 0xFF, 0xFF),
            black: Color::from_rgba8(0x33, 0x33, 0x33, 0xFF),
            white: Color::WHITE,
        }
    }
}

/// Assembled shapes plus the handles the scene driver needs.
#[derive(Debug, Clone)]
pub struct Illustration {
    pub tree: ShapeTree,
    /// Root of the positive figure.
    pub camera: ShapeId,
    /// Root of the outline figure; shares the camera rotation.
    pub outline_camera: ShapeId,
    pub cut_ins: CutIns,
    /// Positive unibody; renders as a masked composite of `body_lines`.
    pub body: ShapeId,
    pub body_lines: Vec<ShapeId>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Pass {
    Positive,
    Outline,
}

impl Pass {
    /// Extra line width and the colour override of this pass.
    fn style(self, palette: &Palette) -> (f64, Option<Color>) {
        match self {
            Pass::Positive => (0.0, None),
            Pass::Outline => (OUTLINE_WIDTH, Some(palette.black)),
        }
    }
}

/// Shapes of one figure that details attach to.
struct Figure {
    face: ShapeId,
    right_leg: ShapeId,
    left_shin: ShapeId,
}

/// Builds the whole bear.
pub fn build(palette: &Palette) -> Illustration {
    let mut tree = ShapeTree::new();
    let camera = tree.add(ShapeOptions::new().rendering(false));
    let outline_camera = tree.add(ShapeOptions::new().rendering(false));

    // The body cut-in is the unibody's first child, which fixes its place
    // among tied sort values.
    let unibody = add_unibody(&mut tree, camera, palette, Pass::Positive);
    let body_cut_in = body_cut_in(&mut tree, unibody, palette);
    let positive = figure(&mut tree, unibody, palette, Pass::Positive);
    let cut_ins = details(&mut tree, &positive, body_cut_in, palette);

    let outline_unibody = add_unibody(&mut tree, outline_camera, palette, Pass::Outline);
    figure(&mut tree, outline_unibody, palette, Pass::Outline);

    let body_lines = body_lines(&mut tree, unibody, palette);
    tree.set_render_strategy(
        unibody,
        RenderStrategy::MaskedComposite { overlay: body_lines.clone() },
    );

    log::debug!(
        "bear assembled: {} shapes ({} positive, {} outline)",
        tree.len(),
        tree.shapes(camera).len(),
        tree.shapes(outline_camera).len(),
    );

    Illustration { tree, camera, outline_camera, cut_ins, body: unibody, body_lines }
}

fn add_unibody(tree: &mut ShapeTree, root: ShapeId, palette: &Palette, pass: Pass) -> ShapeId {
    let (extra, tint) = pass.style(palette);
    tree.add(
        ShapeOptions::new()
            .path([
                Vector3::xy(-3.0, -8.0),
                Vector3::xy(3.0, -8.0),
                Vector3::xy(3.0, 6.0),
                Vector3::xy(-3.0, 6.0),
            ])
            .add_to(root)
            .color(tint.unwrap_or(palette.magenta))
            .line_width(28.0 + extra)
            .fill(true),
    )
}

/// Ears, face, arms and legs hung off `unibody`.
fn figure(tree: &mut ShapeTree, unibody: ShapeId, palette: &Palette, pass: Pass) -> Figure {
    let (extra, tint) = pass.style(palette);
    let color = |c: Color| tint.unwrap_or(c);

    let ear = tree.add(
        ShapeOptions::ellipse(4.0, 4.0)
            .add_to(unibody)
            .translate(Vector3::new(-14.0, -20.0, 2.0))
            .color(color(palette.magenta))
            .line_width(8.0 + extra),
    );
    tree.copy(ear, |o| o.translate(Vector3::new(14.0, -20.0, 2.0)));

    let face = tree.add(
        ShapeOptions::new()
            .rendering(false)
            .translate(Vector3::new(0.0, -3.0, -14.0))
            .add_to(unibody),
    );

    // snout
    tree.add(
        ShapeOptions::ellipse(8.0, 4.0)
            .add_to(face)
            .translate(Vector3::new(0.0, 4.0, -1.0))
            .color(color(palette.white))
            .line_width(6.0 + extra)
            .fill(true),
    );

    // right arm
    tree.add(
        ShapeOptions::new()
            .path([Vector3::xy(-1.0, 0.0), Vector3::xy(-8.0, 0.0)])
            .add_to(unibody)
            .translate(Vector3::xy(-17.0, 4.0))
            .rotate(Vector3::new(0.0, -0.25, 0.0))
            .color(color(palette.gold))
            .line_width(12.0 + extra),
    );
    // left arm
    tree.add(
        ShapeOptions::new()
            .path([
                PathPart::Point(Vector3::ZERO),
                PathPart::Bezier([Vector3::ZERO, Vector3::xy(5.0, -3.0), Vector3::xy(8.0, -11.0)]),
            ])
            .add_to(unibody)
            .translate(Vector3::xy(18.0, 4.0))
            .rotate(Vector3::new(0.4, 0.0, 0.0))
            .color(color(palette.gold))
            .line_width(12.0 + extra)
            .closed(false),
    );

    let leg_tilt = 49.0 / 360.0 * TAU;
    let right_leg = tree.add(
        ShapeOptions::new()
            .path([Vector3::xy(0.0, 4.0), Vector3::xy(0.0, 15.0)])
            .add_to(unibody)
            .translate(Vector3::new(-10.0, 12.0, 1.0))
            .rotate(Vector3::new(0.3, 0.0, leg_tilt))
            .color(color(palette.blue))
            .line_width(12.0 + extra),
    );

    let knee = Vector3::xy(0.0, 13.0);
    let left_thigh = tree.add(
        ShapeOptions::new()
            .path([Vector3::xy(0.0, 2.0), knee])
            .add_to(unibody)
            .translate(Vector3::new(9.0, 12.0, 1.0))
            .rotate(Vector3::new(0.2, 0.0, leg_tilt))
            .color(color(palette.blue))
            .line_width(12.0 + extra),
    );
    let left_shin = tree.add(
        ShapeOptions::new()
            .path([Vector3::ZERO, Vector3::xy(0.0, 12.0)])
            .add_to(left_thigh)
            .translate(knee)
            .rotate(Vector3::new(0.8, 0.0, 0.2))
            .color(color(palette.blue))
            .line_width(12.0 + extra),
    );

    Figure { face, right_leg, left_shin }
}

/// Face features and cut-ins of the positive figure.
fn details(tree: &mut ShapeTree, figure: &Figure, body: ShapeId, palette: &Palette) -> CutIns {
    // nose
    tree.add(
        ShapeOptions::new()
            .path([Vector3::xy(-1.5, 0.0), Vector3::xy(1.5, 0.0), Vector3::xy(0.0, 0.5)])
            .add_to(figure.face)
            .translate(Vector3::new(0.0, 1.5, -4.0))
            .color(palette.black)
            .line_width(3.0)
            .fill(true),
    );

    let eye = tree.add(
        ShapeOptions::new()
            .path([
                PathPart::Point(Vector3::xy(-4.0, 0.0)),
                PathPart::Arc([Vector3::xy(-4.0, -4.0), Vector3::xy(0.0, -4.0)]),
                PathPart::Arc([Vector3::xy(4.0, -4.0), Vector3::xy(4.0, 0.0)]),
                PathPart::Arc([Vector3::xy(3.0, -1.5), Vector3::xy(0.0, -1.5)]),
                PathPart::Arc([Vector3::xy(-3.0, -1.5), Vector3::xy(-4.0, 0.0)]),
            ])
            .add_to(figure.face)
            .translate(Vector3::xy(-7.5, -3.25))
            .scale(Vector3::new(0.6, 0.5, 1.0))
            .color(palette.black)
            .line_width(2.0)
            .closed(false)
            .fill(true),
    );
    tree.copy(eye, |o| o.translate(Vector3::xy(7.5, -3.25)));

    let right_leg_a = tree.add(
        ShapeOptions::new()
            .path([Vector3::yz(4.0, -8.0), Vector3::yz(15.0, -8.0)])
            .add_to(figure.right_leg)
            .closed(false)
            .color(palette.black)
            .line_width(4.0),
    );
    let right_leg_b = tree.copy(right_leg_a, |o| o.scale(Vector3::new(1.0, 1.0, -1.0)));

    let back_leg = tree.add(
        ShapeOptions::new()
            .path([Vector3::yz(-14.0, -8.0), Vector3::yz(-8.0, -8.0)])
            .add_to(figure.left_shin)
            .translate(Vector3::xy(0.0, 20.0))
            .closed(false)
            .color(palette.black)
            .line_width(4.0),
    );

    CutIns { right_leg_a, right_leg_b, back_leg, body }
}

/// Curved groove running down the side of the body, in the y/z plane.
fn body_cut_in(tree: &mut ShapeTree, unibody: ShapeId, palette: &Palette) -> ShapeId {
    let a = Vector3::yz(-24.0, 0.0);
    let b = Vector3::yz(-8.0, -16.0);
    let c = Vector3::yz(6.0, -16.0);
    let d = Vector3::yz(22.0, 0.0);
    let [top_start, top_cp0, top_cp1] = quarter_arc_points(a, b);
    let [bottom_start, bottom_cp0, bottom_cp1] = quarter_arc_points(d, c);

    tree.add(
        ShapeOptions::new()
            .path([
                PathPart::Point(top_start),
                PathPart::Bezier([top_cp0, top_cp1, b]),
                PathPart::Point(c),
                PathPart::Bezier([bottom_cp1, bottom_cp0, bottom_start]),
            ])
            .translate(Vector3::xy(3.0, 0.0))
            .add_to(unibody)
            .color(palette.black)
            .closed(false)
            .line_width(4.0),
    )
}

/// Start and controls of a 45 degree curve from `a` bending into `b`.
fn quarter_arc_points(a: Vector3, b: Vector3) -> [Vector3; 3] {
    [
        Vector3::yz(lerp(a.y, b.y, 2.0 / 7.0), lerp(a.z, b.z, 5.0 / 7.0)),
        Vector3::yz(lerp(a.y, b.y, 12.0 / 28.0), lerp(a.z, b.z, 24.0 / 28.0)),
        Vector3::yz(lerp(a.y, b.y, 5.0 / 7.0), b.z),
    ]
}

/// Four rounded-rectangle bands around the body, top to bottom.
fn body_lines(tree: &mut ShapeTree, unibody: ShapeId, palette: &Palette) -> Vec<ShapeId> {
    let xa = (BODY_FILL_WIDTH - BODY_LINE_WIDTH) / 2.0 + BODY_LINE_INSET;
    let xb = (BODY_FILL_WIDTH - BODY_FILL_DEPTH) / 2.0 + BODY_LINE_INSET;
    let z = (BODY_FILL_DEPTH - BODY_LINE_WIDTH) / 2.0 + BODY_LINE_INSET;

    let band = [
        PathPart::Point(Vector3::xz(-xa, 0.0)),
        PathPart::Arc([Vector3::xz(-xa, -z), Vector3::xz(-xb, -z)]),
        PathPart::Point(Vector3::xz(xb, -z)),
        PathPart::Arc([Vector3::xz(xa, -z), Vector3::xz(xa, 0.0)]),
        PathPart::Arc([Vector3::xz(xa, z), Vector3::xz(xb, z)]),
        PathPart::Point(Vector3::xz(-xb, z)),
        PathPart::Arc([Vector3::xz(-xa, z), Vector3::xz(-xa, 0.0)]),
    ];

    [palette.magenta, palette.orange, palette.gold, palette.blue]
        .into_iter()
        .enumerate()
        .map(|(i, color)| {
            tree.add(
                ShapeOptions::new()
                    .path(band.clone())
                    .add_to(unibody)
                    .translate(Vector3::xy(0.0, -16.75 + BODY_LINE_WIDTH * i as f64))
                    .color(color)
                    .line_width(11.0)
                    .fill(true)
                    .closed(false),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    #[test]
    fn shape_counts() {
        let bear = build(&Palette::default());
        // 2 roots, 10 per figure, 7 positive details, 4 body lines
        assert_eq!(bear.tree.len(), 33);
        assert_eq!(bear.tree.shapes(bear.outline_camera).len(), 11);
        assert_eq!(bear.tree.shapes(bear.camera).len(), 22);
        assert_eq!(bear.body_lines.len(), 4);
    }

    #[test]
    fn outline_figure_is_black_and_wider() {
        let palette = Palette::default();
        let bear = build(&palette);
        for id in bear.tree.shapes(bear.outline_camera).into_iter().skip(1) {
            let shape = &bear.tree[id];
            if shape.style.rendering {
                assert_eq!(shape.style.color, palette.black);
                assert!(shape.style.line_width >= 8.0 + 6.0);
            }
        }
        let unibody = bear.tree[bear.outline_camera].children()[0];
        assert_eq!(bear.tree[unibody].style.line_width, 36.0);
    }

    #[test]
    fn body_renders_through_masked_composite() {
        let bear = build(&Palette::default());
        assert_eq!(
            bear.tree[bear.body].strategy(),
            &RenderStrategy::MaskedComposite { overlay: bear.body_lines.clone() }
        );
        for &line in &bear.body_lines {
            assert_eq!(bear.tree[line].parent(), Some(bear.body));
            assert_eq!(bear.tree[line].actions().len(), 7);
        }
    }

    #[test]
    fn body_line_band_geometry() {
        let bear = build(&Palette::default());
        let first = &bear.tree[bear.body_lines[0]];
        assert_eq!(first.path()[0], PathPart::Point(Vector3::xz(-14.5, 0.0)));
        assert_eq!(first.translate, Vector3::xy(0.0, -16.75));
        assert_eq!(bear.tree[bear.body_lines[3]].translate, Vector3::xy(0.0, 14.75));
    }

    #[test]
    fn body_cut_in_is_first_child_of_unibody() {
        let bear = build(&Palette::default());
        assert_eq!(bear.tree[bear.body].children()[0], bear.cut_ins.body);

        let order = bear.tree.shapes(bear.camera);
        assert_eq!(order[1], bear.body);
        assert_eq!(order[2], bear.cut_ins.body);
    }

    #[test]
    fn ears_are_open_ellipses() {
        let bear = build(&Palette::default());
        let unibody = bear.tree[bear.camera].children()[0];
        let ears: Vec<_> = bear.tree[unibody]
            .children()
            .iter()
            .copied()
            .filter(|&id| bear.tree[id].kind() == ShapeKind::Ellipse { width: 4.0, height: 4.0 })
            .collect();
        assert_eq!(ears.len(), 2);
        assert_eq!(bear.tree[ears[1]].translate, Vector3::new(14.0, -20.0, 2.0));
        assert!(ears.iter().all(|&id| !bear.tree[id].style.closed));
    }

    #[test]
    fn mirrored_leg_cut_in_flips_depth() {
        let bear = build(&Palette::default());
        let b = &bear.tree[bear.cut_ins.right_leg_b];
        assert_eq!(b.scale, Vector3::new(1.0, 1.0, -1.0));
        assert_eq!(b.parent(), bear.tree[bear.cut_ins.right_leg_a].parent());
    }

    #[test]
    fn quarter_arc_points_blend_between_corners() {
        let [start, cp0, cp1] =
            quarter_arc_points(Vector3::yz(-24.0, 0.0), Vector3::yz(-8.0, -16.0));
        assert!((start.y - (-24.0 + 16.0 * 2.0 / 7.0)).abs() < 1e-12);
        assert!((start.z - (-16.0 * 5.0 / 7.0)).abs() < 1e-12);
        assert!((cp0.z - (-16.0 * 24.0 / 28.0)).abs() < 1e-12);
        assert_eq!(cp1.z, -16.0);
    }
}
