use core::f64::consts::TAU;

use crate::shape::{ShapeId, ShapeTree};

/// Yaw phase of the right-leg cut-ins.
pub const RIGHT_LEG_PHASE: f64 = 1.2;
/// Yaw phase of the back-leg cut-in.
pub const BACK_LEG_PHASE: f64 = 1.4;
/// Yaw phase of the body cut-in; its sign flips per quadrant.
pub const BODY_PHASE: f64 = 1.5;
/// Sideways offset of the body cut-in toward the visible flank.
pub const BODY_OFFSET_X: f64 = 3.0;

/// Detail shapes that counter-rotate against the camera so they stay on the
/// visible face of the body.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CutIns {
    pub right_leg_a: ShapeId,
    pub right_leg_b: ShapeId,
    pub back_leg: ShapeId,
    pub body: ShapeId,
}

impl CutIns {
    /// Aligns every cut-in to a normalized camera yaw in `[0, TAU)`.
    pub fn apply(&self, tree: &mut ShapeTree, yaw: f64) {
        tree[self.right_leg_a].rotate.y = RIGHT_LEG_PHASE - yaw;
        tree[self.right_leg_b].rotate.y = RIGHT_LEG_PHASE - yaw;
        tree[self.back_leg].rotate.y = BACK_LEG_PHASE - yaw;

        let front = yaw < TAU / 4.0 || yaw > TAU * 3.0 / 4.0;
        let right = yaw < TAU / 2.0;
        let body = &mut tree[self.body];
        body.rotate.y = (if front == right { BODY_PHASE } else { -BODY_PHASE }) - yaw;
        body.translate.x = if right { BODY_OFFSET_X } else { -BODY_OFFSET_X };
    }
}
