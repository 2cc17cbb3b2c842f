//! Frame driver: autoplay, drag rotation, depth sorting and compositing.
//!
//! Intended usage per frame:
//! - feed pointer input with [`Scene::handle_pointer`]
//! - call [`Scene::update`] once
//! - call [`Scene::render`] with the backing surfaces

mod autoplay;
mod cut_in;
mod list;
mod stage;

pub use autoplay::{Autoplay, AutoplayConfig, ease_out_in};
pub use cut_in::{BACK_LEG_PHASE, BODY_OFFSET_X, BODY_PHASE, CutIns, RIGHT_LEG_PHASE};
pub use list::{RenderList, RenderUnit};
pub use stage::{Stage, StageConfig};

use core::f64::consts::TAU;

use crate::bear::Illustration;
use crate::canvas::{Canvas, CompositeOp};
use crate::drag::{DragController, DragGesture, DragState, PointerEvent};
use crate::shape::{RenderStrategy, ShapeId, ShapeTree};
use crate::vector3::{Vector3, modulo};

/// The three surfaces a frame is drawn on.
///
/// `base` and `overlay` are scratch surfaces for masked composites and must
/// match `main` in device size.
#[derive(Debug, Default, Clone)]
pub struct CanvasSet<C> {
    pub main: C,
    pub base: C,
    pub overlay: C,
}

impl<C> CanvasSet<C> {
    pub fn new(main: C, base: C, overlay: C) -> Self {
        Self { main, base, overlay }
    }
}

/// Animated, draggable scene of two camera roots sharing one rotation.
#[derive(Debug, Clone)]
pub struct Scene {
    tree: ShapeTree,
    camera: ShapeId,
    outline_camera: ShapeId,

    positive: RenderList,
    outline: RenderList,
    /// Shapes drawn as masked composites; their overlays are re-sorted per frame.
    masked: Vec<ShapeId>,

    cut_ins: CutIns,
    autoplay: Autoplay,
    drag: DragController,
    /// Camera `(rotate.x, rotate.y)` captured at drag start.
    drag_base: (f64, f64),
    stage: Stage,
}

impl Scene {
    /// Flattens the illustration and puts the camera in its rest pose.
    pub fn new(illustration: Illustration, autoplay: AutoplayConfig, stage: Stage) -> Self {
        let Illustration { mut tree, camera, outline_camera, cut_ins, body_lines, .. } = illustration;

        let masked: Vec<ShapeId> = tree
            .iter()
            .filter(|(_, s)| matches!(s.strategy(), RenderStrategy::MaskedComposite { .. }))
            .map(|(id, _)| id)
            .collect();
        let positive = RenderList::build(&tree, camera, &body_lines);
        let outline = RenderList::build(&tree, outline_camera, &[]);

        tree[camera].rotate.set(autoplay.jump_rotation);
        let rotation = tree[camera].rotate;
        tree[outline_camera].rotate = rotation;

        log::debug!(
            "scene ready: {} positive, {} outline, {} masked",
            positive.len(),
            outline.len(),
            masked.len()
        );

        Self {
            tree,
            camera,
            outline_camera,
            positive,
            outline,
            masked,
            cut_ins,
            autoplay: Autoplay::new(autoplay),
            drag: DragController::new(),
            drag_base: (rotation.x, rotation.y),
            stage,
        }
    }

    #[inline]
    pub fn tree(&self) -> &ShapeTree {
        &self.tree
    }

    #[inline]
    pub fn camera(&self) -> ShapeId {
        self.camera
    }

    #[inline]
    pub fn outline_camera(&self) -> ShapeId {
        self.outline_camera
    }

    #[inline]
    pub fn camera_rotation(&self) -> Vector3 {
        self.tree[self.camera].rotate
    }

    #[inline]
    pub fn positive(&self) -> &RenderList {
        &self.positive
    }

    #[inline]
    pub fn outline(&self) -> &RenderList {
        &self.outline
    }

    #[inline]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Replaces the stage, e.g. after a window resize or scale change.
    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    #[inline]
    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_enabled()
    }

    #[inline]
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Re-enables autoplay after a drag paused it.
    pub fn resume_autoplay(&mut self) {
        self.autoplay.set_enabled(true);
    }

    /// Applies pointer input to the camera.
    ///
    /// A drag pauses autoplay for good; releasing does not resume it.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<DragGesture> {
        let gesture = self.drag.handle(event)?;
        match gesture {
            DragGesture::Started => {
                self.autoplay.set_enabled(false);
                let r = self.tree[self.camera].rotate;
                self.drag_base = (r.x, r.y);
            }
            DragGesture::Moved { dx, dy } => {
                let width = self.stage.canvas_width();
                let (base_x, base_y) = self.drag_base;
                let rotate = &mut self.tree[self.camera].rotate;
                rotate.x = base_x + dy / width * TAU;
                rotate.y = base_y + dx / width * TAU;
            }
            DragGesture::Ended => {}
        }
        Some(gesture)
    }

    /// Advances one frame: camera yaw, cut-ins, geometry and paint order.
    pub fn update(&mut self) {
        if let Some(yaw) = self.autoplay.advance() {
            self.tree[self.camera].rotate.y = yaw;
        }

        let yaw = modulo(self.tree[self.camera].rotate.y, TAU);
        self.tree[self.camera].rotate.y = yaw;
        self.cut_ins.apply(&mut self.tree, yaw);

        let rotation = self.tree[self.camera].rotate;
        self.tree[self.outline_camera].rotate = rotation;

        self.tree.update(self.camera);
        self.tree.update(self.outline_camera);

        self.positive.update_sort_values(&mut self.tree);
        self.positive.sort(&self.tree);
        self.outline.update_sort_values(&mut self.tree);
        self.outline.sort(&self.tree);
        self.sort_overlays();
    }

    fn sort_overlays(&mut self) {
        for &id in &self.masked {
            let RenderStrategy::MaskedComposite { overlay } = self.tree[id].strategy_mut() else {
                continue;
            };
            let mut overlay = core::mem::take(overlay);

            for &shape in &overlay {
                self.tree[shape].update_sort_value();
            }
            let tree = &self.tree;
            overlay.sort_by(|a, b| list::paint_order(tree[*a].sort_value(), tree[*b].sort_value()));

            self.tree.set_render_strategy(id, RenderStrategy::MaskedComposite { overlay });
        }
    }

    /// Draws the outline figure, then the positive figure, back-to-front.
    pub fn render<C: Canvas>(&self, canvases: &mut CanvasSet<C>) {
        let zoom = self.stage.zoom();
        let (cx, cy) = self.stage.center();
        for canvas in [&mut canvases.main, &mut canvases.base, &mut canvases.overlay] {
            canvas.clear();
            canvas.save();
            canvas.scale(zoom, zoom);
            canvas.translate(cx, cy);
        }

        for unit in self.outline.iter().chain(self.positive.iter()) {
            self.render_shape(unit.shape, canvases);
        }

        canvases.main.restore();
        canvases.base.restore();
        canvases.overlay.restore();
    }

    fn render_shape<C: Canvas>(&self, id: ShapeId, canvases: &mut CanvasSet<C>) {
        let shape = &self.tree[id];
        match shape.strategy() {
            RenderStrategy::Standard => shape.render(&mut canvases.main),
            RenderStrategy::MaskedComposite { overlay } => {
                shape.render(&mut canvases.base);
                for &line in overlay {
                    self.tree[line].render(&mut canvases.overlay);
                }
                canvases.overlay.composite(&canvases.base, CompositeOp::DestinationIn);
                canvases.main.composite(&canvases.overlay, CompositeOp::SourceOver);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bear::{self, Palette};
    use crate::canvas::{CanvasCmd, RecordingCanvas};
    use crate::drag::PagePoint;

    fn scene() -> Scene {
        let stage = Stage::fit(StageConfig::default(), 528.0, 528.0, 1.0);
        Scene::new(bear::build(&Palette::default()), AutoplayConfig::default(), stage)
    }

    fn canvases() -> CanvasSet<RecordingCanvas> {
        CanvasSet::default()
    }

    // ── setup ─────────────────────────────────────────────────────────────

    #[test]
    fn body_lines_are_left_out_of_positive_list() {
        let scene = scene();
        let bear = bear::build(&Palette::default());
        assert_eq!(scene.positive().len(), 18);
        assert_eq!(scene.outline().len(), 11);
        for line in &bear.body_lines {
            assert!(scene.positive().iter().all(|u| u.shape != *line));
        }
    }

    #[test]
    fn starts_in_jump_pose() {
        let scene = scene();
        let jump = AutoplayConfig::default().jump_rotation;
        assert_eq!(scene.camera_rotation(), jump);
        assert_eq!(scene.tree()[scene.outline_camera()].rotate, jump);
    }

    // ── update ────────────────────────────────────────────────────────────

    #[test]
    fn update_normalizes_yaw_and_syncs_outline() {
        let mut scene = scene();
        for _ in 0..40 {
            scene.update();
            let r = scene.camera_rotation();
            assert!((0.0..TAU).contains(&r.y));
            assert_eq!(scene.tree()[scene.outline_camera()].rotate, r);
        }
    }

    #[test]
    fn two_autoplay_turns_return_to_rest_yaw() {
        let mut scene = scene();
        let rest = modulo(AutoplayConfig::default().jump_rotation.y, TAU);
        for _ in 0..360 {
            scene.update();
        }
        let yaw = scene.camera_rotation().y;
        // t lands a hair either side of the period boundary
        let diff = (yaw - rest).abs();
        assert!(diff < 1e-9 || (TAU - diff) < 1e-9, "yaw {yaw} vs {rest}");
    }

    #[test]
    fn positive_list_is_painted_far_to_near() {
        let mut scene = scene();
        for _ in 0..25 {
            scene.update();
            let values: Vec<f64> =
                scene.positive().iter().map(|u| scene.tree()[u.shape].sort_value()).collect();
            assert!(values.windows(2).all(|w| w[0] >= w[1]), "{values:?}");
        }
    }

    // ── drag ──────────────────────────────────────────────────────────────

    #[test]
    fn pointer_down_pauses_autoplay_and_captures_baseline() {
        let mut scene = scene();
        scene.update();
        let before = scene.camera_rotation();

        let gesture = scene.handle_pointer(PointerEvent::Down(PagePoint::new(100.0, 100.0)));
        assert_eq!(gesture, Some(DragGesture::Started));
        assert!(!scene.is_autoplaying());

        scene.update();
        scene.update();
        assert!((scene.camera_rotation().y - before.y).abs() < 1e-12);
    }

    #[test]
    fn drag_maps_offsets_to_rotation() {
        let mut scene = scene();
        scene.update();
        let base = scene.camera_rotation();
        let width = scene.stage().canvas_width();

        scene.handle_pointer(PointerEvent::Down(PagePoint::new(10.0, 10.0)));
        scene.handle_pointer(PointerEvent::Move(PagePoint::new(10.0 + width / 4.0, 10.0 - width / 8.0)));
        let r = scene.camera_rotation();
        assert!((r.y - (base.y + TAU / 4.0)).abs() < 1e-9);
        assert!((r.x - (base.x - TAU / 8.0)).abs() < 1e-9);
    }

    #[test]
    fn release_does_not_resume_autoplay() {
        let mut scene = scene();
        scene.handle_pointer(PointerEvent::Down(PagePoint::new(0.0, 0.0)));
        scene.handle_pointer(PointerEvent::Up);
        assert!(!scene.is_autoplaying());
        assert_eq!(scene.drag_state(), DragState::Idle);

        scene.resume_autoplay();
        assert!(scene.is_autoplaying());
    }

    // ── render ────────────────────────────────────────────────────────────

    #[test]
    fn render_zooms_every_surface_and_restores() {
        let mut scene = scene();
        scene.update();
        let mut set = canvases();
        scene.render(&mut set);

        for canvas in [&set.main, &set.base, &set.overlay] {
            assert_eq!(
                &canvas.commands()[..4],
                [
                    CanvasCmd::Clear,
                    CanvasCmd::Save,
                    CanvasCmd::Scale { sx: 6.0, sy: 6.0 },
                    CanvasCmd::Translate { tx: 44.0, ty: 40.0 },
                ]
            );
            assert_eq!(canvas.commands().last(), Some(&CanvasCmd::Restore));
        }
    }

    #[test]
    fn body_is_composited_through_mask() {
        let mut scene = scene();
        scene.update();
        let mut set = canvases();
        scene.render(&mut set);

        // the body fill is the only thing drawn on the base surface
        assert_eq!(set.base.count(|c| matches!(c, CanvasCmd::Fill)), 1);
        // four body lines, each stroked and filled
        assert_eq!(set.overlay.count(|c| matches!(c, CanvasCmd::Stroke)), 4);

        let composites: Vec<_> = set
            .overlay
            .commands()
            .iter()
            .chain(set.main.commands())
            .filter_map(|c| match c {
                CanvasCmd::Composite { op, .. } => Some(*op),
                _ => None,
            })
            .collect();
        assert_eq!(composites, [CompositeOp::DestinationIn, CompositeOp::SourceOver]);
    }

    #[test]
    fn outline_is_painted_before_positive() {
        let mut scene = scene();
        scene.update();
        let mut set = canvases();
        scene.render(&mut set);

        let black = Palette::default().black;
        let widths: Vec<f64> = set
            .main
            .commands()
            .iter()
            .filter_map(|c| match c {
                CanvasCmd::LineWidth(w) => Some(*w),
                _ => None,
            })
            .collect();
        // 9 rendering outline shapes come first, all with the outline extra width
        assert!(widths[..9].iter().all(|&w| w >= 14.0), "{widths:?}");
        assert!(set.main.commands().contains(&CanvasCmd::StrokeColor(black)));
    }
}
