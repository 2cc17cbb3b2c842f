use core::ops::{Index, IndexMut};

use crate::vector3::Vector3;

use super::{RenderStrategy, Shape, ShapeId, ShapeOptions};

/// Arena of shapes. Ids are dense and never invalidated (no removal).
///
/// Ids are only meaningful for the tree that issued them. Apart from
/// [`add`](Self::add), which tolerates an unknown parent, every method taking
/// a [`ShapeId`] (including indexing) panics on an id from another tree.
#[derive(Debug, Default, Clone)]
pub struct ShapeTree {
    nodes: Vec<Shape>,
}

impl ShapeTree {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts a shape and attaches it to `options.add_to` when set.
    ///
    /// An unknown parent id is logged and the shape becomes a root.
    pub fn add(&mut self, options: ShapeOptions) -> ShapeId {
        let id = ShapeId(self.nodes.len());
        let mut shape = Shape::new(options);

        if let Some(parent) = shape.parent {
            match self.nodes.get_mut(parent.0) {
                Some(node) => node.children.push(id),
                None => {
                    log::warn!("shape {}: parent {} does not exist, added as root", id.0, parent.0);
                    shape.parent = None;
                }
            }
        }

        self.nodes.push(shape);
        id
    }

    /// Inserts a new shape built from `id`'s current options with
    /// `overrides` applied. The copy shares nothing with the source.
    ///
    /// Children are not copied.
    pub fn copy(
        &mut self,
        id: ShapeId,
        overrides: impl FnOnce(ShapeOptions) -> ShapeOptions,
    ) -> ShapeId {
        let options = overrides(self[id].options());
        self.add(options)
    }

    /// Recomputes render geometry for `id` and its subtree.
    ///
    /// Children are updated first, then this shape's transform is applied to
    /// itself and every descendant, so ancestor transforms stack on top.
    ///
    /// # Panics
    ///
    /// If `id` was not issued by this tree.
    pub fn update(&mut self, id: ShapeId) {
        self.nodes[id.0].reset();

        for i in 0..self.nodes[id.0].children.len() {
            let child = self.nodes[id.0].children[i];
            self.update(child);
        }

        let shape = &self.nodes[id.0];
        let (translate, rotate, scale) = (shape.translate, shape.rotate, shape.scale);
        self.transform(id, translate, rotate, scale);
    }

    /// Applies a transform to `id`'s render geometry and to all descendants.
    ///
    /// # Panics
    ///
    /// If `id` was not issued by this tree.
    pub fn transform(&mut self, id: ShapeId, translation: Vector3, rotation: Vector3, scale: Vector3) {
        self.nodes[id.0].transform_actions(translation, rotation, scale);

        for i in 0..self.nodes[id.0].children.len() {
            let child = self.nodes[id.0].children[i];
            self.transform(child, translation, rotation, scale);
        }
    }

    /// `id` followed by its descendants, pre-order.
    ///
    /// # Panics
    ///
    /// If `id` was not issued by this tree.
    pub fn shapes(&self, id: ShapeId) -> Vec<ShapeId> {
        let mut out = Vec::new();
        self.collect(id, &mut out);
        out
    }

    fn collect(&self, id: ShapeId, out: &mut Vec<ShapeId>) {
        out.push(id);
        for &child in &self.nodes[id.0].children {
            self.collect(child, out);
        }
    }

    /// # Panics
    ///
    /// If `id` was not issued by this tree.
    pub fn set_render_strategy(&mut self, id: ShapeId, strategy: RenderStrategy) {
        self.nodes[id.0].strategy = strategy;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.nodes.iter().enumerate().map(|(i, s)| (ShapeId(i), s))
    }
}

impl Index<ShapeId> for ShapeTree {
    type Output = Shape;

    #[inline]
    fn index(&self, id: ShapeId) -> &Shape {
        &self.nodes[id.0]
    }
}

impl IndexMut<ShapeId> for ShapeTree {
    #[inline]
    fn index_mut(&mut self, id: ShapeId) -> &mut Shape {
        &mut self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::path::PathPart;
    use crate::shape::ShapeKind;
    use core::f64::consts::TAU;

    fn close(a: Vector3, b: Vector3) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9 && (a.z - b.z).abs() < 1e-9
    }

    // ── structure ─────────────────────────────────────────────────────────

    #[test]
    fn add_attaches_to_parent_in_order() {
        let mut tree = ShapeTree::new();
        let root = tree.add(ShapeOptions::new().rendering(false));
        let a = tree.add(ShapeOptions::new().add_to(root));
        let b = tree.add(ShapeOptions::new().add_to(root));
        let c = tree.add(ShapeOptions::new().add_to(a));

        assert_eq!(tree[root].children(), [a, b]);
        assert_eq!(tree[c].parent(), Some(a));
        assert_eq!(tree.shapes(root), [root, a, c, b]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn unknown_parent_becomes_root() {
        let mut tree = ShapeTree::new();
        let id = tree.add(ShapeOptions::new().add_to(ShapeId(42)));
        assert_eq!(tree[id].parent(), None);
    }

    // ── copy ──────────────────────────────────────────────────────────────

    #[test]
    fn copy_does_not_alias_source() {
        let mut tree = ShapeTree::new();
        let root = tree.add(ShapeOptions::new());
        let src = tree.add(
            ShapeOptions::new()
                .add_to(root)
                .path([Vector3::xy(0.0, 0.0), Vector3::xy(1.0, 0.0)])
                .translate(Vector3::xy(-7.5, 0.0))
                .color(Color::WHITE),
        );
        let copy = tree.copy(src, |o| o.translate(Vector3::xy(7.5, 0.0)));

        assert_eq!(tree[copy].parent(), Some(root));
        assert_eq!(tree[root].children(), [src, copy]);
        assert_eq!(tree[copy].style.color, Color::WHITE);

        tree[copy].translate.y = 3.0;
        tree[copy].style.line_width = 9.0;
        assert_eq!(tree[src].translate, Vector3::xy(-7.5, 0.0));
        assert_eq!(tree[src].style.line_width, 1.0);

        tree[src].translate.x = -20.0;
        tree[src].style.color = Color::BLACK;
        tree[src].style.line_width = 4.0;
        assert_eq!(tree[copy].translate, Vector3::xy(7.5, 3.0));
        assert_eq!(tree[copy].style.color, Color::WHITE);
        assert_eq!(tree[copy].style.line_width, 9.0);

        tree.update(root);
        assert!(close(tree[src].actions()[1].end_point(), Vector3::xy(-19.0, 0.0)));
        assert!(close(tree[copy].actions()[1].end_point(), Vector3::xy(8.5, 3.0)));
    }

    #[test]
    #[should_panic]
    fn update_panics_on_id_from_another_tree() {
        let mut other = ShapeTree::new();
        other.add(ShapeOptions::new());
        let foreign = other.add(ShapeOptions::new());

        let mut tree = ShapeTree::new();
        tree.add(ShapeOptions::new());
        tree.update(foreign);
    }

    #[test]
    fn copy_of_ellipse_regenerates_path() {
        let mut tree = ShapeTree::new();
        let ear = tree.add(ShapeOptions::ellipse(4.0, 4.0));
        let copy = tree.copy(ear, |o| o.translate(Vector3::xy(14.0, 0.0)));
        assert_eq!(tree[copy].kind(), ShapeKind::Ellipse { width: 4.0, height: 4.0 });
        assert_eq!(tree[copy].path(), tree[ear].path());
        assert!(!tree[copy].style.closed);
    }

    // ── update ────────────────────────────────────────────────────────────

    #[test]
    fn child_transform_applies_before_parent() {
        let mut tree = ShapeTree::new();
        let parent = tree.add(
            ShapeOptions::new()
                .path(Vec::<PathPart>::new())
                .rotate(Vector3::new(0.0, 0.0, TAU / 4.0)),
        );
        let child = tree.add(
            ShapeOptions::new()
                .add_to(parent)
                .path([Vector3::ZERO])
                .translate(Vector3::xy(1.0, 0.0)),
        );
        tree.update(parent);
        // translate (1,0) first, then rotate a quarter turn about z
        assert!(close(tree[child].actions()[0].end_point(), Vector3::xy(0.0, 1.0)));
    }

    #[test]
    fn repeated_updates_are_idempotent() {
        let mut tree = ShapeTree::new();
        let root = tree.add(ShapeOptions::new().rotate(Vector3::new(0.3, 0.9, -0.2)));
        let child = tree.add(
            ShapeOptions::new()
                .add_to(root)
                .path([Vector3::new(1.0, 2.0, 3.0), Vector3::new(-2.0, 0.5, 1.0)])
                .scale(Vector3::new(2.0, 2.0, 2.0)),
        );
        tree.update(root);
        let first = tree[child].actions()[1].end_point();
        tree.update(root);
        assert_eq!(tree[child].actions()[1].end_point(), first);
    }

    #[test]
    fn arc_controls_follow_transformed_points() {
        let mut tree = ShapeTree::new();
        let id = tree.add(
            ShapeOptions::new()
                .path([
                    PathPart::Point(Vector3::xy(0.0, -16.0)),
                    PathPart::Arc([Vector3::xy(16.0, -16.0), Vector3::xy(16.0, 0.0)]),
                ])
                .translate(Vector3::xy(10.0, 0.0)),
        );
        tree.update(id);
        let [cp0, cp1] = tree[id].actions()[1].control_points().unwrap_or_default();
        assert!(close(cp0, Vector3::xy(19.0, -16.0)));
        assert!(close(cp1, Vector3::xy(26.0, -9.0)));
    }

    #[test]
    fn set_render_strategy_is_stored() {
        let mut tree = ShapeTree::new();
        let body = tree.add(ShapeOptions::new());
        let line = tree.add(ShapeOptions::new().add_to(body));
        tree.set_render_strategy(body, RenderStrategy::MaskedComposite { overlay: vec![line] });
        assert_eq!(tree[body].strategy(), &RenderStrategy::MaskedComposite { overlay: vec![line] });
        assert_eq!(tree[line].strategy(), &RenderStrategy::Standard);
    }
}
