use core::cmp::Ordering;

use crate::shape::{ShapeId, ShapeTree};

/// One entry of a [`RenderList`].
///
/// Carries only the id; how the shape draws (dot or path, masked or not)
/// is decided by the shape itself in [`Shape::render`](crate::shape::Shape::render).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RenderUnit {
    pub shape: ShapeId,
}

/// Flattened shapes of one camera in paint order (back-to-front).
///
/// Performance characteristics:
/// - built once; membership never changes after [`build`](Self::build)
/// - [`sort`](Self::sort) reorders in place, no per-frame allocation
#[derive(Debug, Default, Clone)]
pub struct RenderList {
    units: Vec<RenderUnit>,
}

impl RenderList {
    /// Flattens `root` pre-order, leaving out `exclude`.
    pub fn build(tree: &ShapeTree, root: ShapeId, exclude: &[ShapeId]) -> Self {
        let units = tree
            .shapes(root)
            .into_iter()
            .filter(|id| !exclude.contains(id))
            .map(|shape| RenderUnit { shape })
            .collect();
        Self { units }
    }

    #[inline]
    pub fn units(&self) -> &[RenderUnit] {
        &self.units
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Refreshes every member's sort value from its render geometry.
    pub fn update_sort_values(&self, tree: &mut ShapeTree) {
        for unit in &self.units {
            tree[unit.shape].update_sort_value();
        }
    }

    /// Stable sort, descending by sort value. Equal values keep their order.
    pub fn sort(&mut self, tree: &ShapeTree) {
        self.units
            .sort_by(|a, b| paint_order(tree[a.shape].sort_value(), tree[b.shape].sort_value()));
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderUnit> {
        self.units.iter()
    }
}

/// Farther (greater sort value) first. NaN compares equal so the sort stays stable.
#[inline]
pub(crate) fn paint_order(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeOptions;
    use crate::vector3::Vector3;

    fn tree_with_depths(depths: &[f64]) -> (ShapeTree, ShapeId, Vec<ShapeId>) {
        let mut tree = ShapeTree::new();
        let root = tree.add(ShapeOptions::new().rendering(false).path(Vec::<Vector3>::new()));
        let ids = depths
            .iter()
            .map(|&z| {
                tree.add(
                    ShapeOptions::new()
                        .add_to(root)
                        .path([Vector3::new(0.0, 0.0, z), Vector3::new(1.0, 0.0, z)]),
                )
            })
            .collect();
        tree.update(root);
        (tree, root, ids)
    }

    #[test]
    fn sorts_descending_by_depth() {
        let (mut tree, root, ids) = tree_with_depths(&[3.0, -1.0, 5.0, 0.0]);
        let mut list = RenderList::build(&tree, root, &[root]);
        list.update_sort_values(&mut tree);
        list.sort(&tree);

        let order: Vec<_> = list.iter().map(|u| u.shape).collect();
        assert_eq!(order, [ids[2], ids[0], ids[3], ids[1]]);
        let values: Vec<_> = list.iter().map(|u| tree[u.shape].sort_value()).collect();
        assert_eq!(values, [5.0, 3.0, 0.0, -1.0]);
    }

    #[test]
    fn equal_depths_keep_insertion_order() {
        let (mut tree, root, ids) = tree_with_depths(&[1.0, 2.0, 1.0, 1.0]);
        let mut list = RenderList::build(&tree, root, &[]);
        list.update_sort_values(&mut tree);
        list.sort(&tree);

        let order: Vec<_> = list.iter().map(|u| u.shape).collect();
        // root sits at 0 (no actions) behind every positive depth
        assert_eq!(order, [ids[1], ids[0], ids[2], ids[3], root]);
    }

    #[test]
    fn build_excludes_listed_shapes() {
        let mut tree = ShapeTree::new();
        let root = tree.add(ShapeOptions::new().path(Vec::<Vector3>::new()));
        let dot = tree.add(ShapeOptions::new().add_to(root));
        let line = tree.add(
            ShapeOptions::new().add_to(root).path([Vector3::ZERO, Vector3::xy(1.0, 0.0)]),
        );
        let list = RenderList::build(&tree, root, &[line]);
        assert_eq!(
            list.units(),
            [
                RenderUnit { shape: root },
                RenderUnit { shape: dot },
            ]
        );
    }
}
