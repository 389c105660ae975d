use nalgebra as na;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    shapes::{Axis, Rect},
    util::closer,
    Point, P2,
};

/// A k-d tree over 2d points, built once from a fixed set of items and
/// queried for exact nearest neighbors.
///
/// The tree is immutable after [`build`](Self::build): no method takes
/// `&mut self`, so a tree can be shared across threads and queried
/// concurrently without locking. There is no insert or delete; to index a
/// different set of items, build a new tree.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KdTree<T> {
    root: Option<KdNode<T>>,
    len: usize,
}

/// A single node of a [`KdTree`]: a pivot item and the subtrees of items
/// that sorted before and after it on the node's splitting axis.
///
/// Nodes do not store that axis. It alternates with depth, so a caller
/// walking the tree through [`left`](Self::left) and
/// [`right`](Self::right) derives it from its own depth counter (see
/// [`Axis::at_depth`]).
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KdNode<T> {
    item: T,
    left: Option<Box<KdNode<T>>>,
    right: Option<Box<KdNode<T>>>,
}

impl<T: Point> KdTree<T> {
    /// Build a tree from a set of items by recursive median split.
    ///
    /// Each level sorts its candidates by the level's axis coordinate and
    /// pivots on the element at index `len / 2`; items strictly before the
    /// pivot form the left subtree and items strictly after it form the
    /// right, so the tree comes out balanced for well-distributed input.
    /// The sort is stable and total ([`f64::total_cmp`]): items tied on
    /// the split coordinate keep their incoming order, which means a tie
    /// may land on either side of its duplicate but building the same
    /// input twice yields structurally identical trees.
    ///
    /// An empty `items` yields an empty tree, not an error.
    pub fn build(items: Vec<T>) -> Self {
        let len = items.len();
        Self {
            root: Self::build_node(items, Axis::X),
            len,
        }
    }

    fn build_node(mut items: Vec<T>, axis: Axis) -> Option<KdNode<T>> {
        if items.is_empty() {
            return None;
        }

        items.sort_by(|a, b| axis.coord(&a.point()).total_cmp(&axis.coord(&b.point())));

        let median = items.len() / 2;
        let right = items.split_off(median + 1);
        let item = items.pop()?;

        Some(KdNode {
            item,
            left: Self::build_node(items, axis.next()).map(Box::new),
            right: Self::build_node(right, axis.next()).map(Box::new),
        })
    }

    /// Find the stored item nearest to `query` by Euclidean distance.
    ///
    /// The query point does not have to lie anywhere near the indexed
    /// points. Returns `None` only when the tree is empty. Ties on exact
    /// distance resolve toward the candidate met later in the descent's
    /// fold (the second-argument rule of the internal `closer` helper),
    /// which in practice favors pivots nearer the root; callers get a
    /// deterministic winner, not an arbitrary one.
    pub fn nearest(&self, query: &P2) -> Option<&T> {
        self.root
            .as_ref()
            .map(|node| Self::nearest_node(node, query, Axis::X))
    }

    fn nearest_node<'a>(node: &'a KdNode<T>, query: &P2, axis: Axis) -> &'a T {
        let delta = axis.coord(query) - axis.coord(&node.item.point());
        let (near, far) = if delta < 0.0 {
            (node.left.as_deref(), node.right.as_deref())
        } else {
            (node.right.as_deref(), node.left.as_deref())
        };

        let mut best = match near {
            Some(child) => closer(
                query,
                Self::nearest_node(child, query, axis.next()),
                &node.item,
            ),
            None => &node.item,
        };

        // The splitting line sits |delta| away, a lower bound on the
        // distance to anything on the far side. Only cross it if the
        // current best reaches past it.
        if na::distance(query, &best.point()) > delta.abs() {
            if let Some(child) = far {
                best = closer(
                    query,
                    Self::nearest_node(child, query, axis.next()),
                    best,
                );
            }
        }

        best
    }

    /// Walk the tree's spatial partitions.
    ///
    /// `bounds` is the region enclosing all indexed points (for example
    /// the canvas the points were generated in). Each yielded
    /// [`Partition`] carries a node's pivot item, the axis its splitting
    /// line runs across, and the region that line subdivides: everything
    /// a renderer needs to draw the tree's structure without the tree
    /// knowing anything about drawing.
    pub fn partitions(&self, bounds: Rect) -> Partitions<'_, T> {
        Partitions {
            stack: self
                .root
                .as_ref()
                .map(|node| (node, Axis::X, bounds))
                .into_iter()
                .collect(),
        }
    }
}

impl<T> KdTree<T> {
    /// Get the root node, or `None` for an empty tree
    pub fn root(&self) -> Option<&KdNode<T>> {
        self.root.as_ref()
    }

    /// Number of items stored in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree holds no items
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over every stored item.
    ///
    /// The order is deterministic (depth-first from the root) but not
    /// meaningful; the multiset of yielded items is exactly the multiset
    /// the tree was built from.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            stack: self.root.as_ref().into_iter().collect(),
        }
    }
}

impl<T> KdNode<T> {
    /// Get the pivot item stored at this node
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Get the subtree of items that sorted at or before the pivot on
    /// this node's axis
    pub fn left(&self) -> Option<&KdNode<T>> {
        self.left.as_deref()
    }

    /// Get the subtree of items that sorted after the pivot on this
    /// node's axis
    pub fn right(&self) -> Option<&KdNode<T>> {
        self.right.as_deref()
    }
}

/// Depth-first iterator over the items of a [`KdTree`], created by
/// [`KdTree::iter`]
#[derive(Debug)]
pub struct Iter<'a, T> {
    stack: Vec<&'a KdNode<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(right) = node.right() {
            self.stack.push(right);
        }
        if let Some(left) = node.left() {
            self.stack.push(left);
        }
        Some(node.item())
    }
}

/// One node's share of the plane: the pivot item, the axis of the node's
/// splitting line, and the region that line subdivides
#[derive(Clone, Copy, Debug)]
pub struct Partition<'a, T> {
    pub item: &'a T,
    pub axis: Axis,
    pub region: Rect,
}

/// Iterator over a tree's spatial partitions, created by
/// [`KdTree::partitions`]
#[derive(Debug)]
pub struct Partitions<'a, T> {
    stack: Vec<(&'a KdNode<T>, Axis, Rect)>,
}

impl<'a, T: Point> Iterator for Partitions<'a, T> {
    type Item = Partition<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, axis, region) = self.stack.pop()?;
        let (lower, upper) = region.split(axis, axis.coord(&node.item.point()));
        if let Some(right) = node.right() {
            self.stack.push((right, axis.next(), upper));
        }
        if let Some(left) = node.left() {
            self.stack.push((left, axis.next(), lower));
        }
        Some(Partition {
            item: node.item(),
            axis,
            region,
        })
    }
}
