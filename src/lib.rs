use nalgebra::Point2;

mod kdtree;
mod shapes;
mod util;

pub use kdtree::{Iter, KdNode, KdTree, Partition, Partitions};
pub use shapes::{Axis, Rect};

/// 2d point type used for all coordinates
pub type P2 = Point2<f64>;

/// Trait for getting a 2d point position of data stored in the [`KdTree`]
pub trait Point {
    /// Get 2d point position
    fn point(&self) -> P2;
}

impl Point for P2 {
    fn point(&self) -> P2 {
        *self
    }
}
