use nalgebra::point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::P2;

/// The coordinate axis a tree level splits across.
///
/// Nodes never store their axis. It alternates with depth, starting from
/// `X` at the root, so every traversal derives it the same way: either by
/// calling [`Axis::next`] while descending or from an explicit depth
/// counter with [`Axis::at_depth`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Get the splitting axis of a node at `depth`: `X` at even depths, `Y` at odd
    pub fn at_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            Self::X
        } else {
            Self::Y
        }
    }

    /// Get the axis used one level deeper
    pub fn next(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Extract this axis's coordinate from a point
    pub fn coord(self, point: &P2) -> f64 {
        match self {
            Self::X => point.x,
            Self::Y => point.y,
        }
    }
}

/// Represents an axis-aligned rectangle defined by two points: the start and
/// the end. It describes the region of the plane a tree node subdivides and
/// provides utility functions for geometric calculations.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    start: P2,
    end: P2,
}

impl Rect {
    /// Create a new rect with a start and end point
    pub fn new(start: P2, end: P2) -> Self {
        Self { start, end }
    }

    /// Get the start point of the rect
    pub fn start(&self) -> P2 {
        self.start
    }

    /// Get the end point of the rect
    pub fn end(&self) -> P2 {
        self.end
    }

    /// Check if a point exists within the rect
    pub fn contains(&self, point: &P2) -> bool {
        *point >= self.start && *point <= self.end
    }

    /// Halve the rect along `axis` at coordinate `at`, producing the lower
    /// and upper halves. `at` is expected to lie within the rect.
    pub fn split(&self, axis: Axis, at: f64) -> (Self, Self) {
        match axis {
            Axis::X => (
                Self::new(self.start, point![at, self.end.y]),
                Self::new(point![at, self.start.y], self.end),
            ),
            Axis::Y => (
                Self::new(self.start, point![self.end.x, at]),
                Self::new(point![self.start.x, at], self.end),
            ),
        }
    }
}
