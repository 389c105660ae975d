use nalgebra as na;

use crate::{Point, P2};

/// Pick whichever of two candidates lies nearer to `query` by Euclidean
/// distance. On exact equality the second candidate wins; the
/// nearest-neighbor descent folds candidates through this rule, so the
/// winner of a tie is deterministic rather than "either one."
pub(crate) fn closer<'a, T: Point>(query: &P2, a: &'a T, b: &'a T) -> &'a T {
    if na::distance(query, &a.point()) < na::distance(query, &b.point()) {
        a
    } else {
        b
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use nalgebra::point;

    use crate::shapes::Rect;

    use super::*;

    pub(crate) fn make_rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Rect {
        Rect::new(point![x1, y1], point![x2, y2])
    }

    /// The classic six-point set from the k-d tree literature; its x median
    /// is (7,2)
    pub(crate) fn sample_points() -> Vec<P2> {
        vec![
            point![2.0, 3.0],
            point![5.0, 4.0],
            point![9.0, 6.0],
            point![4.0, 7.0],
            point![8.0, 1.0],
            point![7.0, 2.0],
        ]
    }

    #[test]
    fn closer_picks_the_strictly_nearer_candidate() {
        let query = point![0.0, 0.0];
        let near = point![1.0, 0.0];
        let far = point![5.0, 5.0];
        assert_eq!(*closer(&query, &near, &far), near);
        assert_eq!(
            *closer(&query, &far, &near),
            near,
            "Argument order should not matter when one candidate is strictly nearer"
        );
    }

    #[test]
    fn closer_breaks_ties_toward_the_second_candidate() {
        let query = point![0.0, 0.0];
        let a = point![2.0, 0.0];
        let b = point![0.0, 2.0];
        assert_eq!(
            *closer(&query, &a, &b),
            b,
            "On equal distances the second candidate should win"
        );
        assert_eq!(
            *closer(&query, &b, &a),
            a,
            "On equal distances the second candidate should win"
        );
    }
}
