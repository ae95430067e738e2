use std::cmp::Ordering;

use geo::{
    kernels::{Kernel, Orientation},
    line_intersection::{line_intersection, LineIntersection},
    Coordinate, GeoFloat, Line,
};

use crate::events::{Event, EventType, SweepPoint};

/// A line segment with its end points in sweep order.
///
/// `left` is lexicographically smaller than or equal to `right` (see
/// [`SweepPoint`]). Input segments are validated to have distinct end
/// points before they are swept.
#[derive(Debug, Clone, Copy)]
pub struct SweepLine<T: GeoFloat> {
    left: SweepPoint<T>,
    right: SweepPoint<T>,
}

/// Convert from a [`Line`] ensuring end point ordering.
impl<T: GeoFloat> From<Line<T>> for SweepLine<T> {
    fn from(l: Line<T>) -> Self {
        let start = l.start.into();
        let end = l.end.into();
        if end < start {
            SweepLine::new(end, start)
        } else {
            SweepLine::new(start, end)
        }
    }
}

impl<T: GeoFloat> SweepLine<T> {
    pub fn new(left: SweepPoint<T>, right: SweepPoint<T>) -> Self {
        debug_assert!(left <= right, "sweep line end points out of order");
        SweepLine { left, right }
    }

    #[inline]
    pub fn left(&self) -> SweepPoint<T> {
        self.left
    }

    #[inline]
    pub fn right(&self) -> SweepPoint<T> {
        self.right
    }

    #[inline]
    pub fn line(&self) -> Line<T> {
        Line::new(self.left.coord(), self.right.coord())
    }

    /// Events for both the end points, tagged with `key`.
    pub fn events(&self, key: usize) -> [Event<T>; 2] {
        [
            Event {
                point: self.left,
                ty: EventType::Left,
                segment_key: key,
            },
            Event {
                point: self.right,
                ty: EventType::Right,
                segment_key: key,
            },
        ]
    }

    /// Whether `pt` lies strictly between the end points in sweep order.
    #[inline]
    pub fn spans(&self, pt: SweepPoint<T>) -> bool {
        self.left < pt && pt < self.right
    }

    /// Split at `pt`, keeping the left part in `self` and returning the
    /// right part.
    ///
    /// Returns `None` (and leaves `self` as is) unless `pt` lies strictly
    /// inside the line in sweep order.
    pub fn split_at(&mut self, pt: SweepPoint<T>) -> Option<SweepLine<T>> {
        if !self.spans(pt) {
            return None;
        }
        let right = SweepLine::new(pt, self.right);
        self.right = pt;
        Some(right)
    }

    /// Intersect with `other` using the exact orientation kernel.
    ///
    /// Returns the first and last common points in sweep order: the same
    /// point twice for a single intersection, or the ends of a collinear
    /// overlap. Unlike [`crate::Predicates`] there is no tolerance, so this
    /// agrees with the ordering of lines.
    pub fn intersect_line(&self, other: &Self) -> Option<(SweepPoint<T>, SweepPoint<T>)> {
        line_intersection(self.line(), other.line()).map(|isec| match isec {
            LineIntersection::SinglePoint { intersection, .. } => {
                let pt = SweepPoint::from(intersection);
                (pt, pt)
            }
            LineIntersection::Collinear { intersection } => {
                let overlap = SweepLine::from(intersection);
                (overlap.left, overlap.right)
            }
        })
    }

    /// Compare the vertical position of two lines on the sweep line.
    ///
    /// Requires that both left ends are strictly smaller than both right
    /// ends, which holds for any two lines that are active at the same
    /// time. The line with the smaller left end is taken as the reference,
    /// and the other's left end (then right end) is classified against it.
    /// Lines that do not overlap in sweep order fall back to comparing
    /// their left ends by `y`.
    fn sweep_cmp(&self, other: &Self) -> Ordering {
        if other.left < self.left {
            return other.sweep_cmp(self).reverse();
        }
        if self.right <= other.left || other.right <= self.left {
            return self.left.y().partial_cmp(&other.left.y()).unwrap_or(Ordering::Equal);
        }

        // Assertion: self.left <= other.left
        // Assertion: left ends are smaller than right ends
        let (p, q) = (self.left.coord(), self.right.coord());
        orientation_as_ordering(orient(p, q, other.left.coord()))
            .then_with(|| orientation_as_ordering(orient(p, q, other.right.coord())))
    }
}

#[inline]
fn orient<T: GeoFloat>(p: Coordinate<T>, q: Coordinate<T>, r: Coordinate<T>) -> Orientation {
    T::Ker::orient2d(p, q, r)
}

/// Equality based on ordering defined for lines as per algorithm.
impl<T: GeoFloat> PartialEq for SweepLine<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: GeoFloat> Eq for SweepLine<T> {}

impl<T: GeoFloat> PartialOrd for SweepLine<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordering bottom to top on the sweep line.
///
/// This is only a total order among lines that are simultaneously active
/// and do not cross each other in their common range.
impl<T: GeoFloat> Ord for SweepLine<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.sweep_cmp(other)
    }
}

/// Helper to convert orientation-2d into an ordering.
///
/// A point counter-clockwise of a left-to-right line is above it, so the
/// line orders before a line through that point.
#[inline]
fn orientation_as_ordering(orientation: Orientation) -> Ordering {
    match orientation {
        Orientation::CounterClockwise => Ordering::Less,
        Orientation::Clockwise => Ordering::Greater,
        Orientation::Collinear => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep_line(a: (f64, f64), b: (f64, f64)) -> SweepLine<f64> {
        Line::from([a, b]).into()
    }

    #[test]
    fn test_normalized() {
        let l = sweep_line((4., 1.), (0., 3.));
        assert_eq!(l.left(), SweepPoint::from((0., 3.)));
        assert_eq!(l.right(), SweepPoint::from((4., 1.)));

        let v = sweep_line((2., 7.), (2., 3.));
        assert_eq!(v.left(), SweepPoint::from((2., 3.)));
    }

    #[test]
    fn test_sweep_ordering() {
        let low = sweep_line((0., 0.), (10., 0.));
        let high = sweep_line((2., 5.), (8., 6.));
        let rising = sweep_line((1., -1.), (9., 9.));
        assert!(low < high);
        assert!(high > low);
        // `rising` starts below `low`.
        assert!(rising < low);
        assert!(rising < high);

        // Shared left end: ordered by the right ends.
        let up = sweep_line((0., 0.), (5., 5.));
        let down = sweep_line((0., 0.), (5., -5.));
        assert!(down < up);
        assert!(down < low && low < up);

        // A vertical line starting on `low`.
        let vertical = sweep_line((3., 0.), (3., 2.));
        assert!(low < vertical);
    }

    #[test]
    fn test_split() {
        let mut l = sweep_line((0., 0.), (10., 10.));
        assert!(l.split_at(SweepPoint::from((0., 0.))).is_none());
        assert!(l.split_at(SweepPoint::from((10., 10.))).is_none());
        assert!(l.split_at(SweepPoint::from((11., 11.))).is_none());

        let right = l.split_at(SweepPoint::from((5., 5.))).unwrap();
        assert_eq!(l.left(), SweepPoint::from((0., 0.)));
        assert_eq!(l.right(), SweepPoint::from((5., 5.)));
        assert_eq!(right.left(), SweepPoint::from((5., 5.)));
        assert_eq!(right.right(), SweepPoint::from((10., 10.)));
    }

    #[test]
    fn test_intersect_line() {
        let a = sweep_line((0., 0.), (10., 0.));
        let b = sweep_line((0., 1e-11), (10., -1e-11));
        let pt = SweepPoint::from((5., 0.));
        assert_eq!(a.intersect_line(&b), Some((pt, pt)));
        assert!(a.intersect_line(&sweep_line((0., 1.), (10., 1.))).is_none());

        let overlap = sweep_line((12., 0.), (4., 0.));
        assert_eq!(
            a.intersect_line(&overlap),
            Some((SweepPoint::from((4., 0.)), SweepPoint::from((10., 0.))))
        );
    }
}
