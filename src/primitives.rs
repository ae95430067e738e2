//! Single-pair predicates on points and segments.
//!
//! All tests share one tolerance: a cross product whose magnitude is at
//! most `epsilon` is treated as zero, both when classifying an orientation
//! and when rejecting a near-singular system in [`Predicates::intersection_point`].
//! Using the same band in both places keeps the boolean and point-producing
//! tests from contradicting each other: if [`Predicates::segments_intersect`]
//! holds, the two orientation values of one segment's end points differ by
//! more than `2 * epsilon`, and that difference is the determinant.
use std::cmp::Ordering;

use geo::{kernels::Orientation, Coordinate, GeoFloat, Line};

use crate::{config::DEFAULT_EPSILON, events::SweepPoint, Contact, SweepError};

/// The z-component of the 2-d cross product `v1 × v2`.
#[inline]
pub fn cross<T: GeoFloat>(v1: Coordinate<T>, v2: Coordinate<T>) -> T {
    v1.x * v2.y - v1.y * v2.x
}

/// Orientation of `c` with respect to the directed line `a -> b`, with the
/// default tolerance.
pub fn orientation<T: GeoFloat>(a: Coordinate<T>, b: Coordinate<T>, c: Coordinate<T>) -> Orientation {
    Predicates::default().orientation(a, b, c)
}

/// Whether the two segments properly cross, with the default tolerance.
pub fn segments_intersect<T: GeoFloat>(s1: &Line<T>, s2: &Line<T>) -> bool {
    Predicates::default().segments_intersect(s1, s2)
}

/// The crossing point of two segments, with the default tolerance.
pub fn intersection_point<T: GeoFloat>(s1: &Line<T>, s2: &Line<T>) -> Option<Coordinate<T>> {
    Predicates::default().intersection_point(s1, s2)
}

/// Segment predicates parameterised by a tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Predicates<T: GeoFloat> {
    epsilon: T,
}

impl<T: GeoFloat> Default for Predicates<T> {
    fn default() -> Self {
        Predicates {
            epsilon: T::from(DEFAULT_EPSILON).unwrap_or_else(T::zero),
        }
    }
}

impl<T: GeoFloat> Predicates<T> {
    /// Predicates with tolerance `epsilon`, which must be finite and
    /// non-negative.
    pub fn new(epsilon: T) -> Result<Self, SweepError> {
        if !epsilon.is_finite() || epsilon < T::zero() {
            let value = epsilon.to_f64().unwrap_or(f64::NAN);
            return Err(SweepError::InvalidEpsilon(value));
        }
        Ok(Predicates { epsilon })
    }

    #[inline]
    pub fn epsilon(&self) -> T {
        self.epsilon
    }

    /// Sign of `(b - a) × (c - a)`; `Collinear` inside the tolerance band.
    pub fn orientation(&self, a: Coordinate<T>, b: Coordinate<T>, c: Coordinate<T>) -> Orientation {
        let val = cross(b - a, c - a);
        if val.abs() <= self.epsilon {
            Orientation::Collinear
        } else if val > T::zero() {
            Orientation::CounterClockwise
        } else {
            Orientation::Clockwise
        }
    }

    /// Returns `true` iff the end points of each segment lie strictly on
    /// opposite sides of the other segment's line.
    ///
    /// Touching end points and collinear overlaps are not crossings.
    pub fn segments_intersect(&self, s1: &Line<T>, s2: &Line<T>) -> bool {
        let o1 = self.orientation(s1.start, s1.end, s2.start);
        let o2 = self.orientation(s1.start, s1.end, s2.end);
        let o3 = self.orientation(s2.start, s2.end, s1.start);
        let o4 = self.orientation(s2.start, s2.end, s1.end);
        strictly_opposite(o1, o2) && strictly_opposite(o3, o4)
    }

    /// Like [`Self::segments_intersect`], but also accepts an end point lying
    /// on the other segment, and collinear overlaps.
    pub fn segments_touch(&self, s1: &Line<T>, s2: &Line<T>) -> bool {
        let o1 = self.orientation(s1.start, s1.end, s2.start);
        let o2 = self.orientation(s1.start, s1.end, s2.end);
        let o3 = self.orientation(s2.start, s2.end, s1.start);
        let o4 = self.orientation(s2.start, s2.end, s1.end);

        if o1 != o2 && o3 != o4 {
            return true;
        }
        (o1 == Orientation::Collinear && self.within_bounds(s2.start, s1))
            || (o2 == Orientation::Collinear && self.within_bounds(s2.end, s1))
            || (o3 == Orientation::Collinear && self.within_bounds(s1.start, s2))
            || (o4 == Orientation::Collinear && self.within_bounds(s1.end, s2))
    }

    /// Whether `pt` lies on `segment`, within the tolerance.
    pub fn on_segment(&self, pt: Coordinate<T>, segment: &Line<T>) -> bool {
        self.orientation(segment.start, segment.end, pt) == Orientation::Collinear
            && self.within_bounds(pt, segment)
    }

    /// Solve `p1 + t (q1 - p1) = p2 + u (q2 - p2)` by Cramer's rule.
    ///
    /// Returns `None` if the determinant is within the tolerance of zero
    /// (parallel or collinear segments), or if either parameter falls
    /// outside `[0, 1]`.
    pub fn intersection_point(&self, s1: &Line<T>, s2: &Line<T>) -> Option<Coordinate<T>> {
        let r = s1.delta();
        let s = s2.delta();
        let qp = s2.start - s1.start;

        let denom = cross(r, s);
        if denom.abs() <= self.epsilon {
            return None;
        }

        let t = cross(qp, s) / denom;
        let u = cross(qp, r) / denom;
        let unit = |v: T| v >= T::zero() && v <= T::one();
        if !unit(t) || !unit(u) {
            return None;
        }
        Some(s1.start + r * t)
    }

    /// Test a pair of segments under the given contact rule, and return a
    /// witness point if they meet.
    ///
    /// The pair is put in a canonical order before solving, so the witness
    /// does not depend on the order of the arguments.
    pub fn contact(&self, s1: &Line<T>, s2: &Line<T>, contact: Contact) -> Option<Coordinate<T>> {
        let (s1, s2) = canonical_pair(s1, s2);
        match contact {
            Contact::Crossing => {
                if self.segments_intersect(&s1, &s2) {
                    self.intersection_point(&s1, &s2)
                } else {
                    None
                }
            }
            Contact::Touching => {
                if !self.segments_touch(&s1, &s2) {
                    return None;
                }
                self.intersection_point(&s1, &s2)
                    .or_else(|| self.shared_end_point(&s1, &s2))
            }
        }
    }

    /// The lexicographically smallest end point of either segment lying on
    /// the other one.
    fn shared_end_point(&self, s1: &Line<T>, s2: &Line<T>) -> Option<Coordinate<T>> {
        let candidates = [
            (s1.start, s2),
            (s1.end, s2),
            (s2.start, s1),
            (s2.end, s1),
        ];
        candidates
            .iter()
            .filter(|(pt, other)| self.on_segment(*pt, other))
            .map(|(pt, _)| SweepPoint::from(*pt))
            .min()
            .map(|pt| pt.coord())
    }

    /// Bounding box containment, padded by the tolerance.
    fn within_bounds(&self, pt: Coordinate<T>, segment: &Line<T>) -> bool {
        let eps = self.epsilon;
        pt.x <= segment.start.x.max(segment.end.x) + eps
            && pt.x >= segment.start.x.min(segment.end.x) - eps
            && pt.y <= segment.start.y.max(segment.end.y) + eps
            && pt.y >= segment.start.y.min(segment.end.y) - eps
    }
}

#[inline]
fn strictly_opposite(o1: Orientation, o2: Orientation) -> bool {
    matches!(
        (o1, o2),
        (Orientation::Clockwise, Orientation::CounterClockwise)
            | (Orientation::CounterClockwise, Orientation::Clockwise)
    )
}

/// Orient both segments left to right, and order the pair by their end
/// points.
fn canonical_pair<T: GeoFloat>(s1: &Line<T>, s2: &Line<T>) -> (Line<T>, Line<T>) {
    let normalize = |l: &Line<T>| {
        let (p, q) = (SweepPoint::from(l.start), SweepPoint::from(l.end));
        if q < p {
            (q, p)
        } else {
            (p, q)
        }
    };
    let (a, b) = (normalize(s1), normalize(s2));
    let (a, b) = match a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    };
    (
        Line::new(a.0.coord(), a.1.coord()),
        Line::new(b.0.coord(), b.1.coord()),
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn line(a: (f64, f64), b: (f64, f64)) -> Line<f64> {
        Line::from([a, b])
    }

    #[test]
    fn test_orientation() {
        let a = Coordinate::from((0., 0.));
        let b = Coordinate::from((1., 0.));
        assert_eq!(orientation(a, b, (0.5, 1.).into()), Orientation::CounterClockwise);
        assert_eq!(orientation(a, b, (0.5, -1.).into()), Orientation::Clockwise);
        assert_eq!(orientation(a, b, (2., 0.).into()), Orientation::Collinear);
        // Inside the tolerance band
        assert_eq!(orientation(a, b, (0.5, 1e-10).into()), Orientation::Collinear);
        assert_eq!(
            Predicates::new(0.).unwrap().orientation(a, b, (0.5, 1e-10).into()),
            Orientation::CounterClockwise
        );
    }

    #[test]
    fn test_invalid_tolerance() {
        assert_eq!(Predicates::new(-1e-9), Err(SweepError::InvalidEpsilon(-1e-9)));
        assert!(Predicates::<f64>::new(f64::NAN).is_err());
        assert!(Predicates::<f32>::new(f32::INFINITY).is_err());
        assert_eq!(Predicates::new(1e-9f64).map(|p| p.epsilon()), Ok(1e-9));
    }

    #[test]
    fn test_crossing() {
        let s1 = line((0., 0.), (4., 4.));
        let s2 = line((0., 1.), (1., 0.));
        assert!(segments_intersect(&s1, &s2));
        let pt = intersection_point(&s1, &s2).unwrap();
        assert_abs_diff_eq!(pt.x, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(pt.y, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_parallel() {
        let s1 = line((0., 0.), (1., 0.));
        let s2 = line((0., 1.), (1., 1.));
        assert!(!segments_intersect(&s1, &s2));
        assert_eq!(intersection_point(&s1, &s2), None);

        // Collinear overlap has a zero determinant too.
        let s3 = line((0.5, 0.), (2., 0.));
        assert!(!segments_intersect(&s1, &s3));
        assert_eq!(intersection_point(&s1, &s3), None);
    }

    #[test]
    fn test_parameters_out_of_range() {
        // The lines cross at (2, 2), beyond the end of the second segment.
        let s1 = line((0., 0.), (4., 4.));
        let s2 = line((0., 4.), (1., 3.));
        assert!(!segments_intersect(&s1, &s2));
        assert_eq!(intersection_point(&s1, &s2), None);
    }

    #[test]
    fn test_touching() {
        let preds = Predicates::<f64>::default();

        // T-junction: end point of s2 on the interior of s1.
        let s1 = line((0., 0.), (4., 0.));
        let s2 = line((2., 0.), (2., 3.));
        assert!(!preds.segments_intersect(&s1, &s2));
        assert!(preds.segments_touch(&s1, &s2));
        assert_eq!(preds.contact(&s1, &s2, Contact::Crossing), None);
        let pt = preds.contact(&s1, &s2, Contact::Touching).unwrap();
        assert_abs_diff_eq!(pt.x, 2., epsilon = 1e-12);
        assert_abs_diff_eq!(pt.y, 0., epsilon = 1e-12);

        // Collinear overlap: witness is the smallest contained end point.
        let s3 = line((3., 0.), (1., 0.));
        assert!(preds.segments_touch(&s1, &s3));
        assert_eq!(
            preds.contact(&s1, &s3, Contact::Touching),
            Some(Coordinate::from((1., 0.)))
        );

        // Collinear but disjoint.
        let s4 = line((5., 0.), (6., 0.));
        assert!(!preds.segments_touch(&s1, &s4));
        assert!(!preds.on_segment(Coordinate::from((5., 0.)), &s1));
    }

    #[test]
    fn test_contact_is_symmetric() {
        let preds = Predicates::<f64>::default();
        let s1 = line((2., 5.), (10., 1.));
        let s2 = line((3., 2.), (10., 3.));
        let a = preds.contact(&s1, &s2, Contact::Crossing).unwrap();
        let b = preds.contact(&s2, &s1, Contact::Crossing).unwrap();
        let c = preds.contact(&line((10., 1.), (2., 5.)), &s2, Contact::Crossing).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_abs_diff_eq!(a.x, 62. / 9., epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, 23. / 9., epsilon = 1e-9);
    }
}
