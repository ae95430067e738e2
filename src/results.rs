use std::collections::{btree_map::Entry, BTreeMap};

use geo::{Coordinate, GeoFloat};

/// An intersecting pair of input segments.
///
/// `first < second` are the indices of the segments in the input, and
/// `point` is a witnessed intersection point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection<T: GeoFloat> {
    pub first: usize,
    pub second: usize,
    pub point: Coordinate<T>,
}

/// Deduplicated set of intersections, keyed by the unordered pair of
/// segment identities.
///
/// The first point recorded for a pair is kept; later reports of the same
/// pair, from either direction, are ignored.
#[derive(Debug, Clone)]
pub struct IntersectionSet<T: GeoFloat> {
    found: BTreeMap<(usize, usize), Coordinate<T>>,
}

impl<T: GeoFloat> Default for IntersectionSet<T> {
    fn default() -> Self {
        IntersectionSet {
            found: BTreeMap::new(),
        }
    }
}

impl<T: GeoFloat> IntersectionSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that segments `a` and `b` meet at `point`.
    ///
    /// Returns `true` if the pair was not recorded before.
    pub fn record(&mut self, a: usize, b: usize, point: Coordinate<T>) -> bool {
        debug_assert_ne!(a, b, "a segment can't intersect itself");
        match self.found.entry(pair_key(a, b)) {
            Entry::Vacant(entry) => {
                entry.insert(point);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    #[inline]
    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.found.contains_key(&pair_key(a, b))
    }

    /// The point recorded for the pair `a`, `b`, in either order.
    #[inline]
    pub fn get(&self, a: usize, b: usize) -> Option<Coordinate<T>> {
        self.found.get(&pair_key(a, b)).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.found.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }

    /// Intersections ordered by `(first, second)`.
    pub fn iter(&self) -> impl Iterator<Item = Intersection<T>> + '_ {
        self.found
            .iter()
            .map(|(&(first, second), &point)| Intersection {
                first,
                second,
                point,
            })
    }

    pub fn into_vec(self) -> Vec<Intersection<T>> {
        self.iter().collect()
    }
}

#[inline]
fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
