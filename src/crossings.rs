//! Entry points for finding all pairwise intersections of a set of
//! segments.
use geo::{Coordinate, GeoFloat, Line};
use log::debug;

use crate::{
    primitives::Predicates, results::IntersectionSet, ActiveOrder, Contact, Intersection,
    SweepConfig, SweepError,
};

mod insertion;
pub use insertion::InsertionSweep;

mod sweep;
pub use sweep::Sweep;

/// Counters collected while sweeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Events processed.
    pub events: usize,
    /// Right-end events skipped because their segment was split after the
    /// event was queued.
    pub stale_events: usize,
    /// Pairs of segments tested for intersection.
    pub pair_tests: usize,
    /// Segments split at an intersection ahead of the sweep.
    pub splits: usize,
    /// Largest number of simultaneously active segments.
    pub max_active: usize,
}

/// Report every intersecting pair of `segments` with the default
/// [`SweepConfig`].
///
/// Each segment is identified by its index in `segments`. Each intersecting
/// pair is reported once, as `first < second`, with one witnessed point.
/// The result is ordered by `(first, second)`.
///
/// ```rust
/// use geo::Line;
/// use segment_crossings::find_all_intersections;
/// let input = vec![
///     Line::from([(0., 0.), (4., 4.)]),
///     Line::from([(0., 1.), (1., 0.)]),
///     Line::from([(0., 3.), (1., 3.)]),
/// ];
/// let found = find_all_intersections(&input).unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!((found[0].first, found[0].second), (0, 1));
/// assert_eq!(found[0].point.x, 0.5);
/// ```
pub fn find_all_intersections<T: GeoFloat>(
    segments: &[Line<T>],
) -> Result<Vec<Intersection<T>>, SweepError> {
    find_intersections_with(segments, &SweepConfig::default())
}

/// Report every intersecting pair of `segments` under `config`.
pub fn find_intersections_with<T: GeoFloat>(
    segments: &[Line<T>],
    config: &SweepConfig,
) -> Result<Vec<Intersection<T>>, SweepError> {
    let found = match config.order {
        ActiveOrder::SweepPosition => Sweep::new(segments, config)?.run()?,
        ActiveOrder::InsertionKey => InsertionSweep::new(segments, config)?.run()?,
    };
    Ok(found.into_vec())
}

/// Test all pairs of `segments` directly.
///
/// Uses the same pair test and reports in the same form as the sweeps;
/// `config.order` is ignored. Takes `O(n^2)` time.
pub fn brute_force_intersections<T: GeoFloat>(
    segments: &[Line<T>],
    config: &SweepConfig,
) -> Result<Vec<Intersection<T>>, SweepError> {
    let tester = PairTest::new(segments, config)?;
    let mut found = IntersectionSet::new();
    for i in 0..segments.len() {
        for j in i + 1..segments.len() {
            if let Some(pt) = tester.check(i, j) {
                found.record(i, j, pt);
            }
        }
    }
    Ok(found.into_vec())
}

/// Pair test over the input segments, addressed by identity.
pub(crate) struct PairTest<'a, T: GeoFloat> {
    segments: &'a [Line<T>],
    predicates: Predicates<T>,
    contact: Contact,
}

impl<'a, T: GeoFloat> PairTest<'a, T> {
    /// Validate the input and the configuration.
    pub(crate) fn new(segments: &'a [Line<T>], config: &SweepConfig) -> Result<Self, SweepError> {
        let predicates = Predicates::new(config.tolerance()?)?;
        for (id, line) in segments.iter().enumerate() {
            let finite = [line.start.x, line.start.y, line.end.x, line.end.y]
                .iter()
                .all(|v| v.is_finite());
            if !finite {
                return Err(SweepError::NonFiniteCoordinate { id });
            }
            if line.start == line.end {
                return Err(SweepError::DegenerateSegment { id });
            }
        }
        Ok(PairTest {
            segments,
            predicates,
            contact: config.contact,
        })
    }

    #[inline]
    pub(crate) fn segments(&self) -> &'a [Line<T>] {
        self.segments
    }

    /// Test the input segments `a` and `b`.
    pub(crate) fn check(&self, a: usize, b: usize) -> Option<Coordinate<T>> {
        self.predicates
            .contact(&self.segments[a], &self.segments[b], self.contact)
    }

    /// Test `a` and `b`, and record the witness in `found`.
    ///
    /// Returns the witness if the segments meet, whether or not the pair
    /// was already recorded.
    pub(crate) fn check_and_record(
        &self,
        a: usize,
        b: usize,
        found: &mut IntersectionSet<T>,
    ) -> Option<Coordinate<T>> {
        let pt = self.check(a, b)?;
        if found.record(a, b, pt) {
            debug!(
                "Found intersection:\n\tsegment1: {a}: {s1:?}\n\tsegment2: {b}: {s2:?}\n\tintersection: {pt:?}",
                a = a,
                b = b,
                s1 = self.segments[a],
                s2 = self.segments[b],
                pt = pt,
            );
        }
        Some(pt)
    }
}
