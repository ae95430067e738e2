use geo::{GeoFloat, Line};
use log::trace;

use super::{PairTest, SweepStats};
use crate::{
    active::{ActiveSet, InsertionKey},
    events::{build_events, sort_events, Event, SweepPoint},
    results::IntersectionSet,
    SweepConfig, SweepError,
};

/// Sweep controller ordering the active segments by insertion key.
///
/// Events are processed in the order of [`sort_events`]. Each segment is
/// inserted into the active set keyed by its left end point (see
/// [`InsertionKey`]), tested against the two segments it lands between,
/// and removed at its right end point, where its former neighbours are
/// tested against each other.
///
/// Keys are never updated as segments cross, so adjacency in the active
/// set can differ from adjacency on the sweep line. Use [`super::Sweep`] to
/// report every crossing.
pub struct InsertionSweep<'a, T: GeoFloat> {
    tester: PairTest<'a, T>,
    events: Vec<Event<T>>,
    next_event: usize,
    active: ActiveSet<InsertionKey<T>>,
    found: IntersectionSet<T>,
    stats: SweepStats,
}

impl<'a, T: GeoFloat> InsertionSweep<'a, T> {
    pub fn new(segments: &'a [Line<T>], config: &SweepConfig) -> Result<Self, SweepError> {
        let tester = PairTest::new(segments, config)?;
        let mut events = build_events(segments);
        sort_events(&mut events);
        Ok(InsertionSweep {
            tester,
            events,
            next_event: 0,
            active: ActiveSet::new(),
            found: IntersectionSet::new(),
            stats: SweepStats::default(),
        })
    }

    /// Process the next event, and return its point.
    ///
    /// Returns `None` once all events are processed.
    pub fn step(&mut self) -> Result<Option<SweepPoint<T>>, SweepError> {
        let event = match self.events.get(self.next_event) {
            Some(e) => *e,
            None => return Ok(None),
        };
        self.next_event += 1;
        self.handle_event(&event)?;
        Ok(Some(event.point))
    }

    /// Process all remaining events.
    pub fn run(mut self) -> Result<IntersectionSet<T>, SweepError> {
        while self.step()?.is_some() {}
        Ok(self.found)
    }

    #[inline]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn stats(&self) -> SweepStats {
        self.stats
    }

    #[inline]
    pub fn intersections(&self) -> &IntersectionSet<T> {
        &self.found
    }

    pub fn into_intersections(self) -> IntersectionSet<T> {
        self.found
    }

    fn handle_event(&mut self, event: &Event<T>) -> Result<(), SweepError> {
        trace!("handling event: {:?}", event);
        let id = event.segment_key;
        debug_assert!(id < self.tester.segments().len());

        if event.is_left() {
            let key = InsertionKey(event.point);
            let (prev, next) = self.active.insertion_neighbors(id, &key);
            for adj in prev.into_iter().chain(next) {
                self.check(id, adj);
            }
            self.active.insert(id, key)?;
        } else {
            if !self.active.contains(id) {
                return Err(SweepError::InactiveSegment { id });
            }
            let prev = self.active.predecessor(id);
            let next = self.active.successor(id);
            for adj in prev.into_iter().chain(next) {
                self.check(id, adj);
            }
            self.active.remove(id)?;

            // The neighbours of the removed segment are now adjacent.
            if let (Some(prev), Some(next)) = (prev, next) {
                self.check(prev, next);
            }
        }

        self.stats.events += 1;
        self.stats.max_active = self.stats.max_active.max(self.active.len());
        Ok(())
    }

    #[inline]
    fn check(&mut self, a: usize, b: usize) {
        self.stats.pair_tests += 1;
        self.tester.check_and_record(a, b, &mut self.found);
    }
}
