use std::collections::BinaryHeap;

use geo::{GeoFloat, Line};
use log::{debug, trace};
use slab::Slab;

use super::{PairTest, SweepStats};
use crate::{
    active::ActiveSet,
    events::{Event, EventType, SweepPoint},
    line::SweepLine,
    results::IntersectionSet,
    SweepConfig, SweepError,
};

/// A piece of an input segment generated during the sweep.
///
/// Every input segment starts out as one piece. A piece is split whenever
/// an intersection is found strictly inside it and ahead of the sweep.
#[derive(Debug, Clone, Copy)]
struct Segment<T: GeoFloat> {
    line: SweepLine<T>,
    key: usize,
    /// Index of the input segment this piece belongs to.
    id: usize,
}

impl<T: GeoFloat> Segment<T> {
    /// Create and store a `Segment` for the input segment `id`.
    fn new(storage: &mut Slab<Self>, id: usize, line: SweepLine<T>) -> &mut Self {
        let entry = storage.vacant_entry();
        let segment = Segment {
            key: entry.key(),
            id,
            line,
        };
        entry.insert(segment)
    }

    /// Get an event for the right end-point (end) of this segment.
    fn right_event(&self) -> Event<T> {
        Event {
            point: self.line.right(),
            ty: EventType::Right,
            segment_key: self.key,
        }
    }

    /// Get events for both the end-points of this segment.
    fn events(&self) -> [Event<T>; 2] {
        self.line.events(self.key)
    }
}

/// Sweep controller keeping the active segments in their order on the
/// sweep line.
///
/// This is the [Bentley-Ottman] sweep. Maintains a heap of end points and
/// the currently active segments. When two adjacent segments are found to
/// cross ahead of the sweep, both are cut at the crossing: the left pieces
/// end there, and the right pieces start there. The sweep then removes the
/// left pieces and inserts the right pieces in their new order when it
/// reaches the crossing, so active segments never cross each other.
///
/// Runs in `O((n + k) log n)` time for `n` segments and `k` crossings.
///
/// [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
pub struct Sweep<'a, T: GeoFloat> {
    tester: PairTest<'a, T>,
    segments: Slab<Segment<T>>,
    events: BinaryHeap<Event<T>>,
    active: ActiveSet<SweepLine<T>>,
    found: IntersectionSet<T>,
    stats: SweepStats,
}

impl<'a, T: GeoFloat> Sweep<'a, T> {
    pub fn new(segments: &'a [Line<T>], config: &SweepConfig) -> Result<Self, SweepError> {
        let tester = PairTest::new(segments, config)?;
        let size = segments.len();
        let mut sweep = Sweep {
            tester,
            segments: Slab::with_capacity(size),
            events: BinaryHeap::with_capacity(2 * size),
            active: ActiveSet::new(),
            found: IntersectionSet::new(),
            stats: SweepStats::default(),
        };
        for (id, line) in segments.iter().enumerate() {
            sweep.create_segment(id, SweepLine::from(*line));
        }
        Ok(sweep)
    }

    /// Process the next event in heap, and return its point.
    ///
    /// Stale events are skipped without being processed, but their point is
    /// still returned. Returns `None` once the heap is empty.
    pub fn step(&mut self) -> Result<Option<SweepPoint<T>>, SweepError> {
        let event = match self.events.pop() {
            Some(e) => e,
            None => return Ok(None),
        };
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

    /// Create a segment, and add its events into the heap.
    fn create_segment(&mut self, id: usize, line: SweepLine<T>) -> usize {
        let segment = Segment::new(&mut self.segments, id, line);
        for e in segment.events().iter() {
            self.events.push(*e);
        }
        segment.key
    }

    /// Check event is valid, and return the segment associated with it.
    ///
    /// If a segment was split, its original right end event is still in
    /// the heap but no longer matches the segment. Returns `None` in this
    /// case.
    fn segment_for_event(&self, event: &Event<T>) -> Option<Segment<T>> {
        let segment = self.segments.get(event.segment_key);
        match event.ty {
            EventType::Left => {
                debug_assert!(
                    matches!(segment, Some(s) if s.line.left() == event.point),
                    "segment for left event not found in storage"
                );
                segment.copied()
            }
            EventType::Right => match segment {
                Some(s) if s.line.right() == event.point => Some(*s),
                _ => None,
            },
        }
    }

    /// Handle one event.
    fn handle_event(&mut self, event: &Event<T>) -> Result<(), SweepError> {
        trace!("handling event: {:?}", event);
        let segment = match self.segment_for_event(event) {
            Some(s) => s,
            None => {
                trace!("skipping stale event");
                self.stats.stale_events += 1;
                return Ok(());
            }
        };
        let key = segment.key;

        match event.ty {
            EventType::Left => {
                let (prev, next) = self.active.insertion_neighbors(key, &segment.line);
                for adj_key in prev.into_iter().chain(next) {
                    self.check_adjacent(key, adj_key, event.point);
                }

                // The segment may have been split above.
                let line = self.segments[key].line;
                self.active.insert(key, line)?;
            }
            EventType::Right => {
                if !self.active.contains(key) {
                    return Err(SweepError::InactiveSegment { id: segment.id });
                }
                let prev = self.active.predecessor(key);
                let next = self.active.successor(key);
                for adj_key in prev.into_iter().chain(next) {
                    self.check_adjacent(key, adj_key, event.point);
                }
                self.active.remove(key)?;
                self.segments.remove(key);

                // The neighbours of the removed segment are now adjacent.
                if let (Some(prev_key), Some(next_key)) = (prev, next) {
                    self.check_adjacent(prev_key, next_key, event.point);
                }
            }
        }

        self.stats.events += 1;
        self.stats.max_active = self.stats.max_active.max(self.active.len());
        Ok(())
    }

    /// Test the segments stored at `key1` and `key2` (now adjacent), and
    /// split both where they meet ahead of `sweep_point`.
    ///
    /// Reporting uses the tolerance-based pair test on the input segments.
    /// Splitting uses the exact intersection of the pieces, the same kernel
    /// that orders the active set, so pieces that cross are always split
    /// even when the pair is not reported.
    fn check_adjacent(&mut self, key1: usize, key2: usize, sweep_point: SweepPoint<T>) {
        let (seg1, seg2) = (self.segments[key1], self.segments[key2]);
        if seg1.id == seg2.id {
            return;
        }
        self.stats.pair_tests += 1;
        self.tester.check_and_record(seg1.id, seg2.id, &mut self.found);

        let (first, last) = match seg1.line.intersect_line(&seg2.line) {
            Some(pts) => pts,
            None => return,
        };
        // Split at the far end of an overlap first, so the near end is still
        // inside the truncated pieces.
        for &pt in [last, first].iter() {
            if pt > sweep_point {
                self.split_segment(key1, pt);
                self.split_segment(key2, pt);
            }
            if first == last {
                break;
            }
        }
    }

    /// Split the segment at `key` at `pt`, if `pt` is strictly inside it.
    ///
    /// The stored segment is truncated to end at `pt`, which does not change
    /// its order among the active segments, and a new segment is created for
    /// the rest.
    fn split_segment(&mut self, key: usize, pt: SweepPoint<T>) {
        let segment = &mut self.segments[key];
        let right = match segment.line.split_at(pt) {
            Some(right) => right,
            None => return,
        };
        debug!(
            "split segment {id} at {pt:?}: {left:?} / {right:?}",
            id = segment.id,
            pt = pt,
            left = segment.line,
            right = right,
        );
        let (id, event) = (segment.id, segment.right_event());
        self.events.push(event);
        self.create_segment(id, right);
        self.stats.splits += 1;
    }
}
