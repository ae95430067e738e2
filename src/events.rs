//! End-point events of the sweep.
use std::cmp::Ordering;

use geo::{Coordinate, GeoFloat, Line};

use crate::line::SweepLine;

/// A sweep event for sweep-line algorithms.
#[derive(Debug, Clone, Copy)]
pub struct Event<T: GeoFloat> {
    pub point: SweepPoint<T>,
    pub ty: EventType,
    /// Identity of the segment (or segment piece) owning the end point.
    pub segment_key: usize,
}

impl<T: GeoFloat> Event<T> {
    #[inline]
    pub fn is_left(&self) -> bool {
        self.ty == EventType::Left
    }
}

/// Equality check for usage in ordered sets. Note that it ignores
/// segment_key.
impl<T: GeoFloat> PartialEq for Event<T> {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point && self.ty == other.ty
    }
}

/// Assert total equality
impl<T: GeoFloat> Eq for Event<T> {}

/// Ordering for use with a max-heap (`BinaryHeap`). Note that it
/// ignores the segment_key. This suffices for heap usage, where
/// repeated items are allowed.
impl<T: GeoFloat> PartialOrd for Event<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: GeoFloat> Ord for Event<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.point
            .cmp(&other.point)
            .then_with(|| self.ty.cmp(&other.ty))
            .reverse()
    }
}

/// Event type to associate with event.
///
/// The ordering of the variants is important when events are ordered by
/// point: right end points are handled before left end points at the same
/// point, so that segments ending there are no longer active when the
/// segments starting there are inserted.
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Clone, Copy)]
pub enum EventType {
    Right,
    Left,
}

/// Wraps a [`Coordinate`] to support lexicographic ordering.
///
/// The ordering is by `x` and then by `y`. Implements `PartialOrd`,
/// `Ord` and `Eq` even though `Coordinate` doesn't implement these.
/// This is necessary to support insertion to ordered collections,
/// especially `BinaryHeap` as required by sweep algorithms.
///
/// Note that the trait impls exist even when `T` is not `Eq` or
/// `Ord`. We must ensure that any sweep point only contains values
/// that can be consistently ordered.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SweepPoint<T: GeoFloat>(Coordinate<T>);

impl<T: GeoFloat> SweepPoint<T> {
    #[inline]
    pub fn coord(&self) -> Coordinate<T> {
        self.0
    }

    #[inline]
    pub fn x(&self) -> T {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> T {
        self.0.y
    }
}

/// Implement lexicographic ordering by `x` and then by `y`
/// coordinate.
impl<T: GeoFloat> PartialOrd for SweepPoint<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Coordinates are finite, so the comparison never falls back.
impl<T: GeoFloat> Ord for SweepPoint<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        let by = |a: T, b: T| a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        by(self.0.x, other.0.x).then_with(|| by(self.0.y, other.0.y))
    }
}

/// We derive `Eq` manually to not require `T: Eq`.
impl<T: GeoFloat> Eq for SweepPoint<T> {}

/// Create from `Coordinate`; the components must be finite.
impl<T: GeoFloat> From<Coordinate<T>> for SweepPoint<T> {
    fn from(pt: Coordinate<T>) -> Self {
        debug_assert!(
            pt.x.is_finite(),
            "sweep point requires a finite x-coordinate"
        );
        debug_assert!(
            pt.y.is_finite(),
            "sweep point requires a finite y-coordinate"
        );
        SweepPoint(pt)
    }
}

impl<T: GeoFloat> From<(T, T)> for SweepPoint<T> {
    fn from(pt: (T, T)) -> Self {
        Coordinate::from(pt).into()
    }
}

/// Emit the left and right end point events of every segment.
///
/// The left end point is the lexicographically smaller one: smaller `x`,
/// or smaller `y` if the `x` coordinates tie. The event's `segment_key` is
/// the index of the segment in `segments`.
pub fn build_events<T: GeoFloat>(segments: &[Line<T>]) -> Vec<Event<T>> {
    let mut events = Vec::with_capacity(2 * segments.len());
    for (key, line) in segments.iter().enumerate() {
        let line = SweepLine::from(*line);
        events.extend_from_slice(&line.events(key));
    }
    events
}

/// Stable sort of `events` by the `x` coordinate only.
///
/// Events with equal `x` keep the order they were built in; in particular,
/// same-`x` events of different segments are not ordered by type.
pub fn sort_events<T: GeoFloat>(events: &mut [Event<T>]) {
    events.sort_by(|a, b| a.point.x().partial_cmp(&b.point.x()).unwrap_or(Ordering::Equal));
}
