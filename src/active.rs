use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashMap},
    fmt::Debug,
    ops::Bound,
};

use geo::GeoFloat;

use crate::{events::SweepPoint, SweepError};

/// Internal representation used in ordered sets: an ordering item tagged
/// with the key of the segment it stands for.
#[derive(Debug, Clone)]
struct Active<T> {
    item: T,
    key: usize,
}

/// Equality consistent with the `Ord` impl.
impl<T: Ord> PartialEq for Active<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for Active<T> {}

impl<T: Ord> PartialOrd for Active<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Order by item, and then by key so that equal items can co-exist.
impl<T: Ord> Ord for Active<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.item
            .cmp(&other.item)
            .then_with(|| self.key.cmp(&other.key))
    }
}

/// The ordered collection of segments currently crossing the sweep line.
///
/// Segments are referred to by key. Each active key remembers the item it
/// was inserted with, so it can be located again after other insertions
/// and removals. Neighbour queries are answered afresh from the tree on
/// every call and never hold on to a position across a mutation.
///
/// All operations are `O(log n)`.
#[derive(Debug)]
pub struct ActiveSet<T> {
    entries: BTreeSet<Active<T>>,
    items: HashMap<usize, T>,
}

impl<T> Default for ActiveSet<T> {
    fn default() -> Self {
        ActiveSet {
            entries: BTreeSet::new(),
            items: HashMap::new(),
        }
    }
}

impl<T: Ord + Clone + Debug> ActiveSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: usize) -> bool {
        self.items.contains_key(&key)
    }

    /// Insert `key`, ordered by `item`.
    pub fn insert(&mut self, key: usize, item: T) -> Result<(), SweepError> {
        if self.items.contains_key(&key) {
            return Err(SweepError::DuplicateActive { id: key });
        }
        let inserted = self.entries.insert(Active {
            item: item.clone(),
            key,
        });
        debug_assert!(inserted);
        self.items.insert(key, item);
        Ok(())
    }

    /// Remove `key`, returning the item it was inserted with.
    ///
    /// Fails with [`SweepError::UnorderedActive`], leaving the set
    /// unchanged, if the tree search for `key` does not find it.
    pub fn remove(&mut self, key: usize) -> Result<T, SweepError> {
        let probe = self
            .probe(key)
            .ok_or(SweepError::InactiveSegment { id: key })?;
        if !self.entries.remove(&probe) {
            return Err(SweepError::UnorderedActive { id: key });
        }
        self.items.remove(&key);
        Ok(probe.item)
    }

    /// The key just below `key`, if `key` is active and not the lowest.
    pub fn predecessor(&self, key: usize) -> Option<usize> {
        let probe = self.probe(key)?;
        self.entries
            .range((Bound::Unbounded, Bound::Excluded(probe)))
            .next_back()
            .map(|s| s.key)
    }

    /// The key just above `key`, if `key` is active and not the highest.
    pub fn successor(&self, key: usize) -> Option<usize> {
        let probe = self.probe(key)?;
        self.entries
            .range((Bound::Excluded(probe), Bound::Unbounded))
            .next()
            .map(|s| s.key)
    }

    /// Lower bound of a segment that is not yet active: the first active
    /// key that would order after `key` inserted with `item`.
    pub fn find_insertion_slot(&self, key: usize, item: &T) -> Option<usize> {
        self.entries
            .range((Bound::Excluded(self.make_probe(key, item)), Bound::Unbounded))
            .next()
            .map(|s| s.key)
    }

    /// The keys that would be below and above `key` if it were inserted
    /// with `item`.
    pub fn insertion_neighbors(&self, key: usize, item: &T) -> (Option<usize>, Option<usize>) {
        let probe = self.make_probe(key, item);
        let prev = self
            .entries
            .range((Bound::Unbounded, Bound::Excluded(probe.clone())))
            .next_back()
            .map(|s| s.key);
        let next = self
            .entries
            .range((Bound::Excluded(probe), Bound::Unbounded))
            .next()
            .map(|s| s.key);
        (prev, next)
    }

    /// Active keys from bottom to top.
    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|s| s.key)
    }

    fn probe(&self, key: usize) -> Option<Active<T>> {
        self.items.get(&key).map(|item| self.make_probe(key, item))
    }

    #[inline]
    fn make_probe(&self, key: usize, item: &T) -> Active<T> {
        Active {
            item: item.clone(),
            key,
        }
    }
}

/// Ordering item of a segment under [`crate::ActiveOrder::InsertionKey`]:
/// the end point it was inserted with, compared by `y` and then by `x`.
///
/// The key is fixed when the segment is inserted and does not follow the
/// segment as the sweep line advances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertionKey<T: GeoFloat>(pub SweepPoint<T>);

impl<T: GeoFloat> Eq for InsertionKey<T> {}

impl<T: GeoFloat> PartialOrd for InsertionKey<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: GeoFloat> Ord for InsertionKey<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        let by = |a: T, b: T| a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        by(self.0.y(), other.0.y()).then_with(|| by(self.0.x(), other.0.x()))
    }
}
