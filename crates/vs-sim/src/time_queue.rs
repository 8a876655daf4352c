//! `TimeQueue`: time-ordered multimap used for the trial's voter collections.
//!
//! Pending voters are keyed by arrival second and in-service voters by
//! completion second.  Many voters can share a key (everyone in line at the
//! open shares second 0), so each key holds a FIFO bucket: items pushed
//! earlier for the same second come out first.
//!
//! `BTreeMap` gives O(log W) insert and pop where W = number of distinct
//! seconds currently enqueued.

use std::collections::{BTreeMap, VecDeque};

use vs_core::Tick;

/// A multimap from simulation second to the items keyed at that second.
pub struct TimeQueue<T> {
    inner: BTreeMap<Tick, VecDeque<T>>,
    /// Cached total item count for O(1) `len()`.
    total: usize,
}

impl<T> Default for TimeQueue<T> {
    fn default() -> Self {
        Self { inner: BTreeMap::new(), total: 0 }
    }
}

impl<T> TimeQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `item` at `tick`, behind anything already queued there.
    pub fn push(&mut self, tick: Tick, item: T) {
        self.inner.entry(tick).or_default().push_back(item);
        self.total += 1;
    }

    /// Remove and return the earliest item whose key is ≤ `now`, or `None`
    /// if the earliest key is still in the future.
    pub fn pop_due(&mut self, now: Tick) -> Option<(Tick, T)> {
        let mut entry = self.inner.first_entry()?;
        let tick = *entry.key();
        if tick > now {
            return None;
        }
        let item = entry.get_mut().pop_front()?;
        if entry.get().is_empty() {
            entry.remove();
        }
        self.total -= 1;
        Some((tick, item))
    }

    /// All items in ascending key order, FIFO within a key.
    pub fn iter(&self) -> impl Iterator<Item = (Tick, &T)> {
        self.inner
            .iter()
            .flat_map(|(&tick, bucket)| bucket.iter().map(move |item| (tick, item)))
    }

    /// Total number of queued items across all seconds.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
