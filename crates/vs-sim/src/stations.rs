//! Fixed-size pool of service stations.

use std::collections::BTreeSet;

use vs_core::StationId;

/// The stations of one trial, numbered `0..capacity`.
///
/// Free stations are kept ordered so the lowest-numbered one is always handed
/// out first.  `free_count() + in_use()` is `capacity` for the pool's whole
/// life.
pub struct StationPool {
    free:     BTreeSet<StationId>,
    capacity: u32,
}

impl StationPool {
    /// A pool with every station free.
    pub fn new(capacity: u32) -> Self {
        Self {
            free: (0..capacity).map(StationId).collect(),
            capacity,
        }
    }

    /// The lowest-numbered free station, without claiming it.
    #[inline]
    pub fn lowest_free(&self) -> Option<StationId> {
        self.free.first().copied()
    }

    /// Mark `station` as occupied.
    ///
    /// # Panics
    /// Panics in debug mode if `station` was not free.
    pub fn occupy(&mut self, station: StationId) {
        let was_free = self.free.remove(&station);
        debug_assert!(was_free, "{station} occupied twice");
    }

    /// Return `station` to the pool.
    ///
    /// # Panics
    /// Panics in debug mode if `station` is outside the pool or already free.
    pub fn release(&mut self, station: StationId) {
        debug_assert!(station.0 < self.capacity, "{station} outside pool of {}", self.capacity);
        let newly_free = self.free.insert(station);
        debug_assert!(newly_free, "{station} released twice");
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn in_use(&self) -> usize {
        self.capacity as usize - self.free.len()
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}
