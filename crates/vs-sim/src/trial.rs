//! One simulated election day at a fixed station count.

use vs_core::{Tick, Voter};

use crate::stations::StationPool;
use crate::time_queue::TimeQueue;
use crate::{SimError, SimResult};

/// Per-trial state: the station pool and the three voter collections.
///
/// `Trial` drives a two-phase loop, one iteration per simulated second:
///
/// 1. **Completion**: voters whose completion second has come leave their
///    station and move to `completed`; the station returns to the pool.
/// 2. **Admission**: arrived voters are taken from `pending` in ascending
///    (arrival, sequence) order and each is given the lowest-numbered free
///    station, until either the stations or the arrived voters run out.
///
/// Every voter is in exactly one of `pending`, `in_service`, and `completed`
/// at all times.  A trial is created fresh for each iteration and consumed by
/// [`run`](Self::run).
pub struct Trial {
    clock:      Tick,
    stations:   StationPool,
    pending:    TimeQueue<Voter>,
    in_service: TimeQueue<Voter>,
    completed:  Vec<Voter>,
    population: usize,
    /// No valid trial can still be running after this second: even with one
    /// station, the last arrival plus every service back to back fits.
    deadline:   Tick,
}

impl Trial {
    /// Set up a trial with every voter pending and every station free.
    ///
    /// Voters are queued in (arrival, sequence) order regardless of the order
    /// of `population`.
    pub fn new(station_count: u32, mut population: Vec<Voter>) -> SimResult<Self> {
        if station_count == 0 {
            return Err(SimError::NoStations);
        }

        population.sort_by_key(|v| (v.arrival, v.seq));
        let last_arrival = population.last().map_or(Tick::ZERO, |v| v.arrival);
        let total_service: u64 = population.iter().map(|v| v.duration_secs).sum();
        let size = population.len();

        let mut pending = TimeQueue::new();
        for voter in population {
            pending.push(voter.arrival, voter);
        }

        Ok(Self {
            clock:      Tick::ZERO,
            stations:   StationPool::new(station_count),
            pending,
            in_service: TimeQueue::new(),
            completed:  Vec::with_capacity(size),
            population: size,
            deadline:   last_arrival + total_service + 1,
        })
    }

    /// Run until every voter has finished and return them in completion order.
    pub fn run(mut self) -> SimResult<Vec<Voter>> {
        while !self.is_finished() {
            self.step()?;
        }
        Ok(self.completed)
    }

    /// Process the current second and advance the clock by one.
    ///
    /// Fails with [`SimError::TrialStalled`] once the clock passes the point
    /// by which every voter must have finished.
    pub fn step(&mut self) -> SimResult<()> {
        let now = self.clock;
        if now > self.deadline {
            return Err(SimError::TrialStalled {
                second:     now,
                pending:    self.pending.len(),
                in_service: self.in_service.len(),
            });
        }

        // ── Phase 1: completions ──────────────────────────────────────────
        //
        // `pop_due` also catches anything keyed before `now`, so a
        // zero-length service finishes one second late instead of never.
        while let Some((_, voter)) = self.in_service.pop_due(now) {
            if let Some(station) = voter.station {
                self.stations.release(station);
            }
            self.completed.push(voter);
        }

        // ── Phase 2: admissions ───────────────────────────────────────────
        while let Some(station) = self.stations.lowest_free() {
            let Some((_, mut voter)) = self.pending.pop_due(now) else {
                break;
            };
            self.stations.occupy(station);
            voter.admit(station, now);
            let done = now + voter.duration_secs;
            self.in_service.push(done, voter);
        }

        self.clock.advance();
        Ok(())
    }

    /// `true` once nobody is waiting or being served.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty() && self.in_service.is_empty()
    }

    /// The next second [`step`](Self::step) will process.
    #[inline]
    pub fn now(&self) -> Tick {
        self.clock
    }

    #[inline]
    pub fn population(&self) -> usize {
        self.population
    }

    #[inline]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn in_service_len(&self) -> usize {
        self.in_service.len()
    }

    #[inline]
    pub fn completed(&self) -> &[Voter] {
        &self.completed
    }

    #[inline]
    pub fn free_stations(&self) -> usize {
        self.stations.free_count()
    }

    #[inline]
    pub fn station_count(&self) -> u32 {
        self.stations.capacity()
    }

    /// Voters currently being served, in completion order.
    pub fn in_service(&self) -> impl Iterator<Item = &Voter> {
        self.in_service.iter().map(|(_, v)| v)
    }
}

/// Run one trial to completion.  Shorthand for `Trial::new(..)?.run()`.
pub fn run_trial(station_count: u32, population: Vec<Voter>) -> SimResult<Vec<Voter>> {
    Trial::new(station_count, population)?.run()
}
