//! The `Voter` record.

use crate::time::whole_minutes;
use crate::{StationId, Tick, VoterSeq};

/// One synthetic voter.
///
/// Created by the arrival generator with only `seq`, `arrival`, and
/// `duration_secs` set.  `station` and `service_start` are filled in once
/// when the voter is admitted to a station.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Voter {
    pub seq: VoterSeq,
    pub arrival: Tick,
    pub duration_secs: u64,
    pub station: Option<StationId>,
    pub service_start: Option<Tick>,
}

impl Voter {
    pub fn new(seq: VoterSeq, arrival: Tick, duration_secs: u64) -> Self {
        Self { seq, arrival, duration_secs, station: None, service_start: None }
    }

    /// Admit the voter to `station` at `now`.
    ///
    /// # Panics
    /// Panics in debug mode if `now` is before the voter's arrival or the
    /// voter was already admitted.
    pub fn admit(&mut self, station: StationId, now: Tick) {
        debug_assert!(now >= self.arrival, "voter admitted before arriving");
        debug_assert!(self.station.is_none(), "voter admitted twice");
        self.station = Some(station);
        self.service_start = Some(now);
    }

    /// Second at which the voter leaves the station, once admitted.
    #[inline]
    pub fn completion(&self) -> Option<Tick> {
        self.service_start.map(|start| start.offset(self.duration_secs))
    }

    /// Seconds spent in line, once admitted.
    #[inline]
    pub fn wait_secs(&self) -> Option<u64> {
        self.service_start.map(|start| start.since(self.arrival))
    }

    /// Whole minutes spent in line, once admitted.
    #[inline]
    pub fn wait_minutes(&self) -> Option<u64> {
        self.wait_secs().map(whole_minutes)
    }
}
