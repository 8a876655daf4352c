//! Plain data row types written by report backends.

use vs_core::Precinct;
use vs_sim::{HistogramRow, IterationSummary, SearchOutcome};

/// One trial's statistics, with waits in minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRow {
    pub iteration:       u32,
    pub precinct:        u32,
    pub precinct_name:   String,
    pub expected_voters: u32,
    pub station_count:   u32,
    pub mean_wait_mins:  f64,
    pub dev_wait_mins:   f64,
    pub too_long:        u64,
    pub too_long_pct:    f64,
    pub plus10:          u64,
    pub plus10_pct:      f64,
    pub plus20:          u64,
    pub plus20_pct:      f64,
}

impl From<&IterationSummary> for IterationRow {
    fn from(s: &IterationSummary) -> Self {
        let t = s.too_long;
        Self {
            iteration:       s.iteration,
            precinct:        s.precinct.0,
            precinct_name:   s.precinct_name.clone(),
            expected_voters: s.expected_voters,
            station_count:   s.station_count,
            mean_wait_mins:  s.mean_wait_minutes(),
            dev_wait_mins:   s.dev_wait_minutes(),
            too_long:        t.over,
            too_long_pct:    s.pct(t.over),
            plus10:          t.over_plus10,
            plus10_pct:      s.pct(t.over_plus10),
            plus20:          t.over_plus20,
            plus20_pct:      s.pct(t.over_plus20),
        }
    }
}

/// One populated minute of a reported histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketRow {
    pub precinct:      u32,
    pub station_count: u32,
    pub minute:        u64,
    /// Voters summed over every iteration of the batch.
    pub count:         u64,
    /// `count` averaged over the batch's iterations.
    pub mean_count:    f64,
    pub stars:         usize,
}

impl BucketRow {
    pub fn new(precinct: &Precinct, station_count: u32, row: &HistogramRow) -> Self {
        Self {
            precinct: precinct.id.0,
            station_count,
            minute: row.minute,
            count: row.count,
            mean_count: row.mean_count,
            stars: row.stars,
        }
    }
}

/// The result of one precinct's search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRow {
    pub precinct:         u32,
    pub precinct_name:    String,
    pub expected_voters:  u32,
    pub min_stations:     u32,
    pub max_stations:     u32,
    /// `None` if no candidate was accepted.
    pub accepted:         Option<u32>,
    pub candidates_tried: u32,
    pub cancelled:        bool,
}

impl OutcomeRow {
    pub fn new(precinct: &Precinct, outcome: &SearchOutcome) -> Self {
        Self {
            precinct:         precinct.id.0,
            precinct_name:    precinct.name.clone(),
            expected_voters:  precinct.expected_voters,
            min_stations:     outcome.bounds.min,
            max_stations:     outcome.bounds.max,
            accepted:         outcome.accepted,
            candidates_tried: outcome.candidates_tried,
            cancelled:        outcome.cancelled,
        }
    }
}
