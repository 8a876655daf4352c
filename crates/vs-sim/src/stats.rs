//! Per-iteration wait statistics.
//!
//! Every average and percentage here is normalized by the precinct's
//! *expected* voter count, not by the number of voters the trial actually
//! generated.  The two differ by the rounding of the hourly shares and the
//! even-hour extra voter.

use vs_core::{Precinct, PrecinctId, Voter};

use crate::histogram::WaitHistogram;
use crate::{SimError, SimResult};

/// Minutes added to the threshold for the second and third toolong counts.
pub const TOOLONG_STEP_MINUTES: u64 = 10;

/// Voters who waited strictly longer than the threshold, threshold + 10, and
/// threshold + 20 minutes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TooLongCounts {
    pub over:        u64,
    pub over_plus10: u64,
    pub over_plus20: u64,
}

impl TooLongCounts {
    pub fn from_histogram(hist: &WaitHistogram, threshold_minutes: u64) -> Self {
        Self {
            over:        hist.count_above(threshold_minutes),
            over_plus10: hist.count_above(threshold_minutes + TOOLONG_STEP_MINUTES),
            over_plus20: hist.count_above(threshold_minutes + 2 * TOOLONG_STEP_MINUTES),
        }
    }
}

/// The statistics of one trial.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationSummary {
    pub iteration:       u32,
    pub precinct:        PrecinctId,
    pub precinct_name:   String,
    pub expected_voters: u32,
    pub station_count:   u32,
    pub completed:       usize,
    pub mean_wait_secs:  f64,
    pub dev_wait_secs:   f64,
    pub too_long:        TooLongCounts,
}

impl IterationSummary {
    #[inline]
    pub fn mean_wait_minutes(&self) -> f64 {
        self.mean_wait_secs / 60.0
    }

    #[inline]
    pub fn dev_wait_minutes(&self) -> f64 {
        self.dev_wait_secs / 60.0
    }

    /// `count` as a percentage of the expected voters.
    pub fn pct(&self, count: u64) -> f64 {
        100.0 * count as f64 / f64::from(self.expected_voters)
    }

    /// `true` if nobody waited past the threshold.
    #[inline]
    pub fn within_threshold(&self) -> bool {
        self.too_long.over == 0
    }
}

/// Summarize one finished trial and fold its waits into `batch`.
///
/// `completed` is the trial's completed collection.  Fails with
/// [`SimError::NoExpectedVoters`] when the precinct expects nobody.
pub fn summarize(
    iteration: u32,
    precinct: &Precinct,
    station_count: u32,
    too_long_minutes: u32,
    completed: &[Voter],
    batch: &mut WaitHistogram,
) -> SimResult<IterationSummary> {
    if precinct.expected_voters == 0 {
        return Err(SimError::NoExpectedVoters { precinct: precinct.id });
    }
    let n = f64::from(precinct.expected_voters);

    let this_trial = WaitHistogram::from_voters(completed);
    let too_long = TooLongCounts::from_histogram(&this_trial, u64::from(too_long_minutes));
    batch.merge(&this_trial);

    let waits: Vec<f64> = completed
        .iter()
        .filter_map(Voter::wait_secs)
        .map(|w| w as f64)
        .collect();
    let mean = waits.iter().sum::<f64>() / n;
    let variance = waits.iter().map(|w| (w - mean) * (w - mean)).sum::<f64>() / n;

    Ok(IterationSummary {
        iteration,
        precinct: precinct.id,
        precinct_name: precinct.name.clone(),
        expected_voters: precinct.expected_voters,
        station_count,
        completed: completed.len(),
        mean_wait_secs: mean,
        dev_wait_secs: variance.sqrt(),
        too_long,
    })
}
