//! Minimum station-count search for one precinct.

use tracing::{debug, trace, warn};

use vs_core::time::SECS_PER_HOUR;
use vs_core::{ElectionConfig, Precinct, PrecinctId, RandomSource};

use crate::arrivals::ArrivalGenerator;
use crate::histogram::WaitHistogram;
use crate::observer::SearchObserver;
use crate::stats::{summarize, IterationSummary};
use crate::trial::run_trial;
use crate::{SimError, SimResult};

/// Inclusive range of candidate station counts for one precinct.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StationBounds {
    pub min: u32,
    pub max: u32,
}

impl StationBounds {
    /// `min` is the stations needed if the expected voters' mean service time
    /// were spread evenly over the day, at least one; `max` adds one station
    /// per hour of the day on top.
    pub fn for_precinct(config: &ElectionConfig, expected_voters: u32) -> Self {
        let busy_secs = u64::from(expected_voters) * u64::from(config.mean_service_secs);
        let day_secs = u64::from(config.day_length_hours) * SECS_PER_HOUR;
        let even_spread = if day_secs == 0 { 0 } else { busy_secs / day_secs };
        let min = u32::try_from(even_spread).unwrap_or(u32::MAX).max(1);
        Self { min, max: min.saturating_add(config.day_length_hours) }
    }
}

/// Everything run for one candidate station count.
#[derive(Clone, Debug)]
pub struct CandidateBatch {
    pub precinct:      PrecinctId,
    pub station_count: u32,
    pub summaries:     Vec<IterationSummary>,
    /// Waits of every trial in the batch, merged.
    pub histogram:     WaitHistogram,
    /// Every iteration ran and none had a voter over the threshold.
    pub accepted:      bool,
    /// The precinct asked for this count's histogram.
    pub reported:      bool,
    /// `false` if the observer stopped the batch part-way.
    pub complete:      bool,
}

impl CandidateBatch {
    /// Iterations actually run; the histogram is averaged over this.
    #[inline]
    pub fn iterations_run(&self) -> u32 {
        self.summaries.len() as u32
    }

    /// Voters completed across every trial of the batch.
    pub fn completed_voters(&self) -> u64 {
        self.summaries.iter().map(|s| s.completed as u64).sum()
    }
}

/// Result of searching one precinct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub precinct:         PrecinctId,
    pub bounds:           StationBounds,
    /// Smallest accepted count, or `None` if every candidate was rejected or
    /// the search was cancelled first.
    pub accepted:         Option<u32>,
    pub candidates_tried: u32,
    pub cancelled:        bool,
}

/// Ascending search over [`StationBounds`] for the first candidate whose
/// whole batch keeps every voter within the wait threshold.
///
/// Draw order on `rng` is fixed: candidates ascending, then iterations, then
/// the arrival generator's own order.  A rejected batch still runs all of
/// its iterations.
pub struct StationCountSearch<'a> {
    config: &'a ElectionConfig,
}

impl<'a> StationCountSearch<'a> {
    /// Fails if `config` does not validate.
    pub fn new(config: &'a ElectionConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &ElectionConfig {
        self.config
    }

    /// Search `precinct`, reporting every step to `observer`.
    ///
    /// `observer.should_stop()` is polled before each candidate and between
    /// iterations; stopping yields an outcome with `cancelled` set.
    pub fn run<R, O>(&self, precinct: &Precinct, rng: &mut R, observer: &mut O) -> SimResult<SearchOutcome>
    where
        R: RandomSource,
        O: SearchObserver + ?Sized,
    {
        if precinct.expected_voters == 0 {
            return Err(SimError::NoExpectedVoters { precinct: precinct.id });
        }

        let bounds = StationBounds::for_precinct(self.config, precinct.expected_voters);
        debug!(precinct = %precinct.id, min = bounds.min, max = bounds.max, "searching station counts");
        observer.on_precinct_start(precinct, bounds);

        let mut outcome = SearchOutcome {
            precinct: precinct.id,
            bounds,
            accepted: None,
            candidates_tried: 0,
            cancelled: false,
        };

        for station_count in bounds.min..=bounds.max {
            if observer.should_stop() {
                outcome.cancelled = true;
                break;
            }
            outcome.candidates_tried += 1;
            observer.on_candidate_start(precinct, station_count);

            let batch = self.run_batch(precinct, station_count, rng, observer)?;
            debug!(
                precinct = %precinct.id,
                stations = station_count,
                accepted = batch.accepted,
                iterations = batch.iterations_run(),
                "candidate finished"
            );
            observer.on_candidate_end(precinct, &batch);

            if !batch.complete {
                outcome.cancelled = true;
                break;
            }
            if batch.accepted {
                outcome.accepted = Some(station_count);
                break;
            }
        }

        if outcome.accepted.is_none() && !outcome.cancelled {
            warn!(
                precinct = %precinct.id,
                max = bounds.max,
                "no station count within bounds kept every wait under the threshold"
            );
        }
        observer.on_precinct_end(precinct, &outcome);
        Ok(outcome)
    }

    /// Run every iteration of one candidate count.
    pub fn run_batch<R, O>(
        &self,
        precinct: &Precinct,
        station_count: u32,
        rng: &mut R,
        observer: &mut O,
    ) -> SimResult<CandidateBatch>
    where
        R: RandomSource,
        O: SearchObserver + ?Sized,
    {
        let generator = ArrivalGenerator::new(self.config);
        let mut batch = CandidateBatch {
            precinct:      precinct.id,
            station_count,
            summaries:     Vec::with_capacity(self.config.iterations as usize),
            histogram:     WaitHistogram::new(),
            accepted:      false,
            reported:      precinct.reports_histogram(station_count),
            complete:      true,
        };
        let mut all_within = true;

        for iteration in 0..self.config.iterations {
            if iteration > 0 && observer.should_stop() {
                batch.complete = false;
                break;
            }

            let population = generator.generate(precinct.expected_voters, rng);
            let completed = run_trial(station_count, population)?;
            let summary = summarize(
                iteration,
                precinct,
                station_count,
                self.config.too_long_minutes,
                &completed,
                &mut batch.histogram,
            )?;
            trace!(
                precinct = %precinct.id,
                stations = station_count,
                iteration,
                too_long = summary.too_long.over,
                "iteration finished"
            );

            all_within &= summary.within_threshold();
            observer.on_iteration(&summary);
            batch.summaries.push(summary);
        }

        batch.accepted = batch.complete && all_within;
        Ok(batch)
    }
}
