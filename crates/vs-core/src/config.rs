//! Election-wide simulation configuration.
//!
//! Loaded once by the application (see `vs-input`), validated once, and then
//! shared read-only by every precinct search.

use crate::time::SECS_PER_HOUR;
use crate::{CoreError, CoreResult, RandomSource};

/// Everything the simulator knows about election day as a whole.
#[derive(Clone, Debug, PartialEq)]
pub struct ElectionConfig {
    /// Master RNG seed.  The same seed always produces identical reports.
    pub seed: u64,

    /// Length of the election day in whole hours.
    pub day_length_hours: u32,

    /// Mean time a voter spends at a station, in seconds.  Only used to
    /// derive the lower bound of the station-count search.
    pub mean_service_secs: u32,

    /// Precincts whose expected voters fall outside
    /// `[min_expected_voters, max_expected_voters]` are not simulated.
    pub min_expected_voters: u32,
    pub max_expected_voters: u32,

    /// A wait strictly longer than this many whole minutes is "too long".
    pub too_long_minutes: u32,

    /// Trials run per candidate station count.
    pub iterations: u32,

    /// Percentage of expected voters already in line when the polls open.
    pub arrival_zero_pct: f64,

    /// Percentage of expected voters arriving during each hour of the day.
    /// Length must equal `day_length_hours`.
    pub arrival_pct_by_hour: Vec<f64>,

    /// Observed service durations in seconds.  Durations are drawn by
    /// picking a uniform index into this table.
    pub service_times_secs: Vec<u32>,
}

impl ElectionConfig {
    /// Length of the election day in seconds.
    #[inline]
    pub fn day_length_secs(&self) -> u64 {
        self.day_length_hours as u64 * SECS_PER_HOUR
    }

    /// `true` if a precinct expecting `expected_voters` falls inside the
    /// configured study range.
    #[inline]
    pub fn in_study_range(&self, expected_voters: u32) -> bool {
        (self.min_expected_voters..=self.max_expected_voters).contains(&expected_voters)
    }

    /// Draw one service duration from the empirical table.
    ///
    /// Call only on a validated config; an empty table yields 0.
    pub fn sample_service_secs<R: RandomSource>(&self, rng: &mut R) -> u64 {
        let Some(last) = self.service_times_secs.len().checked_sub(1) else {
            return 0;
        };
        let sub = rng.uniform_int(0, last as u64) as usize;
        self.service_times_secs.get(sub).copied().unwrap_or(0) as u64
    }

    /// Check the shape invariants the simulator relies on.
    pub fn validate(&self) -> CoreResult<()> {
        if self.day_length_hours == 0 {
            return Err(CoreError::Config("election day length must be at least one hour".into()));
        }
        if self.arrival_pct_by_hour.len() != self.day_length_hours as usize {
            return Err(CoreError::Config(format!(
                "{} hourly arrival percentages given for a {}-hour day",
                self.arrival_pct_by_hour.len(),
                self.day_length_hours
            )));
        }
        if self.service_times_secs.is_empty() {
            return Err(CoreError::Config("service time table is empty".into()));
        }
        if let Some(pos) = self.service_times_secs.iter().position(|&s| s == 0) {
            return Err(CoreError::Config(format!(
                "service time table entry {pos} is zero seconds"
            )));
        }
        if self.iterations == 0 {
            return Err(CoreError::Config("iteration count must be at least one".into()));
        }
        if self.min_expected_voters > self.max_expected_voters {
            return Err(CoreError::Config(format!(
                "expected-voter range is empty: min {} > max {}",
                self.min_expected_voters, self.max_expected_voters
            )));
        }
        let bad_pct = std::iter::once(&self.arrival_zero_pct)
            .chain(&self.arrival_pct_by_hour)
            .find(|p| !p.is_finite() || **p < 0.0);
        if let Some(p) = bad_pct {
            return Err(CoreError::Config(format!("invalid arrival percentage {p}")));
        }
        Ok(())
    }
}
