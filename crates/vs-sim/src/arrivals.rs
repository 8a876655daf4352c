//! Synthetic voter populations.
//!
//! # Draw order
//!
//! ```text
//! for each voter in line at the open:      duration
//! for hour in 0..day_length_hours:
//!     for each voter arriving that hour:   interarrival, duration
//! ```
//!
//! Reproducible runs depend on this order; do not reorder the draws.
//!
//! # Arrival model
//!
//! `round(pct / 100 × expected)` voters are in line at second 0.  Each hour
//! then gets `round(pct_h / 100 × expected)` voters, plus one more on even
//! hours, spaced by exponential interarrival gaps with rate
//! `voters_this_hour / 3600` starting from the top of the hour.  Cumulative
//! arrivals are allowed to run past the end of their hour; both the even-hour
//! extra voter and the overrun are kept as-is for compatibility with earlier
//! runs.

use vs_core::time::SECS_PER_HOUR;
use vs_core::{ElectionConfig, RandomSource, Tick, Voter, VoterSeq};

/// Builds one trial's voter population from the configured arrival tables.
pub struct ArrivalGenerator<'a> {
    config: &'a ElectionConfig,
}

impl<'a> ArrivalGenerator<'a> {
    pub fn new(config: &'a ElectionConfig) -> Self {
        Self { config }
    }

    /// Generate the voters for one trial, in sequence order.
    pub fn generate<R: RandomSource>(&self, expected_voters: u32, rng: &mut R) -> Vec<Voter> {
        let mut voters = Vec::new();

        let at_zero = share_of(self.config.arrival_zero_pct, expected_voters);
        for _ in 0..at_zero {
            let duration = self.config.sample_service_secs(rng);
            push_voter(&mut voters, Tick::ZERO, duration);
        }

        for (hour, &pct) in self.config.arrival_pct_by_hour.iter().enumerate() {
            let mut this_hour = share_of(pct, expected_voters);
            if hour % 2 == 0 {
                this_hour += 1;
            }
            if this_hour <= 0 {
                continue;
            }

            let rate = this_hour as f64 / SECS_PER_HOUR as f64;
            let mut arrival = Tick::hour_start(hour as u32);
            for _ in 0..this_hour {
                arrival = arrival + rng.exponential_int(rate);
                let duration = self.config.sample_service_secs(rng);
                push_voter(&mut voters, arrival, duration);
            }
        }

        voters
    }
}

/// Append a voter whose sequence number is its generation order.
fn push_voter(voters: &mut Vec<Voter>, arrival: Tick, duration_secs: u64) {
    let seq = VoterSeq(voters.len() as u32);
    voters.push(Voter::new(seq, arrival, duration_secs));
}

/// `pct` percent of `expected_voters`, rounded half away from zero.
fn share_of(pct: f64, expected_voters: u32) -> i64 {
    (pct / 100.0 * expected_voters as f64).round() as i64
}
