//! Minute-resolution wait histograms.

use std::collections::BTreeMap;

use vs_core::time::whole_minutes;
use vs_core::Voter;

/// Lowest-bucket count above which the star scale starts compressing.
pub const STAR_SCALE_THRESHOLD: u64 = 50;

/// Count of completed voters per whole minute waited.
///
/// Only minutes with at least one voter have a bucket.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaitHistogram {
    buckets: BTreeMap<u64, u64>,
    total:   u64,
}

impl WaitHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every admitted voter in `voters` into its minute bucket.
    pub fn from_voters<'a>(voters: impl IntoIterator<Item = &'a Voter>) -> Self {
        let mut hist = Self::new();
        for minutes in voters.into_iter().filter_map(Voter::wait_minutes) {
            hist.record(minutes);
        }
        hist
    }

    #[inline]
    pub fn record(&mut self, minutes: u64) {
        *self.buckets.entry(minutes).or_default() += 1;
        self.total += 1;
    }

    /// Add every bucket of `other` into `self`.
    pub fn merge(&mut self, other: &WaitHistogram) {
        for (&minutes, &count) in &other.buckets {
            *self.buckets.entry(minutes).or_default() += count;
        }
        self.total += other.total;
    }

    /// Number of voters who waited strictly more than `minutes`.
    pub fn count_above(&self, minutes: u64) -> u64 {
        self.buckets
            .range(minutes.saturating_add(1)..)
            .map(|(_, &count)| count)
            .sum()
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// `(minutes, count)` pairs in ascending minute order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.buckets.iter().map(|(&m, &c)| (m, c))
    }

    /// The lowest populated bucket.
    pub fn lowest(&self) -> Option<(u64, u64)> {
        self.buckets.first_key_value().map(|(&m, &c)| (m, c))
    }

    /// Voters represented by one star when this histogram (accumulated over
    /// `iterations` trials) is rendered.
    ///
    /// One, unless the lowest bucket holds more than
    /// [`STAR_SCALE_THRESHOLD`] voters, in which case it is that count over
    /// `50 × iterations` in integer arithmetic, never below one.
    /// The truncation means a busy bucket can still render more than 50
    /// stars.
    pub fn voters_per_star(&self, iterations: u32) -> u64 {
        match self.lowest() {
            Some((_, count)) if count > STAR_SCALE_THRESHOLD => {
                let divisor = STAR_SCALE_THRESHOLD * u64::from(iterations.max(1));
                (count / divisor).max(1)
            }
            _ => 1,
        }
    }

    /// Render-ready rows, averaged over `iterations` trials.
    pub fn rows(&self, iterations: u32) -> Vec<HistogramRow> {
        let per_star = self.voters_per_star(iterations) as f64;
        let iterations = f64::from(iterations.max(1));
        self.iter()
            .map(|(minute, count)| {
                let mean_count = count as f64 / iterations;
                HistogramRow {
                    minute,
                    count,
                    mean_count,
                    stars: (mean_count / per_star).ceil() as usize,
                }
            })
            .collect()
    }
}

/// One rendered histogram bucket.
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramRow {
    pub minute:     u64,
    /// Raw count summed over all iterations.
    pub count:      u64,
    /// `count / iterations`.
    pub mean_count: f64,
    pub stars:      usize,
}
