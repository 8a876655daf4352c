//! Whole-run driver: filters the precinct list and searches each one.

use std::fmt;

use tracing::{info, warn};

use vs_core::{ElectionConfig, Precinct, PrecinctId, SimRng};

use crate::observer::SearchObserver;
use crate::search::{SearchOutcome, StationCountSearch};
use crate::SimResult;

/// How random streams map to precincts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StreamPolicy {
    /// One stream, seeded once, consumed by every precinct in file order.
    #[default]
    Shared,
    /// One stream per precinct, derived from the run seed and the precinct
    /// number.  Precinct results do not depend on which other precincts run.
    /// With the `parallel` feature precincts are searched concurrently.
    PerPrecinct,
}

impl fmt::Display for StreamPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StreamPolicy::Shared      => "shared",
            StreamPolicy::PerPrecinct => "per-precinct",
        })
    }
}

/// Why a precinct was not searched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Expected voters fall outside the configured study range.
    OutOfRange,
    /// The precinct expects nobody; statistics would divide by zero.
    NoExpectedVoters,
}

/// What a [`Runner::run`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Search results, in precinct-file order.
    pub outcomes:  Vec<SearchOutcome>,
    pub skipped:   Vec<(PrecinctId, SkipReason)>,
    /// The observer stopped the run before every eligible precinct finished.
    pub cancelled: bool,
}

impl RunSummary {
    /// Precincts whose search found no acceptable station count.
    pub fn unresolved(&self) -> impl Iterator<Item = &SearchOutcome> {
        self.outcomes.iter().filter(|o| o.accepted.is_none())
    }
}

/// Runs [`StationCountSearch`] over a list of precincts.
///
/// ```rust,ignore
/// let summary = Runner::new(&config)?
///     .stream_policy(StreamPolicy::PerPrecinct)
///     .run(&precincts, &mut observer)?;
/// ```
pub struct Runner<'a> {
    search: StationCountSearch<'a>,
    policy: StreamPolicy,
    seed:   u64,
}

impl<'a> Runner<'a> {
    /// A runner using the configuration's seed and the shared stream.
    pub fn new(config: &'a ElectionConfig) -> SimResult<Self> {
        Ok(Self {
            search: StationCountSearch::new(config)?,
            policy: StreamPolicy::default(),
            seed:   config.seed,
        })
    }

    pub fn stream_policy(mut self, policy: StreamPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override the configuration's seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Search every eligible precinct and report to `observer`.
    pub fn run<O>(&self, precincts: &[Precinct], observer: &mut O) -> SimResult<RunSummary>
    where
        O: SearchObserver + ?Sized,
    {
        let mut summary = RunSummary::default();
        let mut eligible = Vec::with_capacity(precincts.len());
        for precinct in precincts {
            match self.skip_reason(precinct) {
                Some(reason) => summary.skipped.push((precinct.id, reason)),
                None => eligible.push(precinct),
            }
        }
        info!(
            eligible = eligible.len(),
            skipped = summary.skipped.len(),
            policy = %self.policy,
            seed = self.seed,
            "starting run"
        );

        match self.policy {
            StreamPolicy::Shared => {
                let mut rng = SimRng::new(self.seed);
                for precinct in eligible {
                    if observer.should_stop() {
                        summary.cancelled = true;
                        break;
                    }
                    let outcome = self.search.run(precinct, &mut rng, observer)?;
                    if self.record(&mut summary, outcome) {
                        break;
                    }
                }
            }
            StreamPolicy::PerPrecinct => self.run_per_precinct(&eligible, observer, &mut summary)?,
        }

        if summary.cancelled {
            warn!(searched = summary.outcomes.len(), "run cancelled by observer");
        }
        info!(
            searched = summary.outcomes.len(),
            unresolved = summary.unresolved().count(),
            "run finished"
        );
        observer.on_run_end(&summary);
        Ok(summary)
    }

    fn skip_reason(&self, precinct: &Precinct) -> Option<SkipReason> {
        if precinct.expected_voters == 0 {
            Some(SkipReason::NoExpectedVoters)
        } else if !self.search.config().in_study_range(precinct.expected_voters) {
            Some(SkipReason::OutOfRange)
        } else {
            None
        }
    }

    /// Store `outcome`; returns `true` if the run should stop.
    fn record(&self, summary: &mut RunSummary, outcome: SearchOutcome) -> bool {
        let cancelled = outcome.cancelled;
        summary.outcomes.push(outcome);
        if cancelled {
            summary.cancelled = true;
        }
        cancelled
    }

    #[cfg(not(feature = "parallel"))]
    fn run_per_precinct<O>(
        &self,
        eligible: &[&Precinct],
        observer: &mut O,
        summary: &mut RunSummary,
    ) -> SimResult<()>
    where
        O: SearchObserver + ?Sized,
    {
        for precinct in eligible {
            if observer.should_stop() {
                summary.cancelled = true;
                break;
            }
            let mut rng = SimRng::for_precinct(self.seed, precinct.id);
            let outcome = self.search.run(precinct, &mut rng, observer)?;
            if self.record(summary, outcome) {
                break;
            }
        }
        Ok(())
    }

    /// Workers cannot see `observer`, so `should_stop` is only honored before
    /// the precincts are dispatched and between replays.
    #[cfg(feature = "parallel")]
    fn run_per_precinct<O>(
        &self,
        eligible: &[&Precinct],
        observer: &mut O,
        summary: &mut RunSummary,
    ) -> SimResult<()>
    where
        O: SearchObserver + ?Sized,
    {
        use rayon::prelude::*;

        use crate::observer::EventLog;

        if observer.should_stop() {
            summary.cancelled = true;
            return Ok(());
        }

        let results: Vec<(SimResult<SearchOutcome>, EventLog)> = eligible
            .par_iter()
            .map(|precinct| {
                let mut rng = SimRng::for_precinct(self.seed, precinct.id);
                let mut log = EventLog::new();
                let outcome = self.search.run(precinct, &mut rng, &mut log);
                (outcome, log)
            })
            .collect();

        for (outcome, log) in results {
            if observer.should_stop() {
                summary.cancelled = true;
                break;
            }
            log.replay(observer);
            summary.outcomes.push(outcome?);
        }
        Ok(())
    }
}
