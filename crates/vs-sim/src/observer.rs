//! Search observer trait for report output and progress reporting.

use vs_core::Precinct;

use crate::runner::RunSummary;
use crate::search::{CandidateBatch, SearchOutcome, StationBounds};
use crate::stats::IterationSummary;

/// Callbacks invoked by [`StationCountSearch::run`][crate::StationCountSearch::run]
/// and [`Runner::run`][crate::Runner::run] at key points of the search.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: acceptance printer
///
/// ```rust,ignore
/// struct Accepted;
///
/// impl SearchObserver for Accepted {
///     fn on_precinct_end(&mut self, precinct: &Precinct, outcome: &SearchOutcome) {
///         println!("{}: {:?}", precinct.name, outcome.accepted);
///     }
/// }
/// ```
pub trait SearchObserver {
    /// Called once per searched precinct, before its first candidate.
    fn on_precinct_start(&mut self, _precinct: &Precinct, _bounds: StationBounds) {}

    /// Called before the first iteration of each candidate station count.
    fn on_candidate_start(&mut self, _precinct: &Precinct, _station_count: u32) {}

    /// Called after every trial with its statistics.
    fn on_iteration(&mut self, _summary: &IterationSummary) {}

    /// Called after each candidate's batch, accepted or not.
    ///
    /// `batch.reported` tells whether the precinct asked for this count's
    /// histogram.
    fn on_candidate_end(&mut self, _precinct: &Precinct, _batch: &CandidateBatch) {}

    /// Called once per searched precinct with the search result.
    fn on_precinct_end(&mut self, _precinct: &Precinct, _outcome: &SearchOutcome) {}

    /// Called once after every precinct has been searched or skipped.
    fn on_run_end(&mut self, _summary: &RunSummary) {}

    /// Polled before each candidate and between iterations.  Return `true`
    /// to end the search early.
    fn should_stop(&mut self) -> bool {
        false
    }
}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    fn on_precinct_start(&mut self, precinct: &Precinct, bounds: StationBounds) {
        (**self).on_precinct_start(precinct, bounds);
    }
    fn on_candidate_start(&mut self, precinct: &Precinct, station_count: u32) {
        (**self).on_candidate_start(precinct, station_count);
    }
    fn on_iteration(&mut self, summary: &IterationSummary) {
        (**self).on_iteration(summary);
    }
    fn on_candidate_end(&mut self, precinct: &Precinct, batch: &CandidateBatch) {
        (**self).on_candidate_end(precinct, batch);
    }
    fn on_precinct_end(&mut self, precinct: &Precinct, outcome: &SearchOutcome) {
        (**self).on_precinct_end(precinct, outcome);
    }
    fn on_run_end(&mut self, summary: &RunSummary) {
        (**self).on_run_end(summary);
    }
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }
}

/// A [`SearchObserver`] that does nothing.
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

// ── EventLog ─────────────────────────────────────────────────────────────────

/// One recorded observer callback.
#[derive(Clone, Debug)]
pub enum SearchEvent {
    PrecinctStart { precinct: Precinct, bounds: StationBounds },
    CandidateStart { precinct: Precinct, station_count: u32 },
    Iteration(IterationSummary),
    CandidateEnd { precinct: Precinct, batch: CandidateBatch },
    PrecinctEnd { precinct: Precinct, outcome: SearchOutcome },
}

/// Records every per-precinct callback so it can be replayed later onto
/// another observer, in the order they happened.
///
/// Used to run precincts on worker threads while keeping report output in
/// precinct order.  Never asks to stop.
#[derive(Default, Debug)]
pub struct EventLog {
    events: Vec<SearchEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SearchEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Feed every recorded event to `observer`, oldest first.
    pub fn replay<O: SearchObserver + ?Sized>(&self, observer: &mut O) {
        for event in &self.events {
            match event {
                SearchEvent::PrecinctStart { precinct, bounds } => {
                    observer.on_precinct_start(precinct, *bounds)
                }
                SearchEvent::CandidateStart { precinct, station_count } => {
                    observer.on_candidate_start(precinct, *station_count)
                }
                SearchEvent::Iteration(summary) => observer.on_iteration(summary),
                SearchEvent::CandidateEnd { precinct, batch } => {
                    observer.on_candidate_end(precinct, batch)
                }
                SearchEvent::PrecinctEnd { precinct, outcome } => {
                    observer.on_precinct_end(precinct, outcome)
                }
            }
        }
    }
}

impl SearchObserver for EventLog {
    fn on_precinct_start(&mut self, precinct: &Precinct, bounds: StationBounds) {
        self.events.push(SearchEvent::PrecinctStart { precinct: precinct.clone(), bounds });
    }

    fn on_candidate_start(&mut self, precinct: &Precinct, station_count: u32) {
        self.events
            .push(SearchEvent::CandidateStart { precinct: precinct.clone(), station_count });
    }

    fn on_iteration(&mut self, summary: &IterationSummary) {
        self.events.push(SearchEvent::Iteration(summary.clone()));
    }

    fn on_candidate_end(&mut self, precinct: &Precinct, batch: &CandidateBatch) {
        self.events
            .push(SearchEvent::CandidateEnd { precinct: precinct.clone(), batch: batch.clone() });
    }

    fn on_precinct_end(&mut self, precinct: &Precinct, outcome: &SearchOutcome) {
        self.events
            .push(SearchEvent::PrecinctEnd { precinct: precinct.clone(), outcome: outcome.clone() });
    }
}
