//! `ReportObserver<W>` bridges `SearchObserver` to a `ReportWriter`; `Tee`
//! fans one observer stream out to two.

use vs_core::Precinct;
use vs_sim::{CandidateBatch, IterationSummary, RunSummary, SearchObserver, SearchOutcome, StationBounds};

use crate::row::{BucketRow, IterationRow, OutcomeRow};
use crate::writer::ReportWriter;
use crate::{OutputError, OutputResult};

/// A [`SearchObserver`] that writes iterations, reported histograms, and
/// outcomes to any [`ReportWriter`] backend.
///
/// Errors from the writer are stored internally because `SearchObserver`
/// methods have no return value.  After the run returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct ReportObserver<W: ReportWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: ReportWriter> ReportObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect a buffer after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: ReportWriter> SearchObserver for ReportObserver<W> {
    fn on_candidate_start(&mut self, precinct: &Precinct, station_count: u32) {
        let result = self.writer.write_candidate_header(precinct, station_count);
        self.store_err(result);
    }

    fn on_iteration(&mut self, summary: &IterationSummary) {
        let result = self.writer.write_iteration(&IterationRow::from(summary));
        self.store_err(result);
    }

    fn on_candidate_end(&mut self, precinct: &Precinct, batch: &CandidateBatch) {
        if !batch.reported || batch.histogram.is_empty() {
            return;
        }
        let rows: Vec<BucketRow> = batch
            .histogram
            .rows(batch.iterations_run())
            .iter()
            .map(|row| BucketRow::new(precinct, batch.station_count, row))
            .collect();
        let result = self.writer.write_histogram(precinct, batch.station_count, &rows);
        self.store_err(result);
    }

    fn on_precinct_end(&mut self, precinct: &Precinct, outcome: &SearchOutcome) {
        let result = self.writer.write_outcome(&OutcomeRow::new(precinct, outcome));
        self.store_err(result);
    }

    fn on_run_end(&mut self, _summary: &RunSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

/// Forwards every callback to `A` then `B`.  Stops when either asks to.
pub struct Tee<A, B> {
    pub first:  A,
    pub second: B,
}

impl<A, B> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: SearchObserver, B: SearchObserver> SearchObserver for Tee<A, B> {
    fn on_precinct_start(&mut self, precinct: &Precinct, bounds: StationBounds) {
        self.first.on_precinct_start(precinct, bounds);
        self.second.on_precinct_start(precinct, bounds);
    }

    fn on_candidate_start(&mut self, precinct: &Precinct, station_count: u32) {
        self.first.on_candidate_start(precinct, station_count);
        self.second.on_candidate_start(precinct, station_count);
    }

    fn on_iteration(&mut self, summary: &IterationSummary) {
        self.first.on_iteration(summary);
        self.second.on_iteration(summary);
    }

    fn on_candidate_end(&mut self, precinct: &Precinct, batch: &CandidateBatch) {
        self.first.on_candidate_end(precinct, batch);
        self.second.on_candidate_end(precinct, batch);
    }

    fn on_precinct_end(&mut self, precinct: &Precinct, outcome: &SearchOutcome) {
        self.first.on_precinct_end(precinct, outcome);
        self.second.on_precinct_end(precinct, outcome);
    }

    fn on_run_end(&mut self, summary: &RunSummary) {
        self.first.on_run_end(summary);
        self.second.on_run_end(summary);
    }

    fn should_stop(&mut self) -> bool {
        // Both sides are polled every time.
        let first = self.first.should_stop();
        let second = self.second.should_stop();
        first || second
    }
}
