//! The `ReportWriter` trait implemented by all backend writers.

use vs_core::Precinct;

use crate::{BucketRow, IterationRow, OutcomeRow, OutputResult};

/// Trait implemented by the text and CSV writers.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`ReportObserver::take_error`][crate::ReportObserver::take_error].
pub trait ReportWriter {
    /// Start of a candidate station count for `precinct`.
    fn write_candidate_header(&mut self, precinct: &Precinct, station_count: u32) -> OutputResult<()>;

    /// Write one trial's statistics.
    fn write_iteration(&mut self, row: &IterationRow) -> OutputResult<()>;

    /// Write one candidate's histogram, populated minutes in ascending order.
    fn write_histogram(
        &mut self,
        precinct:      &Precinct,
        station_count: u32,
        rows:          &[BucketRow],
    ) -> OutputResult<()>;

    /// Write one precinct's search result.
    fn write_outcome(&mut self, row: &OutcomeRow) -> OutputResult<()>;

    /// Flush all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
