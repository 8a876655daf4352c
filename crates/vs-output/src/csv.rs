//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `iterations.csv`
//! - `histograms.csv`
//! - `outcomes.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use vs_core::Precinct;

use crate::writer::ReportWriter;
use crate::{BucketRow, IterationRow, OutcomeRow, OutputResult};

pub const ITERATION_HEADER: [&str; 13] = [
    "iteration",
    "precinct",
    "precinct_name",
    "expected_voters",
    "stations",
    "mean_wait_mins",
    "dev_wait_mins",
    "toolong",
    "toolong_pct",
    "toolong_plus10",
    "toolong_plus10_pct",
    "toolong_plus20",
    "toolong_plus20_pct",
];

pub const HISTOGRAM_HEADER: [&str; 6] =
    ["precinct", "stations", "wait_mins", "count", "mean_count", "stars"];

pub const OUTCOME_HEADER: [&str; 8] = [
    "precinct",
    "precinct_name",
    "expected_voters",
    "min_stations",
    "max_stations",
    "accepted_stations",
    "candidates_tried",
    "cancelled",
];

/// Writes search results to three CSV files.
pub struct CsvWriter {
    iterations: Writer<File>,
    histograms: Writer<File>,
    outcomes:   Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut iterations = Writer::from_path(dir.join("iterations.csv"))?;
        iterations.write_record(ITERATION_HEADER)?;

        let mut histograms = Writer::from_path(dir.join("histograms.csv"))?;
        histograms.write_record(HISTOGRAM_HEADER)?;

        let mut outcomes = Writer::from_path(dir.join("outcomes.csv"))?;
        outcomes.write_record(OUTCOME_HEADER)?;

        Ok(Self {
            iterations,
            histograms,
            outcomes,
            finished: false,
        })
    }
}

impl ReportWriter for CsvWriter {
    fn write_candidate_header(&mut self, _precinct: &Precinct, _station_count: u32) -> OutputResult<()> {
        Ok(())
    }

    fn write_iteration(&mut self, row: &IterationRow) -> OutputResult<()> {
        self.iterations.write_record(&[
            row.iteration.to_string(),
            row.precinct.to_string(),
            row.precinct_name.clone(),
            row.expected_voters.to_string(),
            row.station_count.to_string(),
            format!("{:.4}", row.mean_wait_mins),
            format!("{:.4}", row.dev_wait_mins),
            row.too_long.to_string(),
            format!("{:.4}", row.too_long_pct),
            row.plus10.to_string(),
            format!("{:.4}", row.plus10_pct),
            row.plus20.to_string(),
            format!("{:.4}", row.plus20_pct),
        ])?;
        Ok(())
    }

    fn write_histogram(
        &mut self,
        _precinct:      &Precinct,
        _station_count: u32,
        rows:           &[BucketRow],
    ) -> OutputResult<()> {
        for row in rows {
            self.histograms.write_record(&[
                row.precinct.to_string(),
                row.station_count.to_string(),
                row.minute.to_string(),
                row.count.to_string(),
                format!("{:.4}", row.mean_count),
                row.stars.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_outcome(&mut self, row: &OutcomeRow) -> OutputResult<()> {
        self.outcomes.write_record(&[
            row.precinct.to_string(),
            row.precinct_name.clone(),
            row.expected_voters.to_string(),
            row.min_stations.to_string(),
            row.max_stations.to_string(),
            row.accepted.map(|n| n.to_string()).unwrap_or_default(),
            row.candidates_tried.to_string(),
            (row.cancelled as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.iterations.flush()?;
        self.histograms.flush()?;
        self.outcomes.flush()?;
        Ok(())
    }
}
