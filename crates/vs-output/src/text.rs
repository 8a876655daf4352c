//! Plain-text report backend.
//!
//! ```text
//!  101 Ward_1                       0.62    2400    1488     114  6   31.20 HH    5   6   7 HH
//!   0  101 Ward_1                     1488   5 stations, mean/dev wait (mins)     3.21     4.05 toolong      0   0.00     0   0.00     0   0.00
//!   ...
//!
//! HISTOGRAM  101 Ward_1 ...
//! HISTOGRAM STATIONS 5
//! HISTOGRAM      0:  812.40: ****************...
//! HISTOGRAM      1:   93.10: ***...
//! HISTOGRAM
//!
//! RESULT  101 Ward_1                    stations    6 tried  2 range 5-18
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use vs_core::Precinct;

use crate::writer::ReportWriter;
use crate::{BucketRow, IterationRow, OutcomeRow, OutputResult};

/// Writes the human-readable report to any byte sink.
pub struct TextReport<W: Write> {
    out:      W,
    finished: bool,
}

impl TextReport<BufWriter<File>> {
    /// Create (or truncate) the report file at `path`.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out, finished: false }
    }

    /// Unwrap the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportWriter for TextReport<W> {
    fn write_candidate_header(&mut self, precinct: &Precinct, _station_count: u32) -> OutputResult<()> {
        writeln!(self.out, "{precinct}")?;
        Ok(())
    }

    fn write_iteration(&mut self, row: &IterationRow) -> OutputResult<()> {
        writeln!(
            self.out,
            "{:3} {:4} {:<25}{:6}{:4} stations, mean/dev wait (mins) {:8.2} {:8.2} toolong {:6} {:6.2}{:6} {:6.2}{:6} {:6.2}",
            row.iteration,
            row.precinct,
            row.precinct_name,
            row.expected_voters,
            row.station_count,
            row.mean_wait_mins,
            row.dev_wait_mins,
            row.too_long,
            row.too_long_pct,
            row.plus10,
            row.plus10_pct,
            row.plus20,
            row.plus20_pct,
        )?;
        Ok(())
    }

    fn write_histogram(
        &mut self,
        precinct:      &Precinct,
        station_count: u32,
        rows:          &[BucketRow],
    ) -> OutputResult<()> {
        writeln!(self.out)?;
        writeln!(self.out, "HISTOGRAM {precinct}")?;
        writeln!(self.out, "HISTOGRAM STATIONS {station_count}")?;
        for row in rows {
            writeln!(
                self.out,
                "HISTOGRAM {:6}: {:7.2}: {}",
                row.minute,
                row.mean_count,
                "*".repeat(row.stars)
            )?;
        }
        writeln!(self.out, "HISTOGRAM")?;
        writeln!(self.out)?;
        Ok(())
    }

    fn write_outcome(&mut self, row: &OutcomeRow) -> OutputResult<()> {
        let accepted = match row.accepted {
            Some(n) => format!("{n:4}"),
            None => "none".to_owned(),
        };
        write!(
            self.out,
            "RESULT {:4} {:<25} stations {accepted} tried {:2} range {}-{}",
            row.precinct, row.precinct_name, row.candidates_tried, row.min_stations, row.max_stations,
        )?;
        if row.cancelled {
            write!(self.out, " (cancelled)")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
