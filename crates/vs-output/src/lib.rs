//! `vs-output`: report writers for votesim search results.
//!
//! Two backends are provided:
//!
//! | Backend       | Output                                                  |
//! |---------------|---------------------------------------------------------|
//! | `TextReport`  | one human-readable report on any `io::Write`            |
//! | `CsvWriter`   | `iterations.csv`, `histograms.csv`, `outcomes.csv`      |
//!
//! Both implement [`ReportWriter`] and are driven by [`ReportObserver`],
//! which implements `vs_sim::SearchObserver`.  [`Tee`] runs two observers
//! side by side.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vs_output::{CsvWriter, ReportObserver, TextReport, Tee};
//!
//! let text = ReportObserver::new(TextReport::create(Path::new("report.txt"))?);
//! let csv = ReportObserver::new(CsvWriter::new(Path::new("./out"))?);
//! let mut obs = Tee::new(text, csv);
//! runner.run(&precincts, &mut obs)?;
//! obs.first.take_error().map(|e| eprintln!("report error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod text;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::{ReportObserver, Tee};
pub use row::{BucketRow, IterationRow, OutcomeRow};
pub use text::TextReport;
pub use writer::ReportWriter;
