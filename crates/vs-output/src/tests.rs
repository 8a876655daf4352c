//! Integration tests for vs-output.

#[cfg(test)]
use vs_core::{ElectionConfig, Precinct, PrecinctId};
#[cfg(test)]
use vs_sim::{CandidateBatch, IterationSummary, SearchOutcome, StationBounds, TooLongCounts, WaitHistogram};

#[cfg(test)]
fn precinct(number: u32, report: &[u32]) -> Precinct {
    Precinct {
        id:                PrecinctId(number),
        name:              format!("Ward_{number}"),
        turnout:           0.62,
        registered_voters: 2_400,
        expected_voters:   40,
        expected_per_hour: 20,
        stations_hint:     2,
        minority_pct:      31.2,
        report_stations:   report.iter().copied().collect(),
    }
}

#[cfg(test)]
fn summary(iteration: u32) -> IterationSummary {
    IterationSummary {
        iteration,
        precinct:        PrecinctId(101),
        precinct_name:   "Ward_101".into(),
        expected_voters: 40,
        station_count:   3,
        completed:       41,
        mean_wait_secs:  90.0,
        dev_wait_secs:   30.0,
        too_long:        TooLongCounts { over: 4, over_plus10: 2, over_plus20: 0 },
    }
}

#[cfg(test)]
fn batch(station_count: u32, reported: bool, buckets: &[(u64, u64)]) -> CandidateBatch {
    let mut histogram = WaitHistogram::new();
    for &(minute, count) in buckets {
        for _ in 0..count {
            histogram.record(minute);
        }
    }
    CandidateBatch {
        precinct: PrecinctId(101),
        station_count,
        summaries: vec![summary(0)],
        histogram,
        accepted: false,
        reported,
        complete: true,
    }
}

#[cfg(test)]
fn outcome(accepted: Option<u32>, cancelled: bool) -> SearchOutcome {
    SearchOutcome {
        precinct: PrecinctId(101),
        bounds: StationBounds { min: 2, max: 15 },
        accepted,
        candidates_tried: 3,
        cancelled,
    }
}

#[cfg(test)]
fn config() -> ElectionConfig {
    ElectionConfig {
        seed:                17,
        day_length_hours:    2,
        mean_service_secs:   300,
        min_expected_voters: 1,
        max_expected_voters: 1_000,
        too_long_minutes:    5,
        iterations:          4,
        arrival_zero_pct:    10.0,
        arrival_pct_by_hour: vec![50.0, 40.0],
        service_times_secs:  vec![120, 300, 600],
    }
}

#[cfg(test)]
fn text_of(obs: crate::ReportObserver<crate::TextReport<Vec<u8>>>) -> String {
    String::from_utf8(obs.into_writer().into_inner()).unwrap()
}

// ── Text report ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod text_tests {
    use vs_sim::{RunSummary, SearchObserver};

    use super::*;
    use crate::{ReportObserver, TextReport};

    fn observer() -> ReportObserver<TextReport<Vec<u8>>> {
        ReportObserver::new(TextReport::new(Vec::new()))
    }

    #[test]
    fn iteration_line_in_minutes() {
        let mut obs = observer();
        obs.on_iteration(&summary(7));
        let text = text_of(obs);
        assert!(text.starts_with("  7  101 Ward_101"));
        assert!(text.contains("   3 stations, mean/dev wait (mins)     1.50     0.50 toolong"));
        assert!(text.contains("     4  10.00     2   5.00     0   0.00"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn candidate_header_is_precinct_line() {
        let p = precinct(101, &[3]);
        let mut obs = observer();
        obs.on_candidate_start(&p, 3);
        assert_eq!(text_of(obs), format!("{p}\n"));
    }

    #[test]
    fn reported_histogram_block() {
        let p = precinct(101, &[3]);
        let mut obs = observer();
        obs.on_candidate_end(&p, &batch(3, true, &[(0, 120), (3, 10)]));
        let text = text_of(obs);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], format!("HISTOGRAM {p}"));
        assert_eq!(lines[2], "HISTOGRAM STATIONS 3");
        // 120 in the lowest bucket over one iteration: two voters per star.
        assert_eq!(lines[3], format!("HISTOGRAM      0:  120.00: {}", "*".repeat(60)));
        assert_eq!(lines[4], "HISTOGRAM      3:   10.00: *****");
        assert_eq!(lines[5], "HISTOGRAM");
    }

    #[test]
    fn unreported_count_writes_no_histogram() {
        let p = precinct(101, &[]);
        let mut obs = observer();
        obs.on_candidate_end(&p, &batch(3, false, &[(0, 5)]));
        assert!(text_of(obs).is_empty());
    }

    #[test]
    fn result_lines() {
        let p = precinct(101, &[]);
        let mut obs = observer();
        obs.on_precinct_end(&p, &outcome(Some(4), false));
        obs.on_precinct_end(&p, &outcome(None, true));
        let text = text_of(obs);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "RESULT  101 Ward_101                  stations    4 tried  3 range 2-15"
        );
        assert!(lines[1].contains("stations none"));
        assert!(lines[1].ends_with("(cancelled)"));
    }

    #[test]
    fn run_end_flushes_once() {
        let mut obs = observer();
        obs.on_run_end(&RunSummary::default());
        obs.on_run_end(&RunSummary::default());
        assert!(obs.take_error().is_none());
    }
}

// ── Error capture ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod error_tests {
    use std::io;

    use vs_sim::SearchObserver;

    use super::*;
    use crate::{OutputError, ReportObserver, TextReport};

    /// Accepts nothing.
    struct Broken {
        attempts: usize,
    }

    impl io::Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            Err(io::Error::new(io::ErrorKind::Other, format!("refused #{}", self.attempts)))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn first_write_error_kept() {
        let mut obs = ReportObserver::new(TextReport::new(Broken { attempts: 0 }));
        obs.on_iteration(&summary(0));
        obs.on_iteration(&summary(1));

        match obs.take_error() {
            Some(OutputError::Io(e)) => assert_eq!(e.to_string(), "refused #1"),
            other => panic!("expected first I/O error, got {other:?}"),
        }
        assert!(obs.take_error().is_none());
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;
    use vs_sim::{RunSummary, SearchObserver};

    use super::*;
    use crate::csv::{CsvWriter, HISTOGRAM_HEADER, ITERATION_HEADER, OUTCOME_HEADER};
    use crate::writer::ReportWriter;
    use crate::ReportObserver;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read(dir: &TempDir, file: &str) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(read(&dir, "iterations.csv").0, ITERATION_HEADER);
        assert_eq!(read(&dir, "histograms.csv").0, HISTOGRAM_HEADER);
        assert_eq!(read(&dir, "outcomes.csv").0, OUTCOME_HEADER);
    }

    #[test]
    fn rows_written_through_observer() {
        let dir = tmp();
        let p = precinct(101, &[3]);
        let mut obs = ReportObserver::new(CsvWriter::new(dir.path()).unwrap());
        obs.on_candidate_start(&p, 3);
        obs.on_iteration(&summary(0));
        obs.on_candidate_end(&p, &batch(3, true, &[(0, 2), (4, 1)]));
        obs.on_precinct_end(&p, &outcome(None, false));
        obs.on_run_end(&RunSummary::default());
        assert!(obs.take_error().is_none());

        let (_, iterations) = read(&dir, "iterations.csv");
        assert_eq!(iterations.len(), 1);
        assert_eq!(&iterations[0][1], "101");
        assert_eq!(&iterations[0][5], "1.5000");
        assert_eq!(&iterations[0][7], "4");
        assert_eq!(&iterations[0][8], "10.0000");

        let (_, buckets) = read(&dir, "histograms.csv");
        assert_eq!(buckets.len(), 2);
        assert_eq!(&buckets[1][2], "4");
        assert_eq!(&buckets[1][3], "1");

        let (_, outcomes) = read(&dir, "outcomes.csv");
        assert_eq!(outcomes.len(), 1);
        assert_eq!(&outcomes[0][5], "");
        assert_eq!(&outcomes[0][7], "0");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── Tee ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tee_tests {
    use vs_sim::SearchObserver;

    use super::*;
    use crate::Tee;

    #[derive(Default)]
    struct Counter {
        iterations: usize,
        polls:      usize,
        stop:       bool,
    }

    impl SearchObserver for Counter {
        fn on_iteration(&mut self, _summary: &IterationSummary) {
            self.iterations += 1;
        }
        fn should_stop(&mut self) -> bool {
            self.polls += 1;
            self.stop
        }
    }

    #[test]
    fn both_sides_see_every_event() {
        let mut tee = Tee::new(Counter::default(), Counter::default());
        tee.on_iteration(&summary(0));
        tee.on_iteration(&summary(1));
        let (a, b) = tee.into_parts();
        assert_eq!(a.iterations, 2);
        assert_eq!(b.iterations, 2);
    }

    #[test]
    fn either_side_can_stop() {
        let mut tee = Tee::new(Counter::default(), Counter { stop: true, ..Counter::default() });
        assert!(tee.should_stop());
        assert_eq!(tee.first.polls, 1);
        assert_eq!(tee.second.polls, 1);
    }
}

// ── End to end ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism_tests {
    use vs_sim::Runner;

    use super::*;
    use crate::{ReportObserver, TextReport};

    fn report(seed: u64) -> String {
        let config = config();
        let precincts = vec![precinct(101, &[1, 2]), precinct(102, &[])];
        let mut obs = ReportObserver::new(TextReport::new(Vec::new()));
        Runner::new(&config).unwrap().seed(seed).run(&precincts, &mut obs).unwrap();
        assert!(obs.take_error().is_none());
        text_of(obs)
    }

    #[test]
    fn same_seed_same_bytes() {
        let a = report(17);
        assert!(!a.is_empty());
        assert_eq!(a, report(17));
    }

    #[test]
    fn every_precinct_gets_a_result_line() {
        let text = report(3);
        assert_eq!(text.lines().filter(|l| l.starts_with("RESULT")).count(), 2);
    }
}
